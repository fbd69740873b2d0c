// src/gui/progress.rs
use std::sync::mpsc::Sender;

use chrono::Local;
use eframe::egui;

use crate::{
    job::JobStatus,
    progress::Progress,
    runner::JobRun,
};

/// What the job thread tells the window.
pub enum GuiEvent {
    Log { percent: u8, line: String },
    Status(JobStatus),
    Finished(Box<JobRun>),
    /// The job never started.
    Aborted(String),
}

pub struct ChannelProgress {
    tx: Sender<GuiEvent>,
    ctx: egui::Context,
}

impl ChannelProgress {
    pub fn new(tx: Sender<GuiEvent>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }

    fn send(&self, ev: GuiEvent) {
        // Receiver gone means the window closed; nothing left to tell.
        if self.tx.send(ev).is_ok() {
            self.ctx.request_repaint();
        }
    }
}

pub fn stamp(msg: &str) -> String {
    format!("[{}] {}", Local::now().format("%H:%M:%S"), msg)
}

impl Progress for ChannelProgress {
    fn report(&mut self, percent: u8, msg: &str) {
        self.send(GuiEvent::Log { percent, line: stamp(msg) });
    }
    fn status(&mut self, status: JobStatus) {
        self.send(GuiEvent::Status(status));
    }
}

#[cfg(test)]
mod tests {
    use super::stamp;

    #[test]
    fn stamp_prefixes_wall_clock() {
        let line = stamp("Fetching");
        assert_eq!(line.len(), "[00:00:00] Fetching".len());
        assert!(line.starts_with('['));
        assert_eq!(&line[9..], "] Fetching");
    }
}
