// src/gui/app.rs
use std::{
    error::Error,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use eframe::egui;

use crate::{
    config::state::AppState,
    export,
    job::JobStatus,
    merge::MergedRow,
    runner::JobRun,
};

use super::{
    components,
    progress::{stamp, GuiEvent},
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Menu Scraper",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // visible log, newest last
    pub logs: Vec<String>,
    pub percent: u8,
    pub status: Option<JobStatus>,

    // Some while a job thread is alive
    pub rx: Option<Receiver<GuiEvent>>,

    pub last_run: Option<JobRun>,

    // editable copy of the rows, one cell per spreadsheet column
    pub edits: Vec<Vec<String>>,
    pub edits_dirty: bool,
}

impl App {
    pub fn new(state: AppState) -> Self {
        logf!("Init: out_root={}", state.options.export.out_root.display());
        Self {
            state,
            logs: Vec::new(),
            percent: 0,
            status: None,
            rx: None,
            last_run: None,
            edits: Vec::new(),
            edits_dirty: false,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn is_running(&self) -> bool { self.rx.is_some() }

    #[inline]
    pub fn push_log<T: AsRef<str>>(&mut self, msg: T) {
        self.logs.push(stamp(msg.as_ref()));
    }

    /// Merged rows of the last successful job.
    pub fn rows(&self) -> &[MergedRow] {
        match self.last_run.as_ref().map(|r| &r.result) {
            Some(Ok(a)) => &a.rows,
            _ => &[],
        }
    }

    /// Refill the editor from the saved rows, dropping unsaved edits.
    pub fn load_edits(&mut self) {
        self.edits = self
            .rows()
            .iter()
            .map(|r| export::to_cells(r).into_iter().map(|c| s!(c)).collect())
            .collect();
        self.edits_dirty = false;
    }

    /// Editor contents as rows. Rows with no name on either side are dropped.
    pub fn edited_rows(&self) -> Vec<MergedRow> {
        self.edits
            .iter()
            .map(|cells| export::from_cells(cells))
            .filter(|r| r.english.is_some() || r.arabic.is_some())
            .collect()
    }

    pub fn reset_for_job(&mut self, rx: Receiver<GuiEvent>) {
        self.logs.clear();
        self.percent = 0;
        self.status = Some(JobStatus::Pending);
        self.last_run = None;
        self.edits.clear();
        self.edits_dirty = false;
        self.rx = Some(rx);
    }

    /// Drain whatever the job thread sent since the last frame.
    pub fn poll_events(&mut self) {
        let Some(rx) = &self.rx else { return };

        let mut events = Vec::new();
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(ev) => events.push(ev),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        for ev in events {
            self.apply(ev);
        }
        if disconnected && self.rx.is_some() {
            loge!("UI: Job thread went away without a result");
            self.push_log("ERROR: job stopped unexpectedly");
            self.rx = None;
        }
    }

    fn apply(&mut self, ev: GuiEvent) {
        match ev {
            GuiEvent::Log { percent, line } => {
                self.percent = self.percent.max(percent);
                self.logs.push(line);
            }
            GuiEvent::Status(s) => self.status = Some(s),
            GuiEvent::Finished(run) => {
                logf!("UI: Job finished status={:?}", run.job.status());
                self.status = Some(run.job.status());
                self.last_run = Some(*run);
                self.rx = None;
                self.load_edits();
            }
            GuiEvent::Aborted(msg) => {
                self.push_log(format!("ERROR: {msg}"));
                self.status = None;
                self.rx = None;
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        egui::SidePanel::left("settings")
            .resizable(false)
            .show(ctx, |ui| {
                components::settings_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::url_bar::draw(ui, self);

            ui.separator();

            components::log_view::draw(ui, self);

            ui.separator();

            components::preview_table::draw(ui, self);
        });

        if self.is_running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use crate::{
        job::Job,
        menu::MenuItem,
        merge::{Alignment, MergedRow},
        runner::{JobArtifacts, JobRun},
    };

    fn item(name: &str) -> MenuItem {
        MenuItem { id: None, category: s!("Mains"), name: s!(name), description: None, price: Some(s!("5")), image_url: None }
    }

    fn finished(rows: Vec<MergedRow>) -> GuiEvent {
        let artifacts = JobArtifacts {
            rows,
            alignment: Alignment::ByPosition,
            english_items: 2,
            arabic_items: 1,
            spreadsheet: "out/menu_data.csv".into(),
            images: Default::default(),
            archive: None,
        };
        let run = JobRun { job: Job::new("https://menus.test/restaurant/1/x", "out"), result: Ok(artifacts) };
        GuiEvent::Finished(Box::new(run))
    }

    #[test]
    fn events_update_log_and_percent() {
        let mut app = App::new(AppState::default());
        let (tx, rx) = mpsc::channel();
        app.reset_for_job(rx);

        tx.send(GuiEvent::Status(JobStatus::Fetching)).unwrap();
        tx.send(GuiEvent::Log { percent: 25, line: s!("a") }).unwrap();
        tx.send(GuiEvent::Log { percent: 10, line: s!("b") }).unwrap();
        app.poll_events();

        assert_eq!(app.status, Some(JobStatus::Fetching));
        assert_eq!(app.percent, 25);
        assert_eq!(app.logs, vec![s!("a"), s!("b")]);
        assert!(app.is_running());
    }

    #[test]
    fn dropped_sender_ends_the_job() {
        let mut app = App::new(AppState::default());
        let (tx, rx) = mpsc::channel::<GuiEvent>();
        app.reset_for_job(rx);
        drop(tx);
        app.poll_events();
        assert!(!app.is_running());
        assert_eq!(app.logs.len(), 1);
    }

    #[test]
    fn aborted_clears_running() {
        let mut app = App::new(AppState::default());
        let (tx, rx) = mpsc::channel();
        app.reset_for_job(rx);
        tx.send(GuiEvent::Aborted(s!("bad proxy"))).unwrap();
        app.poll_events();
        assert!(!app.is_running());
        assert!(app.logs[0].ends_with("ERROR: bad proxy"));
        assert!(app.rows().is_empty());
    }

    #[test]
    fn finished_job_fills_the_editor() {
        let mut app = App::new(AppState::default());
        let (tx, rx) = mpsc::channel();
        app.reset_for_job(rx);
        let rows = vec![
            MergedRow { english: Some(item("Kebab")), arabic: Some(item("كباب")) },
            MergedRow { english: Some(item("Rice")), arabic: None },
        ];
        tx.send(finished(rows.clone())).unwrap();
        app.poll_events();

        assert_eq!(app.edits.len(), 2);
        assert_eq!(app.edits[0][4], "Kebab");
        assert_eq!(app.edits[0][5], "كباب");
        assert!(!app.edits_dirty);
        assert_eq!(app.edited_rows(), rows);
    }

    #[test]
    fn edited_cells_become_rows_and_blank_rows_drop() {
        let mut app = App::new(AppState::default());
        let (tx, rx) = mpsc::channel();
        app.reset_for_job(rx);
        tx.send(finished(vec![MergedRow { english: Some(item("Kebab")), arabic: None }])).unwrap();
        app.poll_events();

        app.edits[0][4] = s!("Lamb Kebab");
        app.edits[0][8] = s!("12");
        app.edits.push(vec![String::new(); export::headers().len()]);

        let rows = app.edited_rows();
        assert_eq!(rows.len(), 1);
        let en = rows[0].english.as_ref().unwrap();
        assert_eq!(en.name, "Lamb Kebab");
        assert_eq!(en.price.as_deref(), Some("12"));

        app.load_edits();
        assert_eq!(app.edits[0][4], "Kebab");
    }
}
