use crate::job::{Job, JobStatus};

/// Lightweight progress reporting used by a running job.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Percentage estimate (0–100) plus a human-readable log line.
    fn report(&mut self, _percent: u8, _msg: &str) {}

    /// Called after every state transition (including Failed).
    fn status(&mut self, _status: JobStatus) {}

    /// Called at the end, successful or not.
    fn finish(&mut self, _job: &Job) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    pub percent: u8,
    pub message: String,
}

/// Keeps everything in memory.
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Vec<ProgressEvent>,
    pub statuses: Vec<JobStatus>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn report(&mut self, percent: u8, msg: &str) {
        self.events.push(ProgressEvent { percent, message: s!(msg) });
    }
    fn status(&mut self, status: JobStatus) {
        self.statuses.push(status);
    }
    fn finish(&mut self, _job: &Job) {
        self.finished = true;
    }
}
