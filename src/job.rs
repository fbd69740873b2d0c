// src/job.rs
use std::{io, path::PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    config::{consts::{IMAGES_SUBDIR, TIMESTAMP_FORMAT, UNKNOWN_RESTAURANT}, options::ExportOptions},
    core::url,
    error::JobError,
    file::create_unique_dir,
};

/// Forward-only lifecycle of a [`Job`]. `Failed` is reachable from any
/// non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum JobStatus {
    Pending,
    Fetching,
    Parsing,
    Merging,
    Exporting,
    DownloadingImages,
    Done,
    Failed,
}

impl JobStatus {
    pub fn next(self) -> Option<JobStatus> {
        use JobStatus::*;
        match self {
            Pending => Some(Fetching),
            Fetching => Some(Parsing),
            Parsing => Some(Merging),
            Merging => Some(Exporting),
            Exporting => Some(DownloadingImages),
            DownloadingImages => Some(Done),
            Done | Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Fetching => "Fetching",
            JobStatus::Parsing => "Parsing",
            JobStatus::Merging => "Merging",
            JobStatus::Exporting => "Exporting",
            JobStatus::DownloadingImages => "Downloading images",
            JobStatus::Done => "Done",
            JobStatus::Failed => "Failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    /// State the job was in when it failed.
    pub stage: JobStatus,
    pub message: String,
}

/// One scrape-merge-export run for a single URL.
#[derive(Clone, Debug, Serialize)]
pub struct Job {
    pub url: String,
    pub created_at: DateTime<Local>,
    /// `<out root>/<timestamp>_<restaurant>`; created when exporting starts.
    pub output_dir: PathBuf,
    // runtime only, kept out of the manifest
    #[serde(skip)]
    status: JobStatus,
    #[serde(skip)]
    failure: Option<JobFailure>,
}

impl Job {
    pub fn new(url: &str, out_root: impl Into<PathBuf>) -> Self {
        Self::new_at(url, out_root, Local::now())
    }

    pub fn new_at(url: &str, out_root: impl Into<PathBuf>, created_at: DateTime<Local>) -> Self {
        let restaurant = url::resolve(url)
            .map(|u| u.restaurant)
            .unwrap_or_else(|_| s!(UNKNOWN_RESTAURANT));
        let folder = format!("{}_{}", created_at.format(TIMESTAMP_FORMAT), restaurant);

        Self {
            url: s!(url.trim()),
            created_at,
            output_dir: out_root.into().join(folder),
            status: JobStatus::Pending,
            failure: None,
        }
    }

    pub fn status(&self) -> JobStatus { self.status }

    pub fn failure(&self) -> Option<&JobFailure> { self.failure.as_ref() }

    /// Move to the immediate successor state; anything else is rejected.
    pub fn advance(&mut self, to: JobStatus) -> Result<(), JobError> {
        if self.status.next() != Some(to) {
            return Err(JobError::Transition { from: self.status, to });
        }
        logd!("Job: {:?} → {:?}", self.status, to);
        self.status = to;
        Ok(())
    }

    /// Record the failure and stop. A terminal job is left untouched.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.failure = Some(JobFailure { stage: self.status, message: message.into() });
        self.status = JobStatus::Failed;
        true
    }

    /// Create the job folder. Another job holding the same name pushes this
    /// one to `<folder>_2`, `<folder>_3`, ...
    pub fn claim_output_dir(&mut self) -> io::Result<()> {
        self.output_dir = create_unique_dir(&self.output_dir)?;
        logd!("Job: output dir {}", self.output_dir.display());
        Ok(())
    }

    pub fn spreadsheet_path(&self, export: &ExportOptions) -> PathBuf {
        self.output_dir.join(export.sheet_file_name())
    }

    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join(IMAGES_SUBDIR)
    }

    /// Sibling of the job folder: `<folder>.zip`.
    pub fn archive_path(&self) -> PathBuf {
        let mut p = self.output_dir.clone().into_os_string();
        p.push(".zip");
        PathBuf::from(p)
    }
}
