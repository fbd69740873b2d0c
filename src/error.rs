// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

use crate::job::JobStatus;
use crate::menu::Language;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no menuData object found in page")]
    MissingMenuData,

    #[error("menuData object is never closed")]
    Unterminated,

    #[error("menuData is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("menuData contains no named items")]
    NoItems,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot write {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("cannot build archive {}: {source}", path.display())]
    Archive { path: PathBuf, source: zip::result::ZipError },

    #[error("cannot write manifest {}: {source}", path.display())]
    Manifest { path: PathBuf, source: serde_json::Error },
}

impl ExportError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Io { path: path.into(), source }
    }
}

/// Per-item failure; never aborts a job.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("empty response body")]
    Empty,

    #[error("cannot save {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

#[derive(Error, Debug)]
pub enum JobError {
    #[error("invalid options: {0}")]
    Options(String),

    #[error("fetching {language} menu failed")]
    Fetch {
        language: Language,
        #[source]
        source: FetchError,
    },

    #[error("parsing {language} menu failed")]
    Parse {
        language: Language,
        #[source]
        source: ParseError,
    },

    #[error("export failed")]
    Export(#[from] ExportError),

    #[error("cannot create image directory {}", path.display())]
    ImageDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("illegal job transition {from:?} -> {to:?}")]
    Transition { from: JobStatus, to: JobStatus },
}

impl JobError {
    /// One line for the UI: message plus the underlying cause.
    pub fn describe(&self) -> String {
        match std::error::Error::source(self) {
            Some(cause) => format!("{self}: {cause}"),
            None => self.to_string(),
        }
    }
}
