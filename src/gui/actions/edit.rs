// src/gui/actions/edit.rs
use crate::{
    export,
    gui::app::App,
    runner::{self, JobRun},
};

/// Write the editor contents back to the last job's sheet, manifest and archive.
pub fn save_edits(app: &mut App) {
    if app.is_running() {
        logd!("Edit: Save clicked while a job is running");
        return;
    }
    let rows = app.edited_rows();
    let n = rows.len();

    let saved = match app.last_run.as_mut() {
        Some(JobRun { job, result: Ok(artifacts) }) => {
            runner::save_edits(job, artifacts, rows).map(|_| artifacts.spreadsheet.clone())
        }
        _ => {
            app.push_log("Nothing to save");
            return;
        }
    };

    match saved {
        Ok(sheet) => {
            app.push_log(format!("Saved {n} rows to {}", sheet.display()));
            app.load_edits();
        }
        Err(e) => {
            loge!("Edit: Save failed: {}", e);
            app.push_log(format!("ERROR: {e}"));
        }
    }
}

pub fn discard_edits(app: &mut App) {
    app.load_edits();
    logd!("Edit: Discarded");
}

pub fn add_row(app: &mut App) {
    app.edits.push(vec![String::new(); export::headers().len()]);
    app.edits_dirty = true;
}
