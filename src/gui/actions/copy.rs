// src/gui/actions/copy.rs
use eframe::egui;

use crate::{csv::write_row, export, gui::app::App};

/// Merged rows of the last job → clipboard as TSV, header included.
pub fn copy_rows(app: &mut App, ui_ctx: &egui::Context) {
    let rows = app.rows();
    if rows.is_empty() {
        app.push_log("Nothing to copy");
        logd!("Copy: Clicked, but there are no rows");
        return;
    }

    let mut buf: Vec<u8> = Vec::new();
    let headers = export::headers();
    let written = write_row(&mut buf, headers.as_slice(), '\t').and_then(|_| {
        rows.iter()
            .try_for_each(|r| write_row(&mut buf, export::to_cells(r).as_slice(), '\t'))
    });
    if let Err(e) = written {
        loge!("Copy: Failed to build text: {}", e);
        return;
    }

    let n = rows.len();
    ui_ctx.copy_text(String::from_utf8_lossy(&buf).into_owned());
    logf!("Copy: rows={}", n);
    app.push_log(format!("Copied {n} rows to clipboard"));
}

pub fn copy_log(app: &mut App, ui_ctx: &egui::Context) {
    ui_ctx.copy_text(app.logs.join("\n"));
    logd!("Copy: log lines={}", app.logs.len());
}
