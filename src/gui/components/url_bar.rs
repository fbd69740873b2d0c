// src/gui/components/url_bar.rs
//
// URL entry, start button, progress bar and the result summary.

use eframe::egui;

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ctx = ui.ctx().clone();
    let running = app.is_running();

    ui.heading("Restaurant menu");
    ui.horizontal(|ui| {
        ui.label("URL:");
        let edit = ui.add_enabled(
            !running,
            egui::TextEdit::singleline(&mut app.state.gui.url_text)
                .hint_text("https://…/restaurant/…")
                .desired_width(ui.available_width() - 90.0),
        );
        let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let start = ui.add_enabled(!running, egui::Button::new("Scrape"));
        if start.clicked() || (enter && !running) {
            actions::scrape(app, &ctx);
        }
    });

    let label = app.status.map(|s| s.label()).unwrap_or("Idle");
    ui.add(
        egui::ProgressBar::new(f32::from(app.percent) / 100.0)
            .text(format!("{} · {}%", label, app.percent)),
    );

    let outcome = match app.last_run.as_ref() {
        None => return,
        Some(run) => match (&run.result, run.job.failure()) {
            (Ok(a), _) => Outcome::Done {
                summary: format!(
                    "{} rows · {} of {} images",
                    a.rows.len(),
                    a.images.succeeded(),
                    a.images.total()
                ),
                sheet: a.spreadsheet.display().to_string(),
                archive: a.archive.as_ref().map(|p| p.display().to_string()),
            },
            (Err(_), Some(f)) => Outcome::Failed(format!("Failed during {}: {}", f.stage.label(), f.message)),
            (Err(e), None) => Outcome::Failed(e.describe()),
        },
    };

    match outcome {
        Outcome::Done { summary, sheet, archive } => {
            ui.horizontal(|ui| {
                ui.label(summary);
                if ui.button("Copy rows").clicked() {
                    actions::copy_rows(app, &ctx);
                }
            });
            path_line(ui, "Sheet:", &sheet);
            if let Some(zip) = archive {
                path_line(ui, "Archive:", &zip);
            }
        }
        Outcome::Failed(msg) => {
            ui.colored_label(ui.visuals().error_fg_color, msg);
        }
    }
}

enum Outcome {
    Done { summary: String, sheet: String, archive: Option<String> },
    Failed(String),
}

fn path_line(ui: &mut egui::Ui, label: &str, path: &str) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.monospace(path);
        if ui.small_button("Copy path").clicked() {
            ui.ctx().copy_text(s!(path));
        }
    });
}
