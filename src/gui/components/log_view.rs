// src/gui/components/log_view.rs
use eframe::egui;

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ctx = ui.ctx().clone();

    ui.horizontal(|ui| {
        ui.label("Log");
        if ui.small_button("Copy").clicked() {
            actions::copy_log(app, &ctx);
        }
    });

    egui::ScrollArea::vertical()
        .id_salt("job_log")
        .max_height(180.0)
        .auto_shrink([false, true])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in &app.logs {
                let text = egui::RichText::new(line).monospace();
                if line.contains("ERROR") {
                    ui.colored_label(ui.visuals().error_fg_color, text);
                } else if line.contains("WARNING") {
                    ui.colored_label(ui.visuals().warn_fg_color, text);
                } else {
                    ui.label(text);
                }
            }
        });
}
