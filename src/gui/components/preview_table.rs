// src/gui/components/preview_table.rs
//
// Editable grid over `App::edits`, same columns as the spreadsheet.
// Changes stay in memory until "Save changes".

use eframe::egui::{self, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::{
    export,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    if !app.last_run.as_ref().is_some_and(|r| r.result.is_ok()) {
        ui.weak("No rows yet");
        return;
    }

    toolbar(ui, app);

    let headers = export::headers();
    let edits = &mut app.edits;
    let mut changed = false;
    let mut delete: Option<usize> = None;

    egui::ScrollArea::horizontal().id_salt("preview_hscroll").show(ui, |ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .min_scrolled_height(0.0)
            .id_salt("preview_table")
            .column(Column::exact(24.0));
        for _ in &headers {
            table = table.column(Column::initial(120.0).resizable(true).clip(true).at_least(30.0));
        }

        table
            .header(22.0, |mut header| {
                header.col(|_| {});
                for h in &headers {
                    header.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(22.0, edits.len(), |mut row| {
                    let i = row.index();
                    let Some(cells) = edits.get_mut(i) else { return };
                    row.col(|ui| {
                        if ui.small_button("✕").on_hover_text("Delete row").clicked() {
                            delete = Some(i);
                        }
                    });
                    for cell in cells.iter_mut() {
                        row.col(|ui| {
                            let edit = egui::TextEdit::singleline(cell).desired_width(f32::INFINITY);
                            changed |= ui.add(edit).changed();
                        });
                    }
                });
            });
    });

    if let Some(i) = delete {
        edits.remove(i);
        changed = true;
    }
    if changed {
        app.edits_dirty = true;
    }
}

fn toolbar(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label(format!("{} rows", app.edits.len()));
        if ui.button("Add row").clicked() {
            actions::add_row(app);
        }

        let can_save = app.edits_dirty && !app.is_running();
        if ui.add_enabled(can_save, egui::Button::new("Save changes")).clicked() {
            actions::save_edits(app);
        }
        if ui.add_enabled(app.edits_dirty, egui::Button::new("Discard")).clicked() {
            actions::discard_edits(app);
        }
        if app.edits_dirty {
            ui.weak("Unsaved edits");
        }
    });
}
