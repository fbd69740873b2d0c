// src/gui/components/settings_panel.rs
//
// Left panel: every AppOptions knob. Locked while a job runs.

use eframe::egui;

use crate::{
    config::{
        consts::MAX_BATCH_SIZE,
        options::{ExportFormat, ImageNaming},
    },
    gui::app::App,
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Settings");
    ui.separator();

    let running = app.is_running();
    ui.add_enabled_ui(!running, |ui| {
        let opts = &mut app.state.options;

        ui.label("Languages");
        ui.checkbox(&mut opts.scrape.english, "English");
        ui.checkbox(&mut opts.scrape.arabic, "Arabic");
        if !opts.scrape.english && !opts.scrape.arabic {
            ui.colored_label(ui.visuals().warn_fg_color, "Pick at least one");
        }

        ui.separator();
        ui.label("Images");
        if ui.checkbox(&mut opts.images.enabled, "Download images").changed() {
            logf!("UI: images.enabled → {}", opts.images.enabled);
        }
        ui.add_enabled_ui(opts.images.enabled, |ui| {
            ui.add(egui::Slider::new(&mut opts.images.batch_size, 1..=MAX_BATCH_SIZE).text("Batch size"));

            let before = opts.images.naming;
            egui::ComboBox::from_label("Naming")
                .selected_text(opts.images.naming.label())
                .show_ui(ui, |ui| {
                    for n in ImageNaming::ALL {
                        ui.selectable_value(&mut opts.images.naming, n, n.label());
                    }
                });
            if opts.images.naming != before {
                logf!("UI: images.naming → {:?}", opts.images.naming);
            }
        });

        ui.separator();
        ui.label("Export");
        ui.horizontal(|ui| {
            ui.label("Format:");
            ui.selectable_value(&mut opts.export.format, ExportFormat::Csv, "CSV");
            ui.selectable_value(&mut opts.export.format, ExportFormat::Tsv, "TSV");
        });
        ui.checkbox(&mut opts.export.archive, "Zip the output folder");

        ui.label("Output folder:");
        ui.add(egui::TextEdit::singleline(&mut app.state.gui.out_root_text).font(egui::TextStyle::Monospace));

        ui.separator();
        ui.label("Network");
        ui.label("Proxy (optional):");
        ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.proxy_text)
                .hint_text("http://host:port")
                .font(egui::TextStyle::Monospace),
        );
        ui.add(
            egui::DragValue::new(&mut app.state.options.scrape.timeout_secs)
                .range(1..=120)
                .suffix(" s timeout"),
        );
    });
}
