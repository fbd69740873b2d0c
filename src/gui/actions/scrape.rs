// src/gui/actions/scrape.rs
use std::{sync::mpsc, thread};

use eframe::egui;

use crate::{
    core::net::HttpClient,
    gui::{app::App, progress::{ChannelProgress, GuiEvent}},
    job::Job,
    runner,
};

/// Start one job on a background thread. The UI picks up its events in
/// `App::poll_events`.
pub fn scrape(app: &mut App, ui_ctx: &egui::Context) {
    if app.is_running() {
        logd!("Scrape: Clicked while a job is running");
        return;
    }

    app.state.sync_text_into_options();
    let url = s!(app.state.gui.url_text.trim());
    if url.is_empty() {
        app.push_log("Please enter a restaurant URL");
        return;
    }
    if let Err(e) = app.state.options.validate() {
        app.push_log(format!("ERROR: {e}"));
        return;
    }

    let opts = app.state.options.clone();
    let (tx, rx) = mpsc::channel();
    app.reset_for_job(rx);
    logf!("Scrape: Begin url={} out={}", url, opts.export.out_root.display());

    let ctx = ui_ctx.clone();
    thread::spawn(move || {
        let fetcher = match HttpClient::new(&opts.scrape) {
            Ok(f) => f,
            Err(e) => {
                loge!("Scrape: Client setup failed: {}", e);
                let _ = tx.send(GuiEvent::Aborted(e.to_string()));
                ctx.request_repaint();
                return;
            }
        };

        let job = Job::new(&url, opts.export.out_root.clone());
        let mut prog = ChannelProgress::new(tx.clone(), ctx.clone());
        let run = runner::run(job, &opts, &fetcher, Some(&mut prog));

        let _ = tx.send(GuiEvent::Finished(Box::new(run)));
        ctx.request_repaint();
    });
}
