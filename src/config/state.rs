// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Contents of the URL field
    pub url_text: String,

    /// Output root as typed; mapped into ExportOptions when a job starts
    pub out_root_text: String,

    /// Optional proxy as typed; empty means none
    pub proxy_text: String,

    pub window_w: u32,
    pub window_h: u32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            url_text: s!(),
            out_root_text: s!(crate::config::consts::DEFAULT_OUT_DIR),
            proxy_text: s!(),
            window_w: 1100,
            window_h: 700,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            options: AppOptions::default(),
            gui: GuiState::default(),
        }
    }
}

impl AppState {
    /// Mirror text fields → options before a job starts.
    pub fn sync_text_into_options(&mut self) {
        let root = self.gui.out_root_text.trim();
        if !root.is_empty() {
            self.options.export.out_root = root.into();
        }
        let proxy = self.gui.proxy_text.trim();
        self.options.scrape.proxy = if proxy.is_empty() { None } else { Some(s!(proxy)) };
    }
}
