// src/gui/components/mod.rs
pub mod log_view;
pub mod preview_table;
pub mod settings_panel;
pub mod url_bar;
