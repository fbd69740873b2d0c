// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy_rows, copy_log, scrape, save_edits, ...}.

mod copy;    // src/gui/actions/copy.rs
mod edit;    // src/gui/actions/edit.rs
mod scrape;  // src/gui/actions/scrape.rs

pub use copy::{copy_log, copy_rows};
pub use edit::{add_row, discard_edits, save_edits};
pub use scrape::scrape;
