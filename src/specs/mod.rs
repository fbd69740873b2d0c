// src/specs/mod.rs
//! # Page “specs”
//!
//! Page-specific extraction rules: *where the ground truth lives in the HTML* and
//! *how to pull it out tolerantly*.
//!
//! ## What lives here
//! - **Pure parsing** of fetched pages into [`crate::menu::MenuRecordSet`]s.
//! - **Marker precedence** (quoted `"menuData"` key before the bare JS form).
//! - **Tolerant field mapping**: missing price/description/image stay unset; only a
//!   page with zero named items is an error.
//!
//! ## What does **not** live here
//! - **Networking** (`core::net`), **language alignment** (`merge`), **export** (`export`).
//!
//! ## Testing notes
//! - Specs are testable **offline** against saved pages (`tests/fixtures/*.html`).
pub mod menu_data;
