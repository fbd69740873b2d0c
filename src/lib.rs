// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod menu;
pub mod specs;

pub mod archive;
pub mod csv;
pub mod export;
pub mod file;
pub mod gui;
pub mod images;
pub mod job;
pub mod merge;
pub mod progress;
pub mod runner;
