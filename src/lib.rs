//! Internal library crate for mdbrowse.
//!
//! The shipped application is the `mdb` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.

pub mod app;
pub mod config;
pub mod core;
pub mod utils;
