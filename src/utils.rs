//! Miscellaneous utility functions for mdbrowse.
//!
//! - [cli]: command line parsing for the `mdb` binary.
//! - [helpers]: home directory handling and start directory resolution.
//! - [logging]: installation of the tracing subscriber.

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{expand_home_path, get_home, resolve_start_directory, shorten_home_path};
