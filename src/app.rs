//! Browsing session state for mdbrowse.
//!
//! - [browser]: one directory at a time, fetched through the helper and sorted locally.
//! - [preview]: request tracking for asynchronously rendered previews.

pub mod browser;
pub mod preview;

pub use browser::Browser;
pub use preview::PreviewState;
