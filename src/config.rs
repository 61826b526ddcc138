//! Configuration for mdbrowse.
//!
//! Settings are read from `mdbrowse.toml` (see [Config::default_path]) and split into:
//! - [general]: start directory, default sort mode and the metadata helper.
//! - [display]: which accessories listing rows show.
//! - the `[tree]` table, deserialized straight into [FolderTreeOptions](crate::core::FolderTreeOptions).

pub mod display;
pub mod general;
pub mod load;

pub use display::Display;
pub use general::General;
pub use load::Config;
