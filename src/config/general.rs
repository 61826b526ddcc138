//! The general configuration settings for mdbrowse.
//!
//! This module defines the [General] struct for deserializing
//! the `[general]` table of the mdbrowse.toml configuration file.

use crate::core::proc::DEFAULT_HELPER;
use crate::core::sort::SortMode;
use crate::utils::resolve_start_directory;

use serde::Deserialize;

use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct General {
    start_directory: Option<String>,
    sort_mode: SortMode,
    helper: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            start_directory: None,
            sort_mode: SortMode::default(),
            helper: DEFAULT_HELPER.to_string(),
        }
    }
}

impl General {
    #[inline]
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Program name or path of the metadata helper.
    #[inline]
    pub fn helper(&self) -> &str {
        &self.helper
    }

    #[inline]
    pub fn start_directory(&self) -> Option<&str> {
        self.start_directory.as_deref()
    }

    /// The configured start directory if it exists, else the home directory.
    pub fn resolved_start_directory(&self) -> PathBuf {
        resolve_start_directory(self.start_directory.as_deref())
    }
}
