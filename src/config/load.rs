//! The main config loading module for mdbrowse.
//!
//! Handles loading and deserializing settings from `mdbrowse.toml`.
//!
//! Provides and manages the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//!
//! Also implements default config initialization when `mdbrowse.toml` is not present.

use crate::config::{Display, General};
use crate::core::tree::FolderTreeOptions;
use crate::utils::get_home;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Raw configuration as read from the toml file.
/// Every table is optional and falls back to its defaults.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    tree: FolderTreeOptions,
    display: Display,
}

/// Main configuration struct for mdbrowse
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    general: General,
    tree: FolderTreeOptions,
    display: Display,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            tree: raw.tree,
            display: raw.display,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from `path`, falling back to defaults like [Config::load].
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    "No config file at {}, using internal defaults (tip: run 'mdb --init')",
                    path.display()
                );
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("Could not read config {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::parse(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Error parsing config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses the contents of a `mdbrowse.toml` file.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn tree(&self) -> FolderTreeOptions {
        self.tree
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Determine the default configuration file path.
    /// Checks the MDBROWSE_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/mdbrowse/mdbrowse.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("MDBROWSE_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("mdbrowse/mdbrowse.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/mdbrowse/mdbrowse.toml");
        }
        PathBuf::from("mdbrowse.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_toml = r##"# mdbrowse.toml - default configuration for mdbrowse

# Note:
# Commented values are the internal defaults of mdbrowse

[general]
# start_directory = "~"
# One of: name-asc, kind-asc, last-opened-asc, added-asc,
#         modified-asc, created-asc, size-asc, tags-asc
sort_mode = "name-asc"
# helper = "mditems"

# Folder tree previews of directories
[tree]
# max_depth = 2
# max_nodes = 200
# skip_dotfiles = true
# max_line_chars = 70

# Accessories shown next to each entry
[display]
# show_hidden = true
# show_last_used = false
# show_tags = true
# show_size = true
# show_attr_changed = false
# show_created = false
# show_content_changed = false
"##;

        fs::write(path, default_toml)?;
        tracing::info!("Default config generated at {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sort::SortMode;
    use tempfile::tempdir;

    #[test]
    fn empty_config_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse("")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.general().helper(), "mditems");
        assert_eq!(config.general().sort_mode(), SortMode::Name);
        assert_eq!(config.tree(), FolderTreeOptions::default());
        Ok(())
    }

    #[test]
    fn partial_tables_keep_other_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse(
            r#"
            [general]
            sort_mode = "tags-asc"

            [tree]
            max_depth = 4

            [display]
            show_created = true
            "#,
        )?;

        assert_eq!(config.general().sort_mode(), SortMode::Tags);
        assert_eq!(config.general().helper(), "mditems");
        assert_eq!(config.tree().max_depth, 4);
        assert_eq!(config.tree().max_nodes, 200);

        let toggles = config.display().accessory_toggles();
        assert!(toggles.show_created);
        assert!(toggles.show_hidden);
        assert!(!toggles.show_last_used);
        Ok(())
    }

    #[test]
    fn unknown_sort_mode_is_rejected() {
        assert!(Config::parse("[general]\nsort_mode = \"size-desc\"").is_err());
    }

    #[test]
    fn invalid_or_missing_files_fall_back() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[general\nsort_mode = ")?;

        assert_eq!(Config::load_from(&bad), Config::default());
        assert_eq!(
            Config::load_from(&dir.path().join("missing.toml")),
            Config::default()
        );
        Ok(())
    }

    #[test]
    fn generated_default_parses_and_is_not_overwritten() -> Result<(), Box<dyn std::error::Error>>
    {
        let dir = tempdir()?;
        let path = dir.path().join("nested/mdbrowse.toml");

        Config::generate_default(&path)?;
        assert_eq!(Config::load_from(&path), Config::default());

        let err = Config::generate_default(&path).err().ok_or("overwrite allowed")?;
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }
}
