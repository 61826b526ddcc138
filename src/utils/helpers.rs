//! Helpers for mdbrowse.
//!
//! Home directory handling shared by the config loader and the binary:
//! - Expanding a leading `~` in user supplied paths
//! - Displaying home directories as "~" in file paths
//! - Resolving the configured start directory

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// The current user's home directory.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` or `~/` to the home directory. Other paths are returned as is.
pub fn expand_home_path(path: &str) -> PathBuf {
    if path == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Util function to shorten home directory to ~.
/// Used for the path line above listings.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        } else {
            let mut short = stripped.display().to_string();
            if short.starts_with(MAIN_SEPARATOR) {
                short.remove(0);
            }
            return format!("~{}{}", MAIN_SEPARATOR, short);
        }
    }
    path.display().to_string()
}

/// Resolves the directory to open when none is given on the command line.
///
/// The configured directory wins if it exists. Otherwise the home directory,
/// and as a last resort the current directory.
pub fn resolve_start_directory(configured: Option<&str>) -> PathBuf {
    if let Some(configured) = configured.map(str::trim).filter(|c| !c.is_empty()) {
        let candidate = expand_home_path(configured);
        if candidate.is_dir() {
            return candidate;
        }
        tracing::warn!(
            "start_directory {} is not a directory, falling back to home",
            candidate.display()
        );
    }
    get_home().unwrap_or_else(|| PathBuf::from("."))
}

/// Helper utils unit tests
#[cfg(test)]
mod tests {
    use super::*;

    use std::error;
    use tempfile::tempdir;

    #[test]
    fn test_expand_home_path() {
        assert_eq!(expand_home_path("/etc/hosts"), PathBuf::from("/etc/hosts"));
        assert_eq!(expand_home_path("relative/~"), PathBuf::from("relative/~"));
        if let Some(home) = get_home() {
            assert_eq!(expand_home_path("~"), home);
            assert_eq!(expand_home_path("~/docs"), home.join("docs"));
        }
    }

    #[test]
    fn test_shorten_home_path() {
        if let Some(home) = get_home() {
            assert_eq!(shorten_home_path(&home), "~");
            assert_eq!(
                shorten_home_path(home.join("notes")),
                format!("~{}notes", MAIN_SEPARATOR)
            );
        }
    }

    #[test]
    fn test_existing_start_directory_is_used() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let configured = dir.path().to_string_lossy().into_owned();
        assert_eq!(resolve_start_directory(Some(&configured)), dir.path());
        Ok(())
    }

    #[test]
    fn test_missing_start_directory_falls_back() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let missing = dir.path().join("gone").to_string_lossy().into_owned();
        let fallback = get_home().unwrap_or_else(|| PathBuf::from("."));

        assert_eq!(resolve_start_directory(Some(&missing)), fallback);
        assert_eq!(resolve_start_directory(Some("  ")), fallback);
        assert_eq!(resolve_start_directory(None), fallback);
        Ok(())
    }
}
