//! The metadata helper process boundary.
//!
//! Directory listings come from an external helper (`mditems` by default) which is
//! invoked as `<helper> <directory> [--sort <mode>]` and prints a JSON array of
//! [Entry] records on stdout.
//!
//! The [EntryLister] trait is the seam the rest of mdbrowse depends on, so sessions
//! and tests can swap the real [HelperProcess] for in-memory listers.
//!
//! Only a failed invocation (the helper could not be spawned, or exited non-zero)
//! is an error. Empty or malformed output degrades to an empty listing.

use crate::core::entry::Entry;
use crate::core::sort::SortMode;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Default program name of the metadata helper.
pub const DEFAULT_HELPER: &str = "mditems";

/// Errors raised while invoking the metadata helper.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("metadata helper '{program}' could not be started: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("metadata helper not found in PATH: {0}")]
    NotFound(String),

    #[error("metadata helper exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Source of directory listings.
#[async_trait]
pub trait EntryLister: Send + Sync {
    /// Lists the entries of `dir`. `sort` is a hint passed on to the helper; callers
    /// still sort the returned batch themselves.
    async fn list(&self, dir: &Path, sort: Option<SortMode>) -> Result<Vec<Entry>, ListError>;
}

/// [EntryLister] that runs the external metadata helper.
#[derive(Debug, Clone)]
pub struct HelperProcess {
    program: PathBuf,
}

impl HelperProcess {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        HelperProcess {
            program: program.into(),
        }
    }

    /// Resolves the helper. Bare program names are looked up in `PATH`, anything
    /// containing a path separator is used as given.
    pub fn locate(program: &str) -> Result<Self, ListError> {
        let candidate = Path::new(program);
        if candidate.components().count() > 1 {
            return Ok(Self::new(candidate));
        }
        which::which(program)
            .map(Self::new)
            .map_err(|_| ListError::NotFound(program.to_string()))
    }

    #[inline]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn args(dir: &Path, sort: Option<SortMode>) -> Vec<OsString> {
        let mut args = vec![dir.as_os_str().to_os_string()];
        if let Some(mode) = sort {
            args.push(OsString::from("--sort"));
            args.push(OsString::from(mode.token()));
        }
        args
    }
}

#[async_trait]
impl EntryLister for HelperProcess {
    async fn list(&self, dir: &Path, sort: Option<SortMode>) -> Result<Vec<Entry>, ListError> {
        let output = Command::new(&self.program)
            .args(Self::args(dir, sort))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ListError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ListError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_output(&stdout))
    }
}

/// Decodes the helper's stdout. Blank output is an empty listing, and so is
/// malformed JSON, which is logged.
pub fn parse_output(stdout: &str) -> Vec<Entry> {
    if stdout.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<Entry>>(stdout) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to parse metadata helper output: {}", e);
            Vec::new()
        }
    }
}

/// Unit tests for proc
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_blank_output() {
        assert!(parse_output("").is_empty());
        assert!(parse_output("  \n\t").is_empty());
    }

    #[test]
    fn parse_malformed_output() {
        assert!(parse_output("[{\"type\": \"file\",").is_empty());
        assert!(parse_output("{\"not\": \"an array\"}").is_empty());
    }

    #[test]
    fn parse_valid_output() {
        let out = r#"[
            {"type": "directory", "name": "src", "path": "/p/src", "userTags": []},
            {"type": "file", "name": "a.rs", "path": "/p/a.rs", "size": 12, "userTags": []}
        ]"#;
        let entries = parse_output(out);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_dir());
        assert_eq!(entries[1].size(), Some(12.0));
    }

    #[test]
    fn sort_flag_is_forwarded() {
        let args = HelperProcess::args(Path::new("/tmp"), Some(SortMode::LastOpened));
        assert_eq!(args, vec!["/tmp", "--sort", "last-opened-asc"]);
        assert_eq!(HelperProcess::args(Path::new("/tmp"), None), vec!["/tmp"]);
    }

    #[test]
    fn locate_keeps_explicit_paths() -> Result<(), Box<dyn std::error::Error>> {
        let helper = HelperProcess::locate("./bin/mditems")?;
        assert_eq!(helper.program(), Path::new("./bin/mditems"));
        assert!(matches!(
            HelperProcess::locate("mdbrowse-helper-that-does-not-exist"),
            Err(ListError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn spawn_failure_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let helper = HelperProcess::new(dir.path().join("missing-helper"));
        let result = helper.list(dir.path(), None).await;
        assert!(matches!(result, Err(ListError::Spawn { .. })));
        Ok(())
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, body: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("helper.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body))?;
        let mut perms = std::fs::metadata(&path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms)?;
        Ok(path)
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn helper_output_is_decoded() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let script = write_script(
            dir.path(),
            r#"echo "[{\"type\":\"file\",\"name\":\"$3\",\"path\":\"$1/x\",\"userTags\":[]}]""#,
        )?;

        let entries = HelperProcess::new(script)
            .list(Path::new("/data"), Some(SortMode::Size))
            .await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "size-asc");
        assert_eq!(entries[0].path(), "/data/x");
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let script = write_script(dir.path(), "echo 'read_dir failed: denied' >&2\nexit 3")?;

        let result = HelperProcess::new(script).list(dir.path(), None).await;
        match result {
            Err(ListError::Failed { status, stderr }) => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "read_dir failed: denied");
            }
            other => return Err(format!("unexpected result: {:?}", other).into()),
        }
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn garbage_output_is_an_empty_listing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let script = write_script(dir.path(), "echo 'not json'")?;
        let entries = HelperProcess::new(script).list(dir.path(), None).await?;
        assert!(entries.is_empty());
        Ok(())
    }
}
