//! Filesystem access for mdbrowse.
//!
//! The folder tree renderer and the file previewer never touch `std::fs` directly.
//! They go through the [FileSystem] trait, so tests can run against in-memory
//! fixtures and callers can plug in other backends.
//!
//! [LocalFs] is the real implementation, backed by `tokio::fs`.

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use std::io;
use std::path::Path;

/// A single child of a directory, as needed by the tree renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirChild {
    name: String,
    is_dir: bool,
}

impl DirChild {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        DirChild {
            name: name.into(),
            is_dir,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    #[inline]
    pub fn is_dotfile(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Async filesystem capability.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Lists the direct children of `path` together with their type.
    ///
    /// Symlinks are reported with their own type and never followed.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirChild>>;

    /// Reads at most `max_bytes` from the start of the file.
    async fn read_file(&self, path: &Path, max_bytes: u64) -> io::Result<Vec<u8>>;

    /// Size of the file in bytes.
    async fn file_len(&self, path: &Path) -> io::Result<u64>;
}

/// [FileSystem] backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

#[async_trait]
impl FileSystem for LocalFs {
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirChild>> {
        let mut children = Vec::with_capacity(64);
        let mut dir = tokio::fs::read_dir(path).await?;

        while let Some(entry) = dir.next_entry().await? {
            let ft = match entry.file_type().await {
                Ok(ft) => ft,
                Err(_) => continue,
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            children.push(DirChild::new(name, ft.is_dir()));
        }
        Ok(children)
    }

    async fn read_file(&self, path: &Path, max_bytes: u64) -> io::Result<Vec<u8>> {
        let file = tokio::fs::File::open(path).await?;
        let mut buf = Vec::new();
        file.take(max_bytes).read_to_end(&mut buf).await?;
        Ok(buf)
    }

    async fn file_len(&self, path: &Path) -> io::Result<u64> {
        Ok(tokio::fs::metadata(path).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    #[tokio::test]
    async fn local_read_dir_reports_types() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("sub"))?;
        File::create(tmp.path().join("file.txt"))?;

        let mut children = LocalFs.read_dir(tmp.path()).await?;
        children.sort_by(|a, b| a.name().cmp(b.name()));

        assert_eq!(
            children,
            vec![DirChild::new("file.txt", false), DirChild::new("sub", true)]
        );
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinked_dirs_are_not_followed() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("real"))?;
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link"))?;

        let children = LocalFs.read_dir(tmp.path()).await?;
        let link = children
            .iter()
            .find(|c| c.name() == "link")
            .ok_or("link missing from listing")?;
        assert!(!link.is_dir());
        Ok(())
    }

    #[tokio::test]
    async fn read_file_respects_budget() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("data.txt");
        let mut file = File::create(&path)?;
        write!(file, "0123456789")?;

        let bytes = LocalFs.read_file(&path, 4).await?;
        assert_eq!(bytes, b"0123");
        assert_eq!(LocalFs.file_len(&path).await?, 10);
        Ok(())
    }

    #[tokio::test]
    async fn read_dir_missing_path_errors() {
        let result = LocalFs.read_dir(Path::new("/path/does/not/exist")).await;
        assert!(result.is_err());
    }
}
