//! A browsing session over one directory.
//!
//! [Browser] fetches a listing through an [EntryLister], keeps the raw batch and a
//! sorted view of it, and renders previews for the selected entry.
//! Changing the sort mode re-sorts the kept batch without asking the helper again.

use crate::app::preview::PreviewState;
use crate::core::entry::Entry;
use crate::core::fm::FileSystem;
use crate::core::preview::render_preview;
use crate::core::proc::{EntryLister, ListError};
use crate::core::sort::{SortMode, sort_md_items};
use crate::core::tree::FolderTreeOptions;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Browser {
    lister: Arc<dyn EntryLister>,
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    sort: SortMode,
    tree_options: FolderTreeOptions,
    raw: Vec<Entry>,
    entries: Vec<Entry>,
    preview: PreviewState,
}

impl Browser {
    pub fn new(lister: Arc<dyn EntryLister>, fs: Arc<dyn FileSystem>) -> Self {
        Browser {
            lister,
            fs,
            path: PathBuf::new(),
            sort: SortMode::default(),
            tree_options: FolderTreeOptions::default(),
            raw: Vec::new(),
            entries: Vec::new(),
            preview: PreviewState::default(),
        }
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_tree_options(mut self, options: FolderTreeOptions) -> Self {
        self.tree_options = options;
        self
    }

    // Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    /// The listing in the current sort order.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn preview_state(&self) -> &PreviewState {
        &self.preview
    }

    /// Loads `path` through the helper. On failure the previous listing is kept.
    pub async fn load(&mut self, path: impl Into<PathBuf>) -> Result<(), ListError> {
        let path = path.into();
        let raw = self.lister.list(&path, Some(self.sort)).await?;
        tracing::debug!("listed {} entries in {}", raw.len(), path.display());

        self.entries = sort_md_items(&raw, self.sort);
        self.raw = raw;
        self.path = path;
        self.preview.clear();
        Ok(())
    }

    /// Switches the sort mode, re-sorting the loaded batch in place of a refetch.
    pub fn set_sort(&mut self, sort: SortMode) {
        if sort == self.sort {
            return;
        }
        self.sort = sort;
        self.entries = sort_md_items(&self.raw, sort);
    }

    /// Renders the preview of the entry at `index` in the sorted view.
    /// # Returns
    /// The preview markdown, or None when the index is out of range or nothing can be shown.
    pub async fn preview(&mut self, index: usize) -> Option<&str> {
        let entry = self.entries.get(index)?.clone();
        let id = self.preview.prepare_new_request(PathBuf::from(entry.path()));
        let markdown = render_preview(self.fs.as_ref(), &entry, self.tree_options).await;
        self.preview.update_content(markdown, id);
        self.preview.markdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::EntryType;
    use crate::core::fm::LocalFs;

    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::tempdir;

    type Calls = Mutex<Vec<(PathBuf, Option<SortMode>)>>;

    struct FixedLister {
        entries: Vec<Entry>,
        calls: Calls,
    }

    impl FixedLister {
        fn new(entries: Vec<Entry>) -> Arc<Self> {
            Arc::new(FixedLister {
                entries,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(PathBuf, Option<SortMode>)> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl EntryLister for FixedLister {
        async fn list(&self, dir: &Path, sort: Option<SortMode>) -> Result<Vec<Entry>, ListError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((dir.to_path_buf(), sort));
            }
            Ok(self.entries.clone())
        }
    }

    struct FailingLister;

    #[async_trait]
    impl EntryLister for FailingLister {
        async fn list(&self, _: &Path, _: Option<SortMode>) -> Result<Vec<Entry>, ListError> {
            Err(ListError::NotFound("mditems".into()))
        }
    }

    fn names(browser: &Browser) -> Vec<&str> {
        browser.entries().iter().map(Entry::name).collect()
    }

    #[tokio::test]
    async fn load_sorts_and_forwards_mode() -> Result<(), Box<dyn std::error::Error>> {
        let lister = FixedLister::new(vec![
            Entry::new(EntryType::File, "b", "/d/b").with_size(1.0),
            Entry::new(EntryType::File, "a", "/d/a").with_size(5.0),
        ]);
        let mut browser = Browser::new(lister.clone(), Arc::new(LocalFs));

        browser.load("/d").await?;
        assert_eq!(names(&browser), vec!["a", "b"]);
        assert_eq!(browser.path(), Path::new("/d"));
        assert_eq!(lister.calls(), vec![(PathBuf::from("/d"), Some(SortMode::Name))]);

        browser.set_sort(SortMode::Size);
        assert_eq!(names(&browser), vec!["b", "a"]);
        assert_eq!(lister.calls().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_listing() -> Result<(), Box<dyn std::error::Error>> {
        let mut browser = Browser::new(Arc::new(FailingLister), Arc::new(LocalFs));
        let result = browser.load("/nowhere").await;

        assert!(matches!(result, Err(ListError::NotFound(_))));
        assert!(browser.entries().is_empty());
        assert_eq!(browser.path(), Path::new(""));
        Ok(())
    }

    #[tokio::test]
    async fn preview_renders_selected_entry() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        std::fs::write(dir.path().join("notes.md"), "# hi")?;
        std::fs::create_dir(dir.path().join("sub"))?;

        let root = dir.path().to_string_lossy().into_owned();
        let lister = FixedLister::new(vec![
            Entry::new(EntryType::File, "notes.md", format!("{}/notes.md", root)),
            Entry::new(EntryType::Directory, "sub", format!("{}/sub", root)),
        ]);
        let mut browser = Browser::new(lister, Arc::new(LocalFs));
        browser.load(dir.path()).await?;

        let md = browser.preview(0).await.map(str::to_string);
        assert_eq!(md.as_deref(), Some("```md\n# hi\n```"));

        let tree = browser.preview(1).await.ok_or("missing tree")?;
        assert!(tree.starts_with("```text\n[📁 0 • 📄 0]"));

        assert_eq!(browser.preview(7).await, None);
        Ok(())
    }
}
