//! State of the preview panel in mdbrowse.
//!
//! Previews are rendered asynchronously, so a result can arrive after the user has
//! already moved on. Every request gets an id and only the latest one is applied.

use std::path::{Path, PathBuf};

/// Preview markdown plus the request tracking that guards it.
#[derive(Debug, Default)]
pub struct PreviewState {
    markdown: Option<String>,
    current_path: Option<PathBuf>,
    request_id: u64,
}

impl PreviewState {
    // Accessors

    #[inline]
    pub fn markdown(&self) -> Option<&str> {
        self.markdown.as_deref()
    }

    #[inline]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    #[inline]
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// Starts a request for `path` and returns its id.
    /// Any result still in flight for an older id will be ignored.
    pub fn prepare_new_request(&mut self, path: PathBuf) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.current_path = Some(path);
        self.markdown = None;
        self.request_id
    }

    /// Applies a finished preview. Only the latest request id is accepted.
    /// # Returns
    /// Whether the content was applied.
    pub fn update_content(&mut self, markdown: Option<String>, request_id: u64) -> bool {
        if request_id != self.request_id {
            return false;
        }
        self.markdown = markdown;
        true
    }

    pub fn clear(&mut self) {
        self.markdown = None;
        self.current_path = None;
    }
}
