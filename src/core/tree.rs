//! Bounded folder tree previews.
//!
//! [generate_folder_tree] walks a directory depth-first through a [FileSystem] and
//! renders a `tree`-style listing as a fenced markdown block:
//!
//! ```text
//! [📁 1 • 📄 2]
//! ├── 📁 src
//! │   └── 📄 main.rs
//! └── 📄 Cargo.toml
//! ```
//!
//! The walk is bounded twice: by depth ([FolderTreeOptions::max_depth]) and by a node
//! budget shared across the whole traversal ([FolderTreeOptions::max_nodes]).
//! Unreadable directories simply contribute no children.

use crate::core::fm::{DirChild, FileSystem};
use crate::core::sort::CollationKey;
use crate::core::truncate::truncate_name;

use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

pub const FOLDER_GLYPH: &str = "📁";
pub const FILE_GLYPH: &str = "📄";

const BRANCH_MID: &str = "├── ";
const BRANCH_LAST: &str = "└── ";
const INDENT_MID: &str = "│   ";
const INDENT_LAST: &str = "    ";

/// Names never get squeezed below this many graphemes, however deep the line is.
const MIN_NAME_BUDGET: usize = 10;

/// Limits applied while rendering a folder tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FolderTreeOptions {
    /// Deepest level rendered. Children of the root are depth 1.
    pub max_depth: usize,
    /// Total number of lines emitted across the whole tree.
    pub max_nodes: usize,
    pub skip_dotfiles: bool,
    /// Target display width of a line, used to budget name truncation.
    pub max_line_chars: usize,
}

impl Default for FolderTreeOptions {
    fn default() -> Self {
        FolderTreeOptions {
            max_depth: 2,
            max_nodes: 200,
            skip_dotfiles: true,
            max_line_chars: 70,
        }
    }
}

/// A rendered folder tree along with what it counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderTree {
    markdown: String,
    files: usize,
    dirs: usize,
    truncated: usize,
}

impl FolderTree {
    /// The fenced block, header included. Present even for empty directories.
    #[inline]
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    #[inline]
    pub fn files(&self) -> usize {
        self.files
    }

    #[inline]
    pub fn dirs(&self) -> usize {
        self.dirs
    }

    /// Number of entries left out once the node budget ran out.
    #[inline]
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    pub fn into_markdown(self) -> String {
        self.markdown
    }
}

type WalkFuture<'s> = Pin<Box<dyn Future<Output = ()> + Send + 's>>;

/// State of one traversal. Owned by a single [generate_folder_tree] call.
struct TreeWalk<'a> {
    fs: &'a dyn FileSystem,
    options: FolderTreeOptions,
    nodes: usize,
    truncated: usize,
    files: usize,
    dirs: usize,
    lines: Vec<String>,
}

impl<'a> TreeWalk<'a> {
    fn new(fs: &'a dyn FileSystem, options: FolderTreeOptions) -> Self {
        TreeWalk {
            fs,
            options,
            nodes: 0,
            truncated: 0,
            files: 0,
            dirs: 0,
            lines: Vec::new(),
        }
    }

    #[inline]
    fn budget_exhausted(&self) -> bool {
        self.nodes >= self.options.max_nodes
    }

    async fn children(&self, path: &Path) -> Vec<DirChild> {
        let mut entries = match self.fs.read_dir(path).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("folder tree: skipping {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        if self.options.skip_dotfiles {
            entries.retain(|e| !e.is_dotfile());
        }

        entries.sort_by_cached_key(|e| (!e.is_dir(), CollationKey::new(e.name())));
        entries
    }

    fn walk<'s>(&'s mut self, path: PathBuf, depth: usize, prefix: String) -> WalkFuture<'s> {
        Box::pin(async move {
            if depth > self.options.max_depth {
                return;
            }

            let entries = self.children(&path).await;
            let last_index = entries.len().saturating_sub(1);

            for (i, entry) in entries.iter().enumerate() {
                if self.budget_exhausted() {
                    self.truncated += entries.len() - i;
                    break;
                }

                let is_last = i == last_index;
                let (branch, indent) = if is_last {
                    (BRANCH_LAST, INDENT_LAST)
                } else {
                    (BRANCH_MID, INDENT_MID)
                };
                let glyph = if entry.is_dir() {
                    FOLDER_GLYPH
                } else {
                    FILE_GLYPH
                };

                self.nodes += 1;
                if entry.is_dir() {
                    self.dirs += 1;
                } else {
                    self.files += 1;
                }

                let leader = format!("{}{}{} ", prefix, branch, glyph);
                let budget = self
                    .options
                    .max_line_chars
                    .saturating_sub(leader.width())
                    .max(MIN_NAME_BUDGET);
                self.lines
                    .push(leader + &truncate_name(entry.name(), budget));

                if entry.is_dir() {
                    let next_prefix = format!("{}{}", prefix, indent);
                    self.walk(path.join(entry.name()), depth + 1, next_prefix)
                        .await;
                }
            }
        })
    }

    fn header(&self) -> String {
        let mut header = format!(
            "[{} {} • {} {}",
            FOLDER_GLYPH, self.dirs, FILE_GLYPH, self.files
        );
        if self.truncated > 0 {
            header.push_str(&format!(" • … {} more", self.truncated));
        }
        header.push(']');
        header
    }

    fn finish(self) -> FolderTree {
        let mut markdown = String::from("```text\n");
        markdown.push_str(&self.header());
        for line in &self.lines {
            markdown.push('\n');
            markdown.push_str(line);
        }
        markdown.push_str("\n```");

        FolderTree {
            markdown,
            files: self.files,
            dirs: self.dirs,
            truncated: self.truncated,
        }
    }
}

/// Renders the folder tree below `root`.
///
/// Never fails: directories that cannot be listed show up without children, and a
/// root that cannot be listed yields a header-only block with zero counts.
pub async fn generate_folder_tree(
    fs: &dyn FileSystem,
    root: &Path,
    options: FolderTreeOptions,
) -> FolderTree {
    let mut walk = TreeWalk::new(fs, options);
    walk.walk(root.to_path_buf(), 1, String::new()).await;
    walk.finish()
}
