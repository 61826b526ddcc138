//! Core engine of mdbrowse.
//!
//! Everything below is independent of the command line front end:
//! - [entry]: the metadata record produced by the helper.
//! - [sort]: the multi-key sort engine over entries (see [sort_md_items]).
//! - [tree]: the bounded folder tree renderer (see [generate_folder_tree]).
//! - [truncate]: grapheme-safe name shortening used by the tree.
//! - [fm]: the async [FileSystem] capability and its local implementation.
//! - [preview]: markdown previews for files and directories.
//! - [proc]: the metadata helper process boundary.
//! - [formatter]: display formatting for sizes, dates, tags and detail rows.

pub mod entry;
pub mod fm;
pub mod formatter;
pub mod preview;
pub mod proc;
pub mod sort;
pub mod tree;
pub mod truncate;

pub use entry::{Entry, EntryType, Timestamp, UserTag};
pub use fm::{DirChild, FileSystem, LocalFs};
pub use formatter::{
    AccessoryToggles, accessories, detail_rows, format_file_size, format_timestamp,
    sanitize_to_exact_width, size_label, tag_color,
};
pub use preview::{PreviewKind, classify, preview_markdown, render_preview};
pub use proc::{EntryLister, HelperProcess, ListError};
pub use sort::{
    CollationKey, SortMode, UnknownSortMode, compare_numbers, compare_strings, parse_date,
    sort_md_items,
};
pub use tree::{FolderTree, FolderTreeOptions, generate_folder_tree};
pub use truncate::truncate_name;
