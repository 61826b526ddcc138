//! Command-line argument parsing for mdbrowse.
//!
//! When invoked with no args (`mdb`), the configured start directory is listed
//! in the configured sort order.

use crate::core::sort::SortMode;
use crate::core::tree::FolderTreeOptions;

use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdb")]
#[command(about = "Browse directories by their file metadata", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory to open (defaults to the configured start directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Sort mode: name-asc, kind-asc, last-opened-asc, added-asc, modified-asc,
    /// created-asc, size-asc or tags-asc
    #[arg(long, value_name = "MODE")]
    pub sort: Option<SortMode>,

    /// Print a folder tree of PATH instead of the listing
    #[arg(long)]
    pub tree: bool,

    /// Deepest level shown by the folder tree
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Maximum number of lines in the folder tree
    #[arg(long, value_name = "N")]
    pub max_nodes: Option<usize>,

    /// Include dotfiles in the folder tree
    #[arg(long)]
    pub all: bool,

    /// Print the preview of an entry of the listing
    #[arg(long, value_name = "FILE")]
    pub preview: Option<String>,

    /// Print the metadata of an entry of the listing
    #[arg(long, value_name = "NAME")]
    pub info: Option<String>,

    /// Generate a default configuration file
    #[arg(long)]
    pub init: bool,
}

impl Cli {
    /// Applies the tree flags on top of the configured options.
    pub fn tree_options(&self, base: FolderTreeOptions) -> FolderTreeOptions {
        FolderTreeOptions {
            max_depth: self.depth.unwrap_or(base.max_depth),
            max_nodes: self.max_nodes.unwrap_or(base.max_nodes),
            skip_dotfiles: base.skip_dotfiles && !self.all,
            ..base
        }
    }
}
