//! Markdown previews for the detail view.
//!
//! Files are classified into [PreviewKind]s by declared content type and extension:
//! - images are embedded by file URL
//! - small text files are inlined as a fenced code block with a language tag
//! - everything else has no preview
//!
//! Directories get a folder tree instead, see [render_preview].

use crate::core::entry::Entry;
use crate::core::fm::FileSystem;
use crate::core::tree::{FolderTreeOptions, generate_folder_tree};

use phf::{phf_map, phf_set};
use url::Url;

use std::path::Path;

/// Text files above this size are not inlined (256 KiB).
pub const MAX_TEXT_PREVIEW_BYTES: u64 = 256 * 1024;

static IMAGE_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff", "tif", "ico", "svg",
};

static TEXT_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    "txt", "md", "mdx", "json", "log", "yaml", "yml", "xml", "csv", "ts", "tsx",
    "js", "jsx", "css", "scss", "html", "svg", "ini", "toml", "conf", "env",
    "py", "rb", "go", "rs", "java", "kt", "swift", "c", "cpp", "h",
};

/// Extension to code fence language.
static FENCE_LANG_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "md" => "md",
    "mdx" => "mdx",
    "json" => "json",
    "yaml" => "yaml",
    "yml" => "yaml",
    "xml" => "xml",
    "csv" => "csv",
    "ts" => "ts",
    "tsx" => "tsx",
    "js" => "js",
    "jsx" => "jsx",
    "css" => "css",
    "scss" => "scss",
    "html" => "html",
    "svg" => "xml",
    "ini" => "ini",
    "toml" => "toml",
    "conf" => "conf",
    "env" => "bash",
    "py" => "python",
    "rb" => "ruby",
    "go" => "go",
    "rs" => "rust",
    "java" => "java",
    "kt" => "kotlin",
    "swift" => "swift",
    "c" => "c",
    "cpp" => "cpp",
    "h" => "c",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Text,
    Other,
}

/// Lowercased extension of the entry's path, without the dot.
fn extension(entry: &Entry) -> Option<String> {
    Path::new(entry.path())
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Classifies an entry for previewing. Images win over text, so `.svg` is an image.
pub fn classify(entry: &Entry) -> PreviewKind {
    let content_type = entry.content_type().unwrap_or("");
    let ext = extension(entry);
    let ext = ext.as_deref().unwrap_or("");

    if content_type.starts_with("image/") || IMAGE_EXTENSIONS.contains(ext) {
        PreviewKind::Image
    } else if content_type.starts_with("text/") || TEXT_EXTENSIONS.contains(ext) {
        PreviewKind::Text
    } else {
        PreviewKind::Other
    }
}

/// Code fence language for an extension, or an empty string.
pub fn fence_lang(ext: &str) -> &'static str {
    FENCE_LANG_MAP
        .get(ext.to_lowercase().as_str())
        .copied()
        .unwrap_or("")
}

/// Wraps `text` in a fenced code block.
///
/// The fence is one backtick longer than the longest backtick run inside the text,
/// so embedded fences cannot terminate the block.
pub fn fence(text: &str, lang: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    let ticks = "`".repeat(longest.max(2) + 1);

    let mut out = String::with_capacity(text.len() + 2 * ticks.len() + lang.len() + 2);
    out.push_str(&ticks);
    out.push_str(lang);
    out.push('\n');
    out.push_str(text);
    out.push('\n');
    out.push_str(&ticks);
    out
}

/// Markdown image embed pointing at the file. `None` for relative paths.
fn image_markdown(entry: &Entry) -> Option<String> {
    let url = Url::from_file_path(entry.path()).ok()?;
    Some(format!("![]({})", url))
}

async fn text_markdown(fs: &dyn FileSystem, entry: &Entry) -> Option<String> {
    let path = Path::new(entry.path());

    let size = match entry.size() {
        Some(size) if size.is_finite() && size >= 0.0 => size as u64,
        _ => fs.file_len(path).await.ok()?,
    };
    if size > MAX_TEXT_PREVIEW_BYTES {
        return None;
    }

    let bytes = match fs.read_file(path, MAX_TEXT_PREVIEW_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("text preview of {} failed: {}", path.display(), e);
            return None;
        }
    };

    let text = String::from_utf8_lossy(&bytes);
    let lang = extension(entry).map(|ext| fence_lang(&ext)).unwrap_or("");
    Some(fence(&text, lang))
}

/// Builds the preview markdown for a non-directory entry.
///
/// Returns `None` when nothing can be shown: unsupported kinds, oversized or
/// unreadable text files, and image paths that cannot become a file URL.
pub async fn preview_markdown(fs: &dyn FileSystem, entry: &Entry) -> Option<String> {
    match classify(entry) {
        PreviewKind::Image => image_markdown(entry),
        PreviewKind::Text => text_markdown(fs, entry).await,
        PreviewKind::Other => None,
    }
}

/// Preview for any entry: directories render as a folder tree, files through
/// [preview_markdown].
pub async fn render_preview(
    fs: &dyn FileSystem,
    entry: &Entry,
    tree_options: FolderTreeOptions,
) -> Option<String> {
    if entry.is_dir() {
        let tree = generate_folder_tree(fs, Path::new(entry.path()), tree_options).await;
        Some(tree.into_markdown())
    } else {
        preview_markdown(fs, entry).await
    }
}
