//! Display formatting for entries in mdbrowse.
//!
//! Turns raw [Entry] metadata into the strings shown in listings and in the detail
//! view: file sizes, local timestamps, tag colors, list accessories and the
//! label/value rows of the metadata panel.
//!
//! Also provides [sanitize_to_exact_width] to lay out fixed-width columns.

use crate::core::entry::{Entry, Timestamp};
use crate::core::sort::parse_date;

use chrono::{DateTime, Local};
use humansize::{FormatSizeOptions, WINDOWS, format_size};
use unicode_width::UnicodeWidthChar;

/// Finder tag palette, indexed by a tag's color index.
const TAG_COLORS: [&str; 8] = [
    "primary", "secondary", "green", "purple", "blue", "yellow", "red", "orange",
];

/// Which accessories a listing row shows. Mirrors the `[display]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessoryToggles {
    pub show_hidden: bool,
    pub show_last_used: bool,
    pub show_tags: bool,
    pub show_size: bool,
    pub show_attr_changed: bool,
    pub show_created: bool,
    pub show_content_changed: bool,
}

impl Default for AccessoryToggles {
    fn default() -> Self {
        AccessoryToggles {
            show_hidden: true,
            show_last_used: false,
            show_tags: true,
            show_size: true,
            show_attr_changed: false,
            show_created: false,
            show_content_changed: false,
        }
    }
}

/// Formats a byte count with 1024-based units ("512 B", "1.5 KB").
/// # Returns
/// None for missing, zero, negative or non-finite sizes.
pub fn format_file_size(bytes: Option<f64>) -> Option<String> {
    let bytes = bytes.filter(|b| b.is_finite() && *b > 0.0)?;
    let options = FormatSizeOptions::from(WINDOWS).decimal_places(1);
    Some(format_size(bytes as u64, options))
}

/// Size shown for an entry. Directories only show one when the helper computed it.
pub fn size_label(entry: &Entry) -> Option<String> {
    format_file_size(entry.size())
}

/// Seconds of a helper timestamp, accepting the same inputs as the sort engine.
pub fn timestamp_seconds(ts: Option<&Timestamp>) -> Option<f64> {
    let millis = parse_date(ts);
    millis.is_finite().then_some(millis / 1000.0)
}

/// Formats seconds since the epoch as a local "YYYY-MM-DD HH:MM:SS" string.
pub fn format_timestamp(seconds: f64) -> Option<String> {
    if !seconds.is_finite() {
        return None;
    }
    let secs = seconds.floor();
    let nanos = ((seconds - secs) * 1e9) as u32;
    let dt = DateTime::from_timestamp(secs as i64, nanos)?;
    Some(dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
}

fn format_ts(ts: Option<&Timestamp>) -> Option<String> {
    timestamp_seconds(ts).and_then(format_timestamp)
}

/// Palette name for a tag color index. Missing or unknown indexes use the first color.
pub fn tag_color(color_index: Option<u8>) -> &'static str {
    color_index
        .and_then(|i| TAG_COLORS.get(i as usize))
        .copied()
        .unwrap_or(TAG_COLORS[0])
}

/// Tags rendered as "name (color)", in display order.
pub fn format_tags(entry: &Entry) -> Vec<String> {
    entry
        .user_tags()
        .iter()
        .map(|tag| format!("{} ({})", tag.name().unwrap_or(""), tag_color(tag.color_index())))
        .collect()
}

/// Label/value rows of the detail view. Rows without a value are left out.
pub fn detail_rows(entry: &Entry) -> Vec<(&'static str, String)> {
    let mut rows: Vec<(&'static str, Option<String>)> = vec![
        ("Name", Some(entry.name().to_string())),
        ("Kind", entry.kind().map(str::to_string)),
        ("Type", Some(entry.entry_type().as_str().to_string())),
        ("Path", Some(entry.path().to_string())),
        ("Size", size_label(entry)),
        ("Content Type", entry.content_type().map(str::to_string)),
    ];

    if entry.is_invisible() {
        rows.push(("Attributes", Some("Hidden".to_string())));
    }

    let tags = format_tags(entry);
    rows.push(("Tags", (!tags.is_empty()).then(|| tags.join(", "))));
    rows.push((
        "Finder Comment",
        entry
            .finder_comment()
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    ));

    rows.extend([
        ("Created", format_ts(entry.fs_creation_date())),
        ("Content Created", format_ts(entry.content_creation_date())),
        ("Modified", format_ts(entry.content_modification_date())),
        ("Content Changed", format_ts(entry.fs_content_change_date())),
        ("Attribute Changed", format_ts(entry.attribute_change_date())),
        ("Last Used", format_ts(entry.last_used_date())),
    ]);

    rows.into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
}

/// Accessory texts shown next to an entry in a listing row.
pub fn accessories(entry: &Entry, toggles: &AccessoryToggles) -> Vec<String> {
    let mut acc = Vec::new();

    if toggles.show_hidden && entry.is_invisible() {
        acc.push("hidden".to_string());
    }
    if toggles.show_last_used
        && let Some(date) = format_ts(entry.last_used_date())
    {
        acc.push(format!("used {}", date));
    }
    if toggles.show_tags {
        acc.extend(format_tags(entry).into_iter().map(|t| format!("#{}", t)));
    }
    if toggles.show_size
        && let Some(size) = size_label(entry)
    {
        acc.push(size);
    }
    if toggles.show_attr_changed
        && let Some(date) = format_ts(entry.attribute_change_date())
    {
        acc.push(format!("attrs {}", date));
    }
    if toggles.show_created
        && let Some(date) = format_ts(entry.fs_creation_date())
    {
        acc.push(format!("created {}", date));
    }
    if toggles.show_content_changed
        && let Some(date) = format_ts(entry.fs_content_change_date())
    {
        acc.push(format!("changed {}", date));
    }
    acc
}

/// Clean the output to an exact display width
/// by removing control characters, expanding tabs to 4 spaces,
/// and truncating or padding the string to fit exactly.
/// # Returns
/// A sanitized string that fits exactly within the specified width.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    for char in line.chars() {
        if char == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if char.is_control() {
            continue;
        }

        let w = char.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }

        out.push(char);
        current_w += w;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }

    out
}
