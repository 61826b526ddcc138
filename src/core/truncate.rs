//! Grapheme-safe middle truncation of file names.
//!
//! Names are cut in the middle and joined with an ellipsis, keeping the extension
//! intact so `quarterly_report_final.pdf` stays recognizable as a PDF.
//! All counting happens on extended grapheme clusters, so emoji sequences and
//! combining marks are never split.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

pub const ELLIPSIS: char = '…';

/// Share of the base-name budget given to the head of the name.
const HEAD_SHARE_NUM: usize = 3;
const HEAD_SHARE_DEN: usize = 5;

/// Minimum number of base-name graphemes kept around the ellipsis.
const MIN_BASE_BUDGET: usize = 2;

#[inline]
fn graphemes(value: &str) -> Vec<&str> {
    value.graphemes(true).collect()
}

/// Truncates `name` to at most `max_chars` graphemes where possible.
///
/// The name is NFC-normalized first and returned as-is when it already fits.
/// A trailing extension (the last `.` that is neither the first nor the last
/// character) is preserved verbatim and not counted against the base name's share.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    let normalized: String = name.nfc().collect();
    if normalized.graphemes(true).count() <= max_chars {
        return normalized;
    }

    let (base, ext) = match normalized.rfind('.') {
        Some(dot) if dot > 0 && dot < normalized.len() - 1 => normalized.split_at(dot),
        _ => (normalized.as_str(), ""),
    };

    let base_segments = graphemes(base);
    let ext_len = ext.graphemes(true).count();

    let budget = max_chars
        .saturating_sub(1 + ext_len)
        .max(MIN_BASE_BUDGET);
    let len = base_segments.len();

    if budget >= len {
        return normalized;
    }

    let mut head = (budget * HEAD_SHARE_NUM / HEAD_SHARE_DEN).max(1);
    head = head.min(len - 1);
    let mut tail = budget.saturating_sub(head).max(1);
    tail = tail.min(len - head);

    if head + tail > len {
        head = (len - 1).max(1);
        tail = 1;
    }

    let mut out = String::with_capacity(normalized.len());
    out.extend(base_segments[..head].iter().copied());
    out.push(ELLIPSIS);
    out.extend(base_segments[len - tail..].iter().copied());
    out.push_str(ext);
    out
}
