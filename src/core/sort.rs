//! Sorting of helper entries for mdbrowse.
//!
//! The [SortMode] enum names the eight ascending orderings the browser offers, and
//! [sort_md_items] applies one of them to a batch of [Entry] records.
//!
//! Metadata is routinely incomplete. Instead of special-casing missing values in every
//! comparator, each entry is reduced to a [SortKey] once, and missing values order after
//! every real value:
//! - text keys hold no [CollationKey] at all
//! - numeric keys use `f64::INFINITY`
//!
//! Text is compared by [CollationKey], a primary-strength approximation of root
//! collation: case and accents are ignored, whitespace and punctuation come before
//! symbols, symbols before digits and digits before letters.
//!
//! The sort itself is stable, so entries with equal keys keep their input order.

use crate::core::entry::{Entry, Timestamp};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// ASCII punctuation and symbols in root collation order.
const ASCII_SYMBOL_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Separator used when joining tag names into a single key. Tag names never contain it.
const TAG_SEPARATOR: &str = "\u{0}";

/// The orderings available for a directory listing. All of them are ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    #[serde(rename = "name-asc")]
    Name,
    #[serde(rename = "kind-asc")]
    Kind,
    #[serde(rename = "last-opened-asc")]
    LastOpened,
    #[serde(rename = "added-asc")]
    Added,
    #[serde(rename = "modified-asc")]
    Modified,
    #[serde(rename = "created-asc")]
    Created,
    #[serde(rename = "size-asc")]
    Size,
    #[serde(rename = "tags-asc")]
    Tags,
}

impl SortMode {
    pub const ALL: [SortMode; 8] = [
        SortMode::Name,
        SortMode::Kind,
        SortMode::LastOpened,
        SortMode::Added,
        SortMode::Modified,
        SortMode::Created,
        SortMode::Size,
        SortMode::Tags,
    ];

    /// The token used on the helper command line and in the config file.
    pub fn token(&self) -> &'static str {
        match self {
            SortMode::Name => "name-asc",
            SortMode::Kind => "kind-asc",
            SortMode::LastOpened => "last-opened-asc",
            SortMode::Added => "added-asc",
            SortMode::Modified => "modified-asc",
            SortMode::Created => "created-asc",
            SortMode::Size => "size-asc",
            SortMode::Tags => "tags-asc",
        }
    }

    /// Human readable label, as shown in a sort dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Name => "Name",
            SortMode::Kind => "Kind",
            SortMode::LastOpened => "Last Opened",
            SortMode::Added => "Date Added",
            SortMode::Modified => "Date Modified",
            SortMode::Created => "Date Created",
            SortMode::Size => "Size",
            SortMode::Tags => "Tags",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort mode '{0}' (expected one of: name-asc, kind-asc, last-opened-asc, added-asc, modified-asc, created-asc, size-asc, tags-asc)")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.token() == s)
            .ok_or_else(|| UnknownSortMode(s.to_string()))
    }
}

/// Primary collation classes, in sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Space,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

fn primary_weight(c: char) -> (CharClass, u32) {
    if let Some(idx) = ASCII_SYMBOL_ORDER.find(c) {
        return (CharClass::Punctuation, idx as u32);
    }
    let class = if c.is_whitespace() || c.is_control() {
        CharClass::Space
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Symbol
    };
    (class, c as u32)
}

/// A string folded by [collation_key], ordered by primary weight.
#[derive(Debug, Clone)]
pub struct CollationKey(String);

impl CollationKey {
    pub fn new(value: &str) -> Self {
        CollationKey(collation_key(value))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for CollationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .chars()
            .map(primary_weight)
            .cmp(other.0.chars().map(primary_weight))
    }
}

impl PartialOrd for CollationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CollationKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CollationKey {}

/// A precomputed, already-normalized sort key. `Text(None)` is a missing value.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Text(Option<CollationKey>),
    Number(f64),
}

impl SortKey {
    fn text(value: Option<&str>) -> Self {
        SortKey::Text(value.map(CollationKey::new))
    }

    fn number(value: Option<f64>) -> Self {
        SortKey::Number(finite_or_infinity(value))
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => match (a, b) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            (SortKey::Number(a), SortKey::Number(b)) => compare_numbers(Some(*a), Some(*b)),
            // Keys of one batch always come from the same mode.
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        }
    }
}

#[inline]
fn finite_or_infinity(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => f64::INFINITY,
    }
}

/// Base-sensitivity collation key: case and diacritics are ignored.
///
/// The string is canonically decomposed, combining marks are dropped and the rest is
/// lowercased, so "Résumé" and "resume" produce the same key. Letters that only differ
/// from a base letter below primary strength are folded too ("ß" is "ss", "ø" is "o").
pub fn collation_key(value: &str) -> String {
    let mut key = String::with_capacity(value.len());
    let folded = value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase);

    for c in folded {
        match c {
            'ß' => key.push_str("ss"),
            'æ' => key.push_str("ae"),
            'œ' => key.push_str("oe"),
            'ø' => key.push('o'),
            'đ' => key.push('d'),
            'ł' => key.push('l'),
            'ı' => key.push('i'),
            _ => key.push(c),
        }
    }
    key
}

/// Compares two optional strings by collation key. Missing values sort last.
pub fn compare_strings(left: Option<&str>, right: Option<&str>) -> Ordering {
    SortKey::text(left).compare(&SortKey::text(right))
}

/// Compares two optional numbers. Missing and non-finite values are treated as +infinity,
/// and two such values compare equal.
pub fn compare_numbers(left: Option<f64>, right: Option<f64>) -> Ordering {
    finite_or_infinity(left)
        .partial_cmp(&finite_or_infinity(right))
        .unwrap_or(Ordering::Equal)
}

/// Converts a helper timestamp into epoch milliseconds.
///
/// Numbers are seconds since the epoch. Strings are tried as a number of seconds first,
/// then as a date/time. Anything unusable, including a missing value, yields +infinity.
pub fn parse_date(value: Option<&Timestamp>) -> f64 {
    match value {
        Some(Timestamp::Seconds(secs)) if secs.is_finite() => secs * 1000.0,
        Some(Timestamp::Text(text)) => parse_date_str(text),
        _ => f64::INFINITY,
    }
}

fn parse_date_str(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return f64::INFINITY;
    }

    if let Ok(secs) = text.parse::<f64>()
        && secs.is_finite()
    {
        return secs * 1000.0;
    }

    parse_datetime_millis(text).unwrap_or(f64::INFINITY)
}

/// General date/time parsing. Date-only strings are UTC, date-times without an
/// offset are local time.
fn parse_datetime_millis(text: &str) -> Option<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis() as f64);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.timestamp_millis() as f64);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(midnight.and_utc().timestamp_millis() as f64);
    }

    const LOCAL_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    LOCAL_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(text, fmt).ok()?;
        let local = Local.from_local_datetime(&naive).earliest()?;
        Some(local.timestamp_millis() as f64)
    })
}

/// Key for the "added" ordering.
///
/// Prefers the parsed content-change date. The fallback reads the raw creation
/// seconds without scaling them to milliseconds, so fallback keys are not on the same
/// scale as parsed ones. Kept as-is for compatibility with existing listings.
fn date_added_value(entry: &Entry) -> f64 {
    let parsed = parse_date(entry.fs_content_change_date());
    if parsed.is_finite() {
        return parsed;
    }

    match entry.fs_creation_date() {
        Some(Timestamp::Seconds(secs)) if secs.is_finite() => *secs,
        _ => f64::INFINITY,
    }
}

/// Joins tag names in display order. Entries without tags have no key.
fn tags_key(entry: &Entry) -> Option<String> {
    let joined = entry
        .user_tags()
        .iter()
        .map(|tag| tag.name().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR);

    (!joined.is_empty()).then_some(joined)
}

fn sort_key(entry: &Entry, mode: SortMode) -> SortKey {
    match mode {
        SortMode::Name => SortKey::text(Some(entry.name())),
        SortMode::Kind => SortKey::text(entry.kind()),
        SortMode::LastOpened => SortKey::number(Some(parse_date(entry.last_used_date()))),
        SortMode::Added => SortKey::number(Some(date_added_value(entry))),
        SortMode::Modified => {
            SortKey::number(Some(parse_date(entry.content_modification_date())))
        }
        SortMode::Created => SortKey::number(Some(parse_date(entry.fs_creation_date()))),
        SortMode::Size => SortKey::number(entry.size()),
        SortMode::Tags => SortKey::text(tags_key(entry).as_deref()),
    }
}

/// Returns a new vector with the entries ordered by `mode`.
///
/// The input is left untouched. Entries with equal keys keep their relative order.
pub fn sort_md_items(entries: &[Entry], mode: SortMode) -> Vec<Entry> {
    let mut keyed: Vec<(SortKey, &Entry)> = entries
        .iter()
        .map(|entry| (sort_key(entry, mode), entry))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.compare(b));
    keyed.into_iter().map(|(_, entry)| entry.clone()).collect()
}
