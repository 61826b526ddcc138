//! Entry records produced by the metadata helper.
//!
//! Provides the [Entry] struct which is used throughout mdbrowse, along with the
//! [EntryType], [UserTag] and [Timestamp] pieces it is made of.
//!
//! Entries are decoded from the helper's JSON output and are read-only afterwards.
//! Every metadata field except the name, path and type may be missing, so accessors
//! hand out `Option`s and the sort engine decides how missing values order.

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of filesystem object an [Entry] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Directory,
    File,
    Symlink,
    /// Any type token the helper emits that mdbrowse does not know about.
    #[serde(other)]
    Other,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Directory => "directory",
            EntryType::File => "file",
            EntryType::Symlink => "symlink",
            EntryType::Other => "other",
        }
    }
}

/// A Finder-style user tag. Tags keep the order the helper reported them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTag {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    color_index: Option<u8>,
}

impl UserTag {
    pub fn new(name: impl Into<String>, color_index: Option<u8>) -> Self {
        UserTag {
            name: Some(name.into()),
            color_index,
        }
    }

    /// A tag the helper reported without a name.
    pub fn unnamed(color_index: Option<u8>) -> Self {
        UserTag {
            name: None,
            color_index,
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn color_index(&self) -> Option<u8> {
        self.color_index
    }
}

/// A raw timestamp as serialized by the helper.
///
/// The helper writes seconds since the epoch as a JSON number, but string values are
/// accepted too and interpreted by [crate::core::parse_date].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Seconds(f64),
    Text(String),
}

impl From<f64> for Timestamp {
    fn from(seconds: f64) -> Self {
        Timestamp::Seconds(seconds)
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Timestamp::Text(text.to_string())
    }
}

/// Represents a single entry of a directory listing, as reported by the metadata helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(rename = "type")]
    entry_type: EntryType,
    name: String,
    path: String,
    #[serde(default)]
    size: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    user_tags: Vec<UserTag>,
    #[serde(default)]
    last_used_date: Option<Timestamp>,
    #[serde(default)]
    attribute_change_date: Option<Timestamp>,
    #[serde(default)]
    content_creation_date: Option<Timestamp>,
    #[serde(default)]
    content_modification_date: Option<Timestamp>,
    #[serde(default)]
    fs_creation_date: Option<Timestamp>,
    #[serde(default)]
    fs_content_change_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "null_as_default")]
    fs_invisible: bool,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    finder_comment: Option<String>,
}

/// The helper emits `null` for attributes Spotlight has no value for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Entry {
    pub fn new(entry_type: EntryType, name: impl Into<String>, path: impl Into<String>) -> Self {
        Entry {
            entry_type,
            name: name.into(),
            path: path.into(),
            size: None,
            user_tags: Vec::new(),
            last_used_date: None,
            attribute_change_date: None,
            content_creation_date: None,
            content_modification_date: None,
            fs_creation_date: None,
            fs_content_change_date: None,
            fs_invisible: false,
            kind: None,
            content_type: None,
            finder_comment: None,
        }
    }

    // Builders

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_tags(mut self, tags: Vec<UserTag>) -> Self {
        self.user_tags = tags;
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_finder_comment(mut self, comment: impl Into<String>) -> Self {
        self.finder_comment = Some(comment.into());
        self
    }

    pub fn with_invisible(mut self, invisible: bool) -> Self {
        self.fs_invisible = invisible;
        self
    }

    pub fn with_last_used(mut self, ts: impl Into<Timestamp>) -> Self {
        self.last_used_date = Some(ts.into());
        self
    }

    pub fn with_attribute_change(mut self, ts: impl Into<Timestamp>) -> Self {
        self.attribute_change_date = Some(ts.into());
        self
    }

    pub fn with_content_creation(mut self, ts: impl Into<Timestamp>) -> Self {
        self.content_creation_date = Some(ts.into());
        self
    }

    pub fn with_content_modification(mut self, ts: impl Into<Timestamp>) -> Self {
        self.content_modification_date = Some(ts.into());
        self
    }

    pub fn with_fs_creation(mut self, ts: impl Into<Timestamp>) -> Self {
        self.fs_creation_date = Some(ts.into());
        self
    }

    pub fn with_fs_content_change(mut self, ts: impl Into<Timestamp>) -> Self {
        self.fs_content_change_date = Some(ts.into());
        self
    }

    // Accessors

    #[inline]
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn size(&self) -> Option<f64> {
        self.size
    }

    #[inline]
    pub fn user_tags(&self) -> &[UserTag] {
        &self.user_tags
    }

    #[inline]
    pub fn last_used_date(&self) -> Option<&Timestamp> {
        self.last_used_date.as_ref()
    }

    #[inline]
    pub fn attribute_change_date(&self) -> Option<&Timestamp> {
        self.attribute_change_date.as_ref()
    }

    #[inline]
    pub fn content_creation_date(&self) -> Option<&Timestamp> {
        self.content_creation_date.as_ref()
    }

    #[inline]
    pub fn content_modification_date(&self) -> Option<&Timestamp> {
        self.content_modification_date.as_ref()
    }

    #[inline]
    pub fn fs_creation_date(&self) -> Option<&Timestamp> {
        self.fs_creation_date.as_ref()
    }

    #[inline]
    pub fn fs_content_change_date(&self) -> Option<&Timestamp> {
        self.fs_content_change_date.as_ref()
    }

    #[inline]
    pub fn is_invisible(&self) -> bool {
        self.fs_invisible
    }

    #[inline]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    #[inline]
    pub fn finder_comment(&self) -> Option<&str> {
        self.finder_comment.as_deref()
    }
}
