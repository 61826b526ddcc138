//! Display configuration options for mdbrowse
//!
//! This module defines the `[display]` table of the mdbrowse.toml configuration file:
//! toggles for the accessories shown next to each entry in a listing.

use crate::core::formatter::AccessoryToggles;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Display {
    show_hidden: bool,
    show_last_used: bool,
    show_tags: bool,
    show_size: bool,
    show_attr_changed: bool,
    show_created: bool,
    show_content_changed: bool,
}

impl Default for Display {
    fn default() -> Self {
        let toggles = AccessoryToggles::default();
        Display {
            show_hidden: toggles.show_hidden,
            show_last_used: toggles.show_last_used,
            show_tags: toggles.show_tags,
            show_size: toggles.show_size,
            show_attr_changed: toggles.show_attr_changed,
            show_created: toggles.show_created,
            show_content_changed: toggles.show_content_changed,
        }
    }
}

impl Display {
    pub fn accessory_toggles(&self) -> AccessoryToggles {
        AccessoryToggles {
            show_hidden: self.show_hidden,
            show_last_used: self.show_last_used,
            show_tags: self.show_tags,
            show_size: self.show_size,
            show_attr_changed: self.show_attr_changed,
            show_created: self.show_created,
            show_content_changed: self.show_content_changed,
        }
    }
}
