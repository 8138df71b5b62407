//! Platform domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ports::CatalogRecord;

/// Hardware a game can be played on (PCs, PlayStation consoles, etc.).
///
/// The `(name, short_name)` pair is unique; the store enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: Uuid,
    /// Full name, e.g. "Sony PlayStation 5".
    pub name: String,
    /// Shortened name for tight layouts, e.g. "PS5".
    pub short_name: String,
}

impl Platform {
    pub fn from_draft(id: Uuid, draft: NewPlatform) -> Self {
        Self {
            id,
            name: draft.name,
            short_name: draft.short_name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlatform {
    pub name: String,
    pub short_name: String,
}

impl NewPlatform {
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformFilter {
    /// Case-insensitive substring of the full name.
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlatformSort {
    #[default]
    Id,
    Name,
    ShortName,
}

impl From<u8> for PlatformSort {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Name,
            2 => Self::ShortName,
            _ => Self::Id,
        }
    }
}

impl CatalogRecord for Platform {
    type Draft = NewPlatform;
    type Filter = PlatformFilter;
    type Sort = PlatformSort;

    const NAME: &'static str = "platform";
}
