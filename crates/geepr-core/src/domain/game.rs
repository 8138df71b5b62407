//! Game domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ports::CatalogRecord;

/// An existing or future game, regardless of platform or release date.
///
/// The title is the common name of the game. When platforms or releases
/// differ in naming, the difference is recorded per release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Store-assigned identifier.
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Archived games stay queryable but are hidden by most views.
    pub archived: bool,
}

impl Game {
    /// Attach an identifier to a draft, producing the persisted shape.
    pub fn from_draft(id: Uuid, draft: NewGame) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            archived: draft.archived,
        }
    }
}

/// A game that has not been persisted yet, or the full replacement for one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

impl NewGame {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }
}

/// List filter for games. An empty title matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    /// Case-insensitive substring of the title.
    pub title: String,
}

/// Sort keys for game listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameSort {
    #[default]
    Id,
    Title,
}

impl From<u8> for GameSort {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Title,
            _ => Self::Id,
        }
    }
}

impl CatalogRecord for Game {
    type Draft = NewGame;
    type Filter = GameFilter;
    type Sort = GameSort;

    const NAME: &'static str = "game";
}
