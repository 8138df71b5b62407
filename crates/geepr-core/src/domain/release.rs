//! Game release domain types.
//!
//! A release is one edition of a game, published on a set of platforms.
//! The platform set lives in a join relation and is always replaced
//! wholesale when a release is updated.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ports::CatalogRecord;

/// A persisted release together with the platforms it is available on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRelease {
    pub id: Uuid,
    pub game_id: Uuid,
    /// Release-specific title. When absent, the game's title applies.
    pub title_override: Option<String>,
    pub description: Option<String>,
    /// When this release was (or will be) published.
    ///
    /// Absent means already released with no recorded date, unless
    /// `release_date_unknown` says otherwise.
    pub release_date: Option<DateTime<Utc>>,
    /// The release is not public yet and no date is confirmed. A
    /// `release_date` set alongside this flag is only an estimate.
    pub release_date_unknown: bool,
    pub platform_ids: BTreeSet<Uuid>,
}

/// How a release's date fields should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseSchedule {
    /// Not released yet and not dated; the date, if any, is an estimate.
    Unconfirmed { estimate: Option<DateTime<Utc>> },
    /// A confirmed publication date, past or future.
    Confirmed(DateTime<Utc>),
    /// Already published, date never recorded.
    PublishedUndated,
}

impl GameRelease {
    pub fn from_draft(id: Uuid, draft: NewGameRelease) -> Self {
        Self {
            id,
            game_id: draft.game_id,
            title_override: draft.title_override,
            description: draft.description,
            release_date: draft.release_date,
            release_date_unknown: draft.release_date_unknown,
            platform_ids: draft.platform_ids,
        }
    }

    pub const fn schedule(&self) -> ReleaseSchedule {
        match (self.release_date_unknown, self.release_date) {
            (true, estimate) => ReleaseSchedule::Unconfirmed { estimate },
            (false, Some(date)) => ReleaseSchedule::Confirmed(date),
            (false, None) => ReleaseSchedule::PublishedUndated,
        }
    }
}

/// A release that has not been persisted yet, or the full replacement for one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameRelease {
    pub game_id: Uuid,
    pub title_override: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub release_date_unknown: bool,
    #[serde(default)]
    pub platform_ids: BTreeSet<Uuid>,
}

impl NewGameRelease {
    pub fn new(game_id: Uuid) -> Self {
        Self {
            game_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title_override(mut self, title: impl Into<String>) -> Self {
        self.title_override = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_release_date(mut self, date: DateTime<Utc>) -> Self {
        self.release_date = Some(date);
        self
    }

    #[must_use]
    pub const fn date_unknown(mut self, unknown: bool) -> Self {
        self.release_date_unknown = unknown;
        self
    }

    #[must_use]
    pub fn with_platforms(mut self, platform_ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.platform_ids = platform_ids.into_iter().collect();
        self
    }
}

/// One edge of the release/platform relation: "this release is available
/// on this platform". Has no identity beyond the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReleasePlatform {
    #[serde(rename = "releaseId")]
    pub game_release_id: Uuid,
    pub platform_id: Uuid,
}

impl GameReleasePlatform {
    pub const fn new(game_release_id: Uuid, platform_id: Uuid) -> Self {
        Self {
            game_release_id,
            platform_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseFilter {
    /// Case-insensitive substring of the title override.
    pub title: String,
    /// Only releases of this game; nil matches every game.
    pub game_id: Uuid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReleaseSort {
    #[default]
    Id,
    Title,
    Date,
}

impl From<u8> for ReleaseSort {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Title,
            2 => Self::Date,
            _ => Self::Id,
        }
    }
}

impl CatalogRecord for GameRelease {
    type Draft = NewGameRelease;
    type Filter = ReleaseFilter;
    type Sort = ReleaseSort;

    const NAME: &'static str = "game release";
}
