//! Game release DTOs.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use geepr_core::{GameRelease, NewGameRelease, Page, PageRequest, ReleaseFilter, ReleaseSort};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PageMeta, check_optional_length, none_if_empty};
use crate::error::HttpError;

/// Query parameters of `GET /releases`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaseListQuery {
    pub title: String,
    pub game_id: Option<Uuid>,
    pub order: u8,
    pub index: i64,
    pub size: i64,
}

impl ReleaseListQuery {
    pub fn filter(&self) -> ReleaseFilter {
        ReleaseFilter {
            title: self.title.clone(),
            game_id: self.game_id.unwrap_or_default(),
        }
    }

    pub const fn page(&self) -> PageRequest {
        PageRequest::new(self.index, self.size)
    }

    pub fn sort(&self) -> ReleaseSort {
        ReleaseSort::from(self.order)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReleaseListResponse {
    pub releases: Vec<GameRelease>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl From<Page<GameRelease>> for ReleaseListResponse {
    fn from(page: Page<GameRelease>) -> Self {
        Self {
            meta: PageMeta::from(&page),
            releases: page.items,
        }
    }
}

/// Body of `POST /releases` and `PUT /releases/{id}`.
///
/// `gameId` is required on create. On update it may be left out to keep
/// the release attached to its current game.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRequest {
    #[serde(default)]
    pub game_id: Option<Uuid>,
    #[serde(default, alias = "titleOverride")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339, e.g. `2017-03-03T00:00:00Z`.
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub release_date_unknown: bool,
    #[serde(default)]
    pub platform_ids: BTreeSet<Uuid>,
}

impl ReleaseRequest {
    pub fn validate(&self) -> Result<(), HttpError> {
        check_optional_length("title", self.title.as_deref(), 200)?;
        check_optional_length("description", self.description.as_deref(), 2000)
    }

    /// The game this request names, required when creating.
    pub fn required_game_id(&self) -> Result<Uuid, HttpError> {
        self.game_id
            .filter(|id| !id.is_nil())
            .ok_or_else(|| HttpError::BadRequest("gameId is required".to_string()))
    }

    pub fn into_draft(self, game_id: Uuid) -> NewGameRelease {
        NewGameRelease {
            game_id,
            title_override: none_if_empty(self.title),
            description: none_if_empty(self.description),
            release_date: self.release_date,
            release_date_unknown: self.release_date_unknown,
            platform_ids: self.platform_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> ReleaseRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_text_becomes_absent() {
        let game_id = Uuid::new_v4();
        let draft = request(r#"{"title": "", "description": "", "releaseDateUnknown": true}"#)
            .into_draft(game_id);

        assert_eq!(draft.game_id, game_id);
        assert_eq!(draft.title_override, None);
        assert_eq!(draft.description, None);
        assert!(draft.release_date_unknown);
    }

    #[test]
    fn test_title_override_alias_and_date() {
        let draft = request(
            r#"{"titleOverride": "Deluxe", "releaseDate": "2017-03-03T00:00:00Z"}"#,
        )
        .into_draft(Uuid::nil());

        assert_eq!(draft.title_override.as_deref(), Some("Deluxe"));
        assert_eq!(
            draft.release_date.map(|d| d.to_rfc3339()),
            Some("2017-03-03T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_game_id_required_on_create() {
        assert!(request("{}").required_game_id().is_err());
        assert!(
            request(r#"{"gameId": "00000000-0000-0000-0000-000000000000"}"#)
                .required_game_id()
                .is_err()
        );
    }

    #[test]
    fn test_overlong_title_rejected() {
        let title = "x".repeat(201);
        let body = format!(r#"{{"title": "{title}"}}"#);
        assert!(request(&body).validate().is_err());
    }

    #[test]
    fn test_list_query_without_game_matches_all_games() {
        assert!(ReleaseListQuery::default().filter().game_id.is_nil());
    }
}
