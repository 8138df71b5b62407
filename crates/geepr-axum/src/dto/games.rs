//! Game DTOs.

use geepr_core::{Game, GameFilter, GameSort, NewGame, Page, PageRequest};
use serde::{Deserialize, Serialize};

use super::{PageMeta, check_length, check_optional_length, none_if_empty};
use crate::error::HttpError;

/// Query parameters of `GET /games`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameListQuery {
    pub title: String,
    pub order: u8,
    pub index: i64,
    pub size: i64,
}

impl GameListQuery {
    pub fn filter(&self) -> GameFilter {
        GameFilter {
            title: self.title.clone(),
        }
    }

    pub const fn page(&self) -> PageRequest {
        PageRequest::new(self.index, self.size)
    }

    pub fn sort(&self) -> GameSort {
        GameSort::from(self.order)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListResponse {
    pub games: Vec<Game>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl From<Page<Game>> for GameListResponse {
    fn from(page: Page<Game>) -> Self {
        Self {
            meta: PageMeta::from(&page),
            games: page.items,
        }
    }
}

/// Body of `POST /games` and `PUT /games/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

impl GameRequest {
    pub fn validate(&self) -> Result<(), HttpError> {
        check_length("title", &self.title, 1, 200)?;
        check_optional_length("description", self.description.as_deref(), 2000)
    }

    pub fn into_draft(self) -> NewGame {
        NewGame {
            title: self.title,
            description: none_if_empty(self.description),
            archived: self.archived,
        }
    }
}
