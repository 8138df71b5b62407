//! Platform DTOs.

use geepr_core::{NewPlatform, Page, PageRequest, Platform, PlatformFilter, PlatformSort};
use serde::{Deserialize, Serialize};

use super::{PageMeta, check_length};
use crate::error::HttpError;

/// Query parameters of `GET /platforms`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlatformListQuery {
    pub name: String,
    pub order: u8,
    pub index: i64,
    pub size: i64,
}

impl PlatformListQuery {
    pub fn filter(&self) -> PlatformFilter {
        PlatformFilter {
            name: self.name.clone(),
        }
    }

    pub const fn page(&self) -> PageRequest {
        PageRequest::new(self.index, self.size)
    }

    pub fn sort(&self) -> PlatformSort {
        PlatformSort::from(self.order)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformListResponse {
    pub platforms: Vec<Platform>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl From<Page<Platform>> for PlatformListResponse {
    fn from(page: Page<Platform>) -> Self {
        Self {
            meta: PageMeta::from(&page),
            platforms: page.items,
        }
    }
}

/// Body of `POST /platforms` and `PUT /platforms/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequest {
    pub name: String,
    pub short_name: String,
}

impl PlatformRequest {
    pub fn validate(&self) -> Result<(), HttpError> {
        check_length("name", &self.name, 1, 200)?;
        check_length("shortName", &self.short_name, 1, 10)
    }

    pub fn into_draft(self) -> NewPlatform {
        NewPlatform::new(self.name, self.short_name)
    }
}
