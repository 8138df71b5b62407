//! Data Transfer Objects (DTOs) for HTTP API contract.
//!
//! Request types validate the bounds the repositories trust and convert
//! into domain drafts. List query and response types carry the paging
//! parameters and metadata. All JSON field names are camelCase.

pub mod games;
pub mod paging;
pub mod platforms;
pub mod releases;

pub use games::{GameListQuery, GameListResponse, GameRequest};
pub use paging::PageMeta;
pub use platforms::{PlatformListQuery, PlatformListResponse, PlatformRequest};
pub use releases::{ReleaseListQuery, ReleaseListResponse, ReleaseRequest};

use crate::error::HttpError;

/// Reject `value` unless its length in characters lies in `min..=max`.
pub(crate) fn check_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), HttpError> {
    let len = value.chars().count();
    if len < min {
        return Err(HttpError::BadRequest(format!("{field} is required")));
    }
    if len > max {
        return Err(HttpError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Like [`check_length`] for optional text with no lower bound.
pub(crate) fn check_optional_length(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), HttpError> {
    value.map_or(Ok(()), |value| check_length(field, value, 0, max))
}

/// Empty optional text is stored as absent.
pub(crate) fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
