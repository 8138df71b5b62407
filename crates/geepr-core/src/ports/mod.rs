//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Repositories receive everything they need at construction; nothing is
//!   resolved through global state
//! - Every fallible operation returns [`RepositoryError`]

pub mod release_platforms;
pub mod repository;

use std::sync::Arc;
use thiserror::Error;

use crate::domain::{Game, GameRelease, Platform};

pub use release_platforms::ReleasePlatformRepository;
pub use repository::{CatalogRecord, Repository};

/// Container for all repository trait objects.
///
/// Adapters wire repositories through this struct without depending on
/// concrete implementations.
#[derive(Clone)]
pub struct Repos {
    pub games: Arc<dyn Repository<Game>>,
    pub platforms: Arc<dyn Repository<Platform>>,
    /// Release writes also rewrite the release's platform links.
    pub releases: Arc<dyn Repository<GameRelease>>,
    pub release_platforms: Arc<dyn ReleasePlatformRepository>,
}

impl Repos {
    pub fn new(
        games: Arc<dyn Repository<Game>>,
        platforms: Arc<dyn Repository<Platform>>,
        releases: Arc<dyn Repository<GameRelease>>,
        release_platforms: Arc<dyn ReleasePlatformRepository>,
    ) -> Self {
        Self {
            games,
            platforms,
            releases,
            release_platforms,
        }
    }
}

/// Classified failure of a repository operation.
///
/// Store failures are classified once, where they occur, and returned to
/// the caller unchanged from then on.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The referenced row does not exist, a write touched a number of rows
    /// other than one, or a write referenced a missing foreign row.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint rejected the write.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// A list query was built without a deterministic ordering. This is a
    /// defect in the calling code and is detected before any SQL runs.
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Any other storage failure, passed through as-is.
    #[error(transparent)]
    Unclassified(Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn unclassified(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Unclassified(err.into())
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub const fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }
}
