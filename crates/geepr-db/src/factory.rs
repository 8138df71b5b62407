//! Composition utilities for wiring the catalog with `SQLite` backends.
//!
//! This module is focused purely on construction and should not contain
//! any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use geepr_core::{Game, Platform, Repos};

use crate::repositories::{
    SqliteReleasePlatformRepository, SqliteReleaseRepository, SqliteRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    /// Returns a `Repos` struct from `geepr-core` containing trait-object
    /// wrapped repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteRepository::<Game>::new(pool.clone())),
            Arc::new(SqliteRepository::<Platform>::new(pool.clone())),
            Arc::new(SqliteReleaseRepository::new(pool.clone())),
            Arc::new(SqliteReleasePlatformRepository::new(pool)),
        )
    }

    /// Build repositories over a fresh in-memory database.
    #[cfg(any(test, feature = "test-utils"))]
    pub async fn build_test_repos() -> anyhow::Result<Repos> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self::build_repos(pool))
    }
}
