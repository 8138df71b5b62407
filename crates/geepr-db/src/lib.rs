#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

pub mod classify;
pub mod factory;
pub mod query;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export repository implementations
pub use repositories::{
    ReleaseCoordinator, SqliteReleasePlatformRepository, SqliteReleaseRepository,
    SqliteRepository,
};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;

// The bundled SQLite build is linked through sqlx; the direct dependency
// only selects its features.
use libsqlite3_sys as _;
