//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod records;
mod release_platforms;
mod releases;
mod sqlite_repository;

pub use records::{SqlRecord, StandaloneRecord};
pub use release_platforms::SqliteReleasePlatformRepository;
pub use releases::{ReleaseCoordinator, SqliteReleaseRepository};
pub use sqlite_repository::SqliteRepository;
