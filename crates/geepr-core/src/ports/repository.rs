//! Generic catalog repository port.
//!
//! Every catalog record (games, platforms, releases) is served by the same
//! five operations. A record type declares its draft, filter and sort types
//! through [`CatalogRecord`]; the port is then instantiated once per record.

use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::{Page, PageRequest};

/// Capability set of a record served by a [`Repository`].
pub trait CatalogRecord: Clone + Send + Sync + 'static {
    /// Payload for `add` and the full replacement for `update`.
    type Draft: Send + Sync;
    /// List filter; `Default` matches every row.
    type Filter: Default + Send + Sync;
    /// List ordering; `Default` orders by identifier.
    type Sort: Copy + Default + Send + Sync;

    /// Human-readable record name used in error messages.
    const NAME: &'static str;
}

/// Repository for one kind of catalog record.
///
/// # Design Rules
///
/// - `update` is a full replace keyed by id, never a partial patch
/// - `update` and `delete` must touch exactly one row, otherwise `NotFound`
/// - `list` always reports the total matching count alongside the page
#[async_trait]
pub trait Repository<R: CatalogRecord>: Send + Sync {
    /// List one page of records matching `filter`, ordered by `sort`.
    async fn list(
        &self,
        filter: &R::Filter,
        page: PageRequest,
        sort: R::Sort,
    ) -> Result<Page<R>, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if the record doesn't exist.
    async fn get_by_id(&self, id: Uuid) -> Result<R, RepositoryError>;

    /// Insert a new record and return it with its store-assigned id.
    async fn add(&self, draft: &R::Draft) -> Result<R, RepositoryError>;

    /// Replace the record with `id` and return the replacement.
    async fn update(&self, id: Uuid, draft: &R::Draft) -> Result<R, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
