//! Port for the release/platform join relation.

use std::collections::BTreeSet;

use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::GameReleasePlatform;

/// Direct access to individual release/platform links.
///
/// Wholesale replacement of a release's platform set happens through the
/// release repository's `update`, not through this port.
#[async_trait]
pub trait ReleasePlatformRepository: Send + Sync {
    /// Platforms linked to a release. Empty when there are none, even if
    /// the release itself does not exist.
    async fn platform_ids_for_release(
        &self,
        release_id: Uuid,
    ) -> Result<BTreeSet<Uuid>, RepositoryError>;

    /// Releases linked to a platform.
    async fn release_ids_for_platform(
        &self,
        platform_id: Uuid,
    ) -> Result<BTreeSet<Uuid>, RepositoryError>;

    /// # Errors
    ///
    /// - `NotFound` if the release or the platform does not exist
    /// - `DuplicateKey` if the pair is already linked
    async fn link(&self, link: GameReleasePlatform) -> Result<(), RepositoryError>;

    /// # Errors
    ///
    /// - `NotFound` if the pair was not linked
    async fn unlink(&self, link: GameReleasePlatform) -> Result<(), RepositoryError>;
}
