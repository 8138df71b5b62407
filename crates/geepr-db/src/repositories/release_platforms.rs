//! `SQLite` implementation of the release/platform relation.
//!
//! The link functions work on a bare connection so the release repository
//! can rewrite a release's platform set inside its own transaction.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use uuid::Uuid;

use geepr_core::{GameReleasePlatform, ReleasePlatformRepository, RepositoryError};

use crate::classify::{StoreOp, classify};

const LINK: &str = "release platform link";

/// `SQLite` implementation of the release/platform relation.
#[derive(Clone)]
pub struct SqliteReleasePlatformRepository {
    pool: SqlitePool,
}

impl SqliteReleasePlatformRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn connection(&self, op: StoreOp) -> Result<PoolConnection<Sqlite>, RepositoryError> {
        self.pool.acquire().await.map_err(|e| classify(op, LINK, e))
    }
}

#[async_trait]
impl ReleasePlatformRepository for SqliteReleasePlatformRepository {
    async fn platform_ids_for_release(
        &self,
        release_id: Uuid,
    ) -> Result<BTreeSet<Uuid>, RepositoryError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "select platform_id from game_release_platforms where game_release_id = $1",
        )
        .bind(release_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(StoreOp::Read, LINK, e))?;
        Ok(ids.into_iter().collect())
    }

    async fn release_ids_for_platform(
        &self,
        platform_id: Uuid,
    ) -> Result<BTreeSet<Uuid>, RepositoryError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "select game_release_id from game_release_platforms where platform_id = $1",
        )
        .bind(platform_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(StoreOp::Read, LINK, e))?;
        Ok(ids.into_iter().collect())
    }

    async fn link(&self, link: GameReleasePlatform) -> Result<(), RepositoryError> {
        let mut conn = self.connection(StoreOp::Write).await?;
        insert_link(&mut conn, link).await
    }

    async fn unlink(&self, link: GameReleasePlatform) -> Result<(), RepositoryError> {
        let mut conn = self.connection(StoreOp::Delete).await?;
        let removed = sqlx::query(
            "delete from game_release_platforms where game_release_id = $1 and platform_id = $2",
        )
        .bind(link.game_release_id)
        .bind(link.platform_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| classify(StoreOp::Delete, LINK, e))?
        .rows_affected();

        if removed == 1 {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(format!(
                "release {} is not linked to platform {}",
                link.game_release_id, link.platform_id
            )))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Connection-level operations
// ─────────────────────────────────────────────────────────────────────────────

/// Insert one pair. An existing pair is `DuplicateKey`; a missing release
/// or platform is `NotFound`.
pub(crate) async fn insert_link(
    conn: &mut SqliteConnection,
    link: GameReleasePlatform,
) -> Result<(), RepositoryError> {
    sqlx::query("insert into game_release_platforms (game_release_id, platform_id) values ($1, $2)")
        .bind(link.game_release_id)
        .bind(link.platform_id)
        .execute(conn)
        .await
        .map_err(|e| classify(StoreOp::Write, LINK, e))?;
    Ok(())
}

/// Link a release to every platform in `platform_ids`, stopping at the
/// first failure.
pub(crate) async fn link_all(
    conn: &mut SqliteConnection,
    release_id: Uuid,
    platform_ids: &BTreeSet<Uuid>,
) -> Result<(), RepositoryError> {
    for platform_id in platform_ids {
        insert_link(&mut *conn, GameReleasePlatform::new(release_id, *platform_id)).await?;
    }
    Ok(())
}

/// Remove every link of a release. Succeeds when there were none.
pub(crate) async fn unlink_all(
    conn: &mut SqliteConnection,
    release_id: Uuid,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query("delete from game_release_platforms where game_release_id = $1")
        .bind(release_id)
        .execute(conn)
        .await
        .map_err(|e| classify(StoreOp::Delete, LINK, e))?;
    Ok(result.rows_affected())
}
