//! `SQLite` repository for game releases.
//!
//! Reads go through the generic [`SqliteRepository`]. Writes change the
//! release row and its platform links together, so they run in one
//! transaction driven by [`ReleaseCoordinator`].

use async_trait::async_trait;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use uuid::Uuid;

use geepr_core::{
    CatalogRecord, GameRelease, NewGameRelease, Page, PageRequest, ReleaseFilter, ReleaseSort,
    Repository, RepositoryError,
};

use super::records::SqlRecord;
use super::release_platforms::{link_all, unlink_all};
use super::sqlite_repository::{SqliteRepository, delete_row, insert_row, update_row};
use crate::classify::{StoreOp, classify};

/// Runs release writes and their link rewrites as single transactions.
///
/// Each operation either commits every step or rolls all of them back and
/// returns the error of the step that failed.
#[derive(Clone)]
pub struct ReleaseCoordinator {
    pool: SqlitePool,
}

impl ReleaseCoordinator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the release, then link it to each of its platforms.
    pub async fn create(&self, draft: &NewGameRelease) -> Result<Uuid, RepositoryError> {
        let mut tx = self.begin(StoreOp::Write).await?;
        let outcome = create_steps(&mut *tx, draft).await;
        finish(tx, StoreOp::Write, outcome).await
    }

    /// Replace the release row, drop all of its links, then link the new
    /// platform set.
    pub async fn replace(&self, id: Uuid, draft: &NewGameRelease) -> Result<(), RepositoryError> {
        let mut tx = self.begin(StoreOp::Write).await?;
        let outcome = replace_steps(&mut *tx, id, draft).await;
        finish(tx, StoreOp::Write, outcome).await
    }

    /// Drop the release's links, then the release itself.
    pub async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tx = self.begin(StoreOp::Delete).await?;
        let outcome = remove_steps(&mut *tx, id).await;
        finish(tx, StoreOp::Delete, outcome).await
    }

    async fn begin(&self, op: StoreOp) -> Result<Transaction<'static, Sqlite>, RepositoryError> {
        self.pool
            .begin()
            .await
            .map_err(|e| classify(op, GameRelease::NAME, e))
    }
}

async fn create_steps(
    conn: &mut SqliteConnection,
    draft: &NewGameRelease,
) -> Result<Uuid, RepositoryError> {
    let id = insert_row::<GameRelease>(&mut *conn, draft).await?;
    link_all(conn, id, &draft.platform_ids).await?;
    Ok(id)
}

async fn replace_steps(
    conn: &mut SqliteConnection,
    id: Uuid,
    draft: &NewGameRelease,
) -> Result<(), RepositoryError> {
    update_row::<GameRelease>(&mut *conn, id, draft).await?;
    unlink_all(&mut *conn, id).await?;
    link_all(conn, id, &draft.platform_ids).await
}

async fn remove_steps(conn: &mut SqliteConnection, id: Uuid) -> Result<(), RepositoryError> {
    unlink_all(&mut *conn, id).await?;
    delete_row::<GameRelease>(conn, id).await
}

/// Commit on success. On failure roll back and hand back the step's error.
async fn finish<T>(
    tx: Transaction<'static, Sqlite>,
    op: StoreOp,
    outcome: Result<T, RepositoryError>,
) -> Result<T, RepositoryError> {
    match outcome {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| classify(op, GameRelease::NAME, e))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Failed to roll back {} write: {rollback_err}", GameRelease::NAME);
            }
            Err(err)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

/// `SQLite` repository for game releases.
#[derive(Clone)]
pub struct SqliteReleaseRepository {
    records: SqliteRepository<GameRelease>,
    coordinator: ReleaseCoordinator,
}

impl SqliteReleaseRepository {
    /// Create a new release repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            records: SqliteRepository::new(pool.clone()),
            coordinator: ReleaseCoordinator::new(pool),
        }
    }
}

#[async_trait]
impl Repository<GameRelease> for SqliteReleaseRepository {
    async fn list(
        &self,
        filter: &ReleaseFilter,
        page: PageRequest,
        sort: ReleaseSort,
    ) -> Result<Page<GameRelease>, RepositoryError> {
        self.records.list_records(filter, page, sort).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<GameRelease, RepositoryError> {
        self.records.fetch_record(id).await
    }

    async fn add(&self, draft: &NewGameRelease) -> Result<GameRelease, RepositoryError> {
        let id = self.coordinator.create(draft).await?;
        Ok(GameRelease::persisted(id, draft))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &NewGameRelease,
    ) -> Result<GameRelease, RepositoryError> {
        self.coordinator.replace(id, draft).await?;
        Ok(GameRelease::persisted(id, draft))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.coordinator.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use chrono::{TimeZone, Utc};
    use geepr_core::{Game, NewGame, NewPlatform, Platform, ReleasePlatformRepository};
    use std::collections::BTreeSet;

    use crate::repositories::SqliteReleasePlatformRepository;

    struct Catalog {
        pool: SqlitePool,
        releases: SqliteReleaseRepository,
        game: Game,
        platforms: Vec<Platform>,
    }

    async fn catalog() -> Catalog {
        let pool = setup_test_database().await.unwrap();
        let game = SqliteRepository::<Game>::new(pool.clone())
            .add(&NewGame::new("Stardew Valley"))
            .await
            .unwrap();

        let platform_repo = SqliteRepository::<Platform>::new(pool.clone());
        let mut platforms = Vec::new();
        for (name, short) in [("Windows", "PC"), ("PlayStation 4", "PS4"), ("Xbox One", "XB1")] {
            platforms.push(platform_repo.add(&NewPlatform::new(name, short)).await.unwrap());
        }

        Catalog {
            releases: SqliteReleaseRepository::new(pool.clone()),
            pool,
            game,
            platforms,
        }
    }

    async fn link_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("select count(*) from game_release_platforms")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn release_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("select count(*) from game_releases")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_links_every_platform() {
        let c = catalog().await;
        let draft = NewGameRelease::new(c.game.id)
            .with_title_override("Stardew Valley (Console)")
            .with_release_date(Utc.with_ymd_and_hms(2016, 12, 13, 0, 0, 0).unwrap())
            .with_platforms([c.platforms[1].id, c.platforms[2].id]);

        let added = c.releases.add(&draft).await.unwrap();
        let fetched = c.releases.get_by_id(added.id).await.unwrap();

        assert_eq!(fetched, added);
        assert_eq!(
            fetched.platform_ids,
            BTreeSet::from([c.platforms[1].id, c.platforms[2].id])
        );
    }

    #[tokio::test]
    async fn test_add_with_unknown_platform_leaves_nothing_behind() {
        let c = catalog().await;
        let draft = NewGameRelease::new(c.game.id)
            .with_platforms([c.platforms[0].id, Uuid::new_v4()]);

        let err = c.releases.add(&draft).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(release_count(&c.pool).await, 0);
        assert_eq!(link_count(&c.pool).await, 0);
    }

    #[tokio::test]
    async fn test_add_for_unknown_game_is_not_found() {
        let c = catalog().await;
        let err = c
            .releases
            .add(&NewGameRelease::new(Uuid::new_v4()))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(release_count(&c.pool).await, 0);
    }

    #[tokio::test]
    async fn test_update_replaces_platform_set() {
        let c = catalog().await;
        let added = c
            .releases
            .add(
                &NewGameRelease::new(c.game.id)
                    .with_platforms([c.platforms[0].id, c.platforms[1].id]),
            )
            .await
            .unwrap();

        let replacement = NewGameRelease::new(c.game.id)
            .with_description("Console port")
            .date_unknown(true)
            .with_platforms([c.platforms[1].id, c.platforms[2].id]);
        c.releases.update(added.id, &replacement).await.unwrap();

        let fetched = c.releases.get_by_id(added.id).await.unwrap();
        assert_eq!(fetched, GameRelease::persisted(added.id, &replacement));

        let links = SqliteReleasePlatformRepository::new(c.pool.clone());
        assert!(
            links
                .release_ids_for_platform(c.platforms[0].id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_state() {
        let c = catalog().await;
        let original = c
            .releases
            .add(
                &NewGameRelease::new(c.game.id)
                    .with_title_override("Original")
                    .with_platforms([c.platforms[0].id]),
            )
            .await
            .unwrap();

        let broken = NewGameRelease::new(c.game.id)
            .with_title_override("Changed")
            .with_platforms([c.platforms[2].id, Uuid::new_v4()]);
        let err = c.releases.update(original.id, &broken).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(c.releases.get_by_id(original.id).await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_update_missing_release_is_not_found() {
        let c = catalog().await;
        let err = c
            .releases
            .update(Uuid::new_v4(), &NewGameRelease::new(c.game.id))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_release_and_links() {
        let c = catalog().await;
        let added = c
            .releases
            .add(&NewGameRelease::new(c.game.id).with_platforms([c.platforms[0].id]))
            .await
            .unwrap();

        c.releases.delete(added.id).await.unwrap();

        assert!(c.releases.get_by_id(added.id).await.unwrap_err().is_not_found());
        assert_eq!(link_count(&c.pool).await, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_release_is_not_found() {
        let c = catalog().await;
        assert!(c.releases.delete(Uuid::new_v4()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_failed_row_delete_restores_links() {
        let c = catalog().await;
        let added = c
            .releases
            .add(
                &NewGameRelease::new(c.game.id)
                    .with_platforms([c.platforms[0].id, c.platforms[1].id]),
            )
            .await
            .unwrap();

        // The links are gone by the time the row delete runs; make it fail
        sqlx::query(
            "create trigger keep_releases before delete on game_releases \
             begin select raise(abort, 'release is locked'); end",
        )
        .execute(&c.pool)
        .await
        .unwrap();

        let err = c.releases.delete(added.id).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Unclassified(_)), "got {err:?}");
        assert_eq!(link_count(&c.pool).await, 2);
        assert_eq!(release_count(&c.pool).await, 1);
        assert_eq!(c.releases.get_by_id(added.id).await.unwrap(), added);
    }

    #[tokio::test]
    async fn test_deleting_linked_platform_is_unclassified() {
        let c = catalog().await;
        c.releases
            .add(&NewGameRelease::new(c.game.id).with_platforms([c.platforms[0].id]))
            .await
            .unwrap();

        let err = SqliteRepository::<Platform>::new(c.pool.clone())
            .delete(c.platforms[0].id)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Unclassified(_)));
    }

    #[tokio::test]
    async fn test_list_filters_by_game_and_sorts_by_date() {
        let c = catalog().await;
        let other_game = SqliteRepository::<Game>::new(c.pool.clone())
            .add(&NewGame::new("Terraria"))
            .await
            .unwrap();

        for (game_id, year) in [(c.game.id, 2018), (c.game.id, 2016), (other_game.id, 2011)] {
            c.releases
                .add(
                    &NewGameRelease::new(game_id)
                        .with_release_date(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap())
                        .with_platforms([c.platforms[0].id]),
                )
                .await
                .unwrap();
        }

        let filter = ReleaseFilter {
            game_id: c.game.id,
            ..ReleaseFilter::default()
        };
        let page = c
            .releases
            .list(&filter, PageRequest::default(), ReleaseSort::Date)
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        let years: Vec<_> = page
            .items
            .iter()
            .map(|release| release.release_date.map(|date| date.format("%Y").to_string()))
            .collect();
        assert_eq!(years, vec![Some("2016".to_string()), Some("2018".to_string())]);
        assert!(page.items.iter().all(|r| r.platform_ids.contains(&c.platforms[0].id)));
    }
}
