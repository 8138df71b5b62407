//! Generic `SQLite` repository for catalog records.
//!
//! One implementation serves every [`SqlRecord`]. The row-level write
//! functions take a bare connection so the release repository can run
//! them inside its own transaction.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use geepr_core::{Page, PageRequest, Repository, RepositoryError};

use super::records::{SqlRecord, StandaloneRecord};
use crate::classify::{StoreOp, classify, expect_single_row};
use crate::query::{SqlValue, bind_all};

/// `SQLite` repository for one record type.
pub struct SqliteRepository<R> {
    pool: SqlitePool,
    _record: PhantomData<fn() -> R>,
}

impl<R> SqliteRepository<R> {
    /// Create a new repository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

impl<R> Clone for SqliteRepository<R> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<R: SqlRecord> SqliteRepository<R> {
    /// Run a page query and its count query.
    pub async fn list_records(
        &self,
        filter: &R::Filter,
        page: PageRequest,
        sort: R::Sort,
    ) -> Result<Page<R>, RepositoryError> {
        let paged = R::apply_filter(R::select(), filter)
            .order_by(R::sort_column(sort))
            .then_by("id")
            .paginate(page)?;

        let rows = sqlx::query_as_with::<_, R::Row, _>(
            &paged.page_sql,
            bind_all(paged.args.iter().cloned())?,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(StoreOp::Read, R::NAME, e))?;

        let total: i64 = sqlx::query_scalar_with(&paged.count_sql, bind_all(paged.args)?)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(StoreOp::Read, R::NAME, e))?;

        Ok(Page {
            items: rows.into_iter().map(R::from_row).collect::<Result<_, _>>()?,
            total: total.unsigned_abs(),
            index: paged.page.index,
            size: paged.page.size,
        })
    }

    pub async fn fetch_record(&self, id: Uuid) -> Result<R, RepositoryError> {
        let sql = format!("{} where id = $1", R::select().to_sql());
        let row = sqlx::query_as_with::<_, R::Row, _>(&sql, bind_all([SqlValue::Id(id)])?)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(StoreOp::Read, R::NAME, e))?;
        R::from_row(row)
    }
}

#[async_trait]
impl<R: StandaloneRecord> Repository<R> for SqliteRepository<R> {
    async fn list(
        &self,
        filter: &R::Filter,
        page: PageRequest,
        sort: R::Sort,
    ) -> Result<Page<R>, RepositoryError> {
        self.list_records(filter, page, sort).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<R, RepositoryError> {
        self.fetch_record(id).await
    }

    async fn add(&self, draft: &R::Draft) -> Result<R, RepositoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| classify(StoreOp::Write, R::NAME, e))?;
        let id = insert_row::<R>(&mut conn, draft).await?;
        Ok(R::persisted(id, draft))
    }

    async fn update(&self, id: Uuid, draft: &R::Draft) -> Result<R, RepositoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| classify(StoreOp::Write, R::NAME, e))?;
        update_row::<R>(&mut conn, id, draft).await?;
        Ok(R::persisted(id, draft))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| classify(StoreOp::Delete, R::NAME, e))?;
        delete_row::<R>(&mut conn, id).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Row-level writes
// ─────────────────────────────────────────────────────────────────────────────

/// `$1, $2, ..., $n`
fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Insert a row and return the id the store assigned to it.
pub(crate) async fn insert_row<R: SqlRecord>(
    conn: &mut SqliteConnection,
    draft: &R::Draft,
) -> Result<Uuid, RepositoryError> {
    let sql = format!(
        "insert into {} ({}) values ({}) returning id",
        R::TABLE,
        R::WRITE_COLUMNS.join(", "),
        placeholders(R::WRITE_COLUMNS.len())
    );
    sqlx::query_scalar_with(&sql, bind_all(R::write_values(draft))?)
        .fetch_one(conn)
        .await
        .map_err(|e| classify(StoreOp::Write, R::NAME, e))
}

/// Overwrite every written column of the row with `id`.
pub(crate) async fn update_row<R: SqlRecord>(
    conn: &mut SqliteConnection,
    id: Uuid,
    draft: &R::Draft,
) -> Result<(), RepositoryError> {
    let assignments = R::WRITE_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{column} = ${}", index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "update {} set {assignments} where id = ${}",
        R::TABLE,
        R::WRITE_COLUMNS.len() + 1
    );

    let mut values = R::write_values(draft);
    values.push(SqlValue::Id(id));

    let result = sqlx::query_with(&sql, bind_all(values)?)
        .execute(conn)
        .await
        .map_err(|e| classify(StoreOp::Write, R::NAME, e))?;
    expect_single_row(result.rows_affected(), R::NAME, id)
}

pub(crate) async fn delete_row<R: SqlRecord>(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<(), RepositoryError> {
    let sql = format!("delete from {} where id = $1", R::TABLE);
    let result = sqlx::query_with(&sql, bind_all([SqlValue::Id(id)])?)
        .execute(conn)
        .await
        .map_err(|e| classify(StoreOp::Delete, R::NAME, e))?;
    expect_single_row(result.rows_affected(), R::NAME, id)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use geepr_core::{Game, GameFilter, GameSort, NewGame, NewPlatform, Platform, PlatformFilter};

    async fn games() -> SqliteRepository<Game> {
        SqliteRepository::new(setup_test_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_add_then_get_by_id() {
        let repo = games().await;
        let added = repo
            .add(&NewGame::new("Hollow Knight").with_description("Bugs"))
            .await
            .unwrap();

        assert!(!added.id.is_nil());
        assert_eq!(repo.get_by_id(added.id).await.unwrap(), added);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = games().await;
        let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let repo = games().await;
        let added = repo
            .add(&NewGame::new("Celeste").with_description("Mountain"))
            .await
            .unwrap();

        let updated = repo
            .update(added.id, &NewGame::new("Celeste DX").archived(true))
            .await
            .unwrap();
        let stored = repo.get_by_id(added.id).await.unwrap();

        assert_eq!(stored, updated);
        assert_eq!(stored.description, None);
        assert!(stored.archived);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let repo = games().await;
        let missing = Uuid::new_v4();

        assert!(
            repo.update(missing, &NewGame::new("Ghost"))
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(repo.delete(missing).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = games().await;
        let added = repo.add(&NewGame::new("Braid")).await.unwrap();

        repo.delete(added.id).await.unwrap();
        assert!(repo.get_by_id(added.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_filters_case_insensitively_and_counts() {
        let repo = games().await;
        for title in ["Zelda: Breath of the Wild", "Zelda: Tears of the Kingdom", "Metroid"] {
            repo.add(&NewGame::new(title)).await.unwrap();
        }

        let filter = GameFilter {
            title: "zelda".to_string(),
        };
        let page = repo
            .list(&filter, PageRequest::new(1, 1), GameSort::Title)
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Zelda: Breath of the Wild");

        let second = repo
            .list(&filter, PageRequest::new(2, 1), GameSort::Title)
            .await
            .unwrap();
        assert_eq!(second.items[0].title, "Zelda: Tears of the Kingdom");
    }

    #[tokio::test]
    async fn test_list_with_out_of_range_page_is_clamped() {
        let repo = games().await;
        repo.add(&NewGame::new("Tetris")).await.unwrap();

        let page = repo
            .list(&GameFilter::default(), PageRequest::new(0, 0), GameSort::Id)
            .await
            .unwrap();

        assert_eq!((page.index, page.size), (1, 10));
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_list_far_past_the_end_is_empty() {
        let repo = games().await;
        repo.add(&NewGame::new("Myst")).await.unwrap();

        let page = repo
            .list(&GameFilter::default(), PageRequest::new(i64::MAX, 2), GameSort::Id)
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
        assert_eq!(page.index, i64::MAX);
    }

    #[tokio::test]
    async fn test_equal_sort_keys_page_in_id_order() {
        let repo = games().await;
        let mut ids = Vec::new();
        for _ in 0..4 {
            ids.push(repo.add(&NewGame::new("Doom")).await.unwrap().id);
        }
        ids.sort();

        let mut paged = Vec::new();
        for index in 1..=4 {
            let page = repo
                .list(&GameFilter::default(), PageRequest::new(index, 1), GameSort::Title)
                .await
                .unwrap();
            paged.extend(page.items.into_iter().map(|game| game.id));
        }

        assert_eq!(paged, ids);
    }

    #[tokio::test]
    async fn test_duplicate_platform_is_duplicate_key() {
        let repo = SqliteRepository::<Platform>::new(setup_test_database().await.unwrap());
        let draft = NewPlatform::new("Nintendo Switch", "NS");

        repo.add(&draft).await.unwrap();
        let err = repo.add(&draft).await.unwrap_err();

        assert!(err.is_duplicate_key());
        let page = repo
            .list(&PlatformFilter::default(), PageRequest::default(), Default::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(3), "$1, $2, $3");
    }
}
