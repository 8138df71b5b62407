//! Translation of `sqlx` failures into [`RepositoryError`].
//!
//! Every store call in this crate funnels its error through [`classify`]
//! exactly once. Callers above the repositories only ever see the
//! classified error.

use sqlx::error::ErrorKind;
use uuid::Uuid;

use geepr_core::RepositoryError;

/// The kind of statement that failed. A foreign-key violation means
/// different things depending on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Read,
    /// Insert or update.
    Write,
    Delete,
}

/// Classify a store failure.
///
/// | failure                                   | result          |
/// |-------------------------------------------|-----------------|
/// | no row where exactly one was expected     | `NotFound`      |
/// | foreign-key violation on insert or update | `NotFound`      |
/// | unique violation on insert or update      | `DuplicateKey`  |
/// | anything else                             | `Unclassified`  |
///
/// A foreign-key violation on delete means the row is still referenced,
/// which is neither a missing row nor a duplicate, so it stays
/// unclassified.
pub fn classify(op: StoreOp, record: &str, err: sqlx::Error) -> RepositoryError {
    if matches!(err, sqlx::Error::RowNotFound) {
        return RepositoryError::NotFound(format!("{record} not found"));
    }

    let kind = err.as_database_error().map(|db_err| db_err.kind());
    match (op, kind) {
        (StoreOp::Write, Some(ErrorKind::ForeignKeyViolation)) => {
            tracing::debug!("{record} write references a missing row: {err}");
            RepositoryError::NotFound(format!("{record} references a row that does not exist"))
        }
        (StoreOp::Write, Some(ErrorKind::UniqueViolation)) => {
            tracing::debug!("{record} write rejected as duplicate: {err}");
            RepositoryError::DuplicateKey(format!("{record} already exists"))
        }
        _ => {
            tracing::warn!("Unclassified {op:?} failure on {record}: {err}");
            RepositoryError::unclassified(err)
        }
    }
}

/// Check that a write touched exactly one row.
///
/// Zero rows means the id did not exist; more than one means the key is
/// not unique. Both are reported as `NotFound`.
pub fn expect_single_row(
    rows_affected: u64,
    record: &str,
    id: Uuid,
) -> Result<(), RepositoryError> {
    if rows_affected == 1 {
        Ok(())
    } else {
        Err(RepositoryError::NotFound(format!(
            "{record} {id} not found ({rows_affected} rows affected)"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn unique_violation() -> sqlx::Error {
        let pool = setup_test_database().await.unwrap();
        let insert = "insert into platforms (name, short_name) values ('PlayStation 5', 'PS5')";
        sqlx::query(insert).execute(&pool).await.unwrap();
        sqlx::query(insert).execute(&pool).await.unwrap_err()
    }

    async fn foreign_key_violation() -> sqlx::Error {
        let pool = setup_test_database().await.unwrap();
        sqlx::query("insert into game_releases (game_id) values ($1)")
            .bind(Uuid::new_v4())
            .execute(&pool)
            .await
            .unwrap_err()
    }

    #[test]
    fn test_row_not_found_is_not_found() {
        let err = classify(StoreOp::Read, "game", sqlx::Error::RowNotFound);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unique_violation_on_write_is_duplicate() {
        let err = classify(StoreOp::Write, "platform", unique_violation().await);
        assert!(err.is_duplicate_key());
    }

    #[tokio::test]
    async fn test_foreign_key_violation_on_write_is_not_found() {
        let err = classify(StoreOp::Write, "game release", foreign_key_violation().await);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_foreign_key_violation_on_delete_is_unclassified() {
        let err = classify(StoreOp::Delete, "platform", foreign_key_violation().await);
        assert!(matches!(err, RepositoryError::Unclassified(_)));
    }

    #[test]
    fn test_other_failures_are_unclassified() {
        let err = classify(StoreOp::Read, "game", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Unclassified(_)));
    }

    #[test]
    fn test_expect_single_row() {
        let id = Uuid::new_v4();
        assert!(expect_single_row(1, "game", id).is_ok());
        assert!(expect_single_row(0, "game", id).unwrap_err().is_not_found());
        assert!(expect_single_row(2, "game", id).unwrap_err().is_not_found());
    }
}
