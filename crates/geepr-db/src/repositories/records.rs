//! Table layout and row codecs for each catalog record.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

use geepr_core::{
    CatalogRecord, Game, GameFilter, GameRelease, GameSort, NewGame, NewGameRelease,
    NewPlatform, Platform, PlatformFilter, PlatformSort, ReleaseFilter, ReleaseSort,
    RepositoryError,
};

use crate::query::{Comparison, SelectQuery, SqlValue, is_id_set, is_text_set, like_pattern};

/// How a catalog record is laid out in its table.
pub trait SqlRecord: CatalogRecord + Unpin {
    type Row: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin;

    const TABLE: &'static str;
    /// Read projection, matching the fields of `Row`.
    const COLUMNS: &'static [&'static str];
    /// Columns written by insert and update, in `write_values` order.
    const WRITE_COLUMNS: &'static [&'static str];

    fn from_row(row: Self::Row) -> Result<Self, RepositoryError>;

    fn write_values(draft: &Self::Draft) -> Vec<SqlValue>;

    /// The record a successful write of `draft` under `id` produces.
    fn persisted(id: Uuid, draft: &Self::Draft) -> Self;

    fn sort_column(sort: Self::Sort) -> &'static str;

    fn apply_filter(query: SelectQuery, filter: &Self::Filter) -> SelectQuery;

    fn select() -> SelectQuery {
        SelectQuery::new(Self::TABLE, Self::COLUMNS)
    }
}

/// Records whose writes touch only their own table.
pub trait StandaloneRecord: SqlRecord {}

// ─────────────────────────────────────────────────────────────────────────────
// Games
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
pub struct GameRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    archived: bool,
}

impl SqlRecord for Game {
    type Row = GameRow;

    const TABLE: &'static str = "games";
    const COLUMNS: &'static [&'static str] = &["id", "title", "description", "archived"];
    const WRITE_COLUMNS: &'static [&'static str] = &["title", "description", "archived"];

    fn from_row(row: GameRow) -> Result<Self, RepositoryError> {
        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            archived: row.archived,
        })
    }

    fn write_values(draft: &NewGame) -> Vec<SqlValue> {
        vec![
            draft.title.clone().into(),
            draft.description.clone().into(),
            draft.archived.into(),
        ]
    }

    fn persisted(id: Uuid, draft: &NewGame) -> Self {
        Self::from_draft(id, draft.clone())
    }

    fn sort_column(sort: GameSort) -> &'static str {
        match sort {
            GameSort::Id => "id",
            GameSort::Title => "title",
        }
    }

    fn apply_filter(query: SelectQuery, filter: &GameFilter) -> SelectQuery {
        query.filter(
            "title_normalised",
            Comparison::Like,
            like_pattern(&filter.title),
            is_text_set,
        )
    }
}

impl StandaloneRecord for Game {}

// ─────────────────────────────────────────────────────────────────────────────
// Platforms
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
pub struct PlatformRow {
    id: Uuid,
    name: String,
    short_name: String,
}

impl SqlRecord for Platform {
    type Row = PlatformRow;

    const TABLE: &'static str = "platforms";
    const COLUMNS: &'static [&'static str] = &["id", "name", "short_name"];
    const WRITE_COLUMNS: &'static [&'static str] = &["name", "short_name"];

    fn from_row(row: PlatformRow) -> Result<Self, RepositoryError> {
        Ok(Self {
            id: row.id,
            name: row.name,
            short_name: row.short_name,
        })
    }

    fn write_values(draft: &NewPlatform) -> Vec<SqlValue> {
        vec![draft.name.clone().into(), draft.short_name.clone().into()]
    }

    fn persisted(id: Uuid, draft: &NewPlatform) -> Self {
        Self::from_draft(id, draft.clone())
    }

    fn sort_column(sort: PlatformSort) -> &'static str {
        match sort {
            PlatformSort::Id => "id",
            PlatformSort::Name => "name",
            PlatformSort::ShortName => "short_name",
        }
    }

    fn apply_filter(query: SelectQuery, filter: &PlatformFilter) -> SelectQuery {
        query.filter(
            "name_normalised",
            Comparison::Like,
            like_pattern(&filter.name),
            is_text_set,
        )
    }
}

impl StandaloneRecord for Platform {}

// ─────────────────────────────────────────────────────────────────────────────
// Releases
// ─────────────────────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
pub struct GameReleaseRow {
    id: Uuid,
    game_id: Uuid,
    title_override: Option<String>,
    description: Option<String>,
    release_date: Option<DateTime<Utc>>,
    release_date_unknown: bool,
    /// JSON array of hex-encoded platform ids.
    platform_ids: String,
}

/// Decode the `platform_ids` aggregate of a release row.
fn parse_platform_ids(json: &str) -> Result<BTreeSet<Uuid>, RepositoryError> {
    let encoded: Vec<String> = serde_json::from_str(json).map_err(RepositoryError::unclassified)?;
    encoded
        .iter()
        .map(|hex| Uuid::parse_str(hex).map_err(RepositoryError::unclassified))
        .collect()
}

impl SqlRecord for GameRelease {
    type Row = GameReleaseRow;

    const TABLE: &'static str = "game_releases";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "game_id",
        "title_override",
        "description",
        "release_date",
        "release_date_unknown",
        "(select json_group_array(lower(hex(grp.platform_id))) from game_release_platforms grp \
         where grp.game_release_id = game_releases.id) as platform_ids",
    ];
    const WRITE_COLUMNS: &'static [&'static str] = &[
        "game_id",
        "title_override",
        "description",
        "release_date",
        "release_date_unknown",
    ];

    fn from_row(row: GameReleaseRow) -> Result<Self, RepositoryError> {
        Ok(Self {
            platform_ids: parse_platform_ids(&row.platform_ids)?,
            id: row.id,
            game_id: row.game_id,
            title_override: row.title_override,
            description: row.description,
            release_date: row.release_date,
            release_date_unknown: row.release_date_unknown,
        })
    }

    fn write_values(draft: &NewGameRelease) -> Vec<SqlValue> {
        vec![
            draft.game_id.into(),
            draft.title_override.clone().into(),
            draft.description.clone().into(),
            draft.release_date.into(),
            draft.release_date_unknown.into(),
        ]
    }

    fn persisted(id: Uuid, draft: &NewGameRelease) -> Self {
        Self::from_draft(id, draft.clone())
    }

    fn sort_column(sort: ReleaseSort) -> &'static str {
        match sort {
            ReleaseSort::Id => "id",
            ReleaseSort::Title => "title_override",
            ReleaseSort::Date => "release_date",
        }
    }

    fn apply_filter(query: SelectQuery, filter: &ReleaseFilter) -> SelectQuery {
        query
            .filter(
                "title_override_normalised",
                Comparison::Like,
                like_pattern(&filter.title),
                is_text_set,
            )
            .filter("game_id", Comparison::Equal, filter.game_id, is_id_set)
    }
}
