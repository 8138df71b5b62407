//! Structured list queries.
//!
//! A [`SelectQuery`] keeps its parts (projection, source, predicates,
//! ordering) apart until it is rendered. Filter clauses are only added
//! when their value is set, placeholders are numbered at render time, and
//! pagination produces both the page query and the matching count query
//! from the same parts.
//!
//! Projection expressions must not carry placeholders of their own: the
//! page query and the count query share one argument list, and only the
//! page query renders the projection.

use chrono::{DateTime, Utc};
use sqlx::Arguments;
use sqlx::sqlite::SqliteArguments;
use uuid::Uuid;

use geepr_core::{PageRequest, RepositoryError};

// ─────────────────────────────────────────────────────────────────────────────
// Bound values
// ─────────────────────────────────────────────────────────────────────────────

/// A value bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    OptionalText(Option<String>),
    Id(Uuid),
    Bool(bool),
    Timestamp(Option<DateTime<Utc>>),
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        Self::OptionalText(value)
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        Self::Id(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Option<DateTime<Utc>>> for SqlValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        Self::Timestamp(value)
    }
}

/// Collect values into an argument list, in placeholder order.
pub fn bind_all<'q>(
    values: impl IntoIterator<Item = SqlValue>,
) -> Result<SqliteArguments<'q>, RepositoryError> {
    let mut args = SqliteArguments::default();
    for value in values {
        let added = match value {
            SqlValue::Text(text) => args.add(text),
            SqlValue::OptionalText(text) => args.add(text),
            SqlValue::Id(id) => args.add(id),
            SqlValue::Bool(flag) => args.add(flag),
            SqlValue::Timestamp(at) => args.add(at),
        };
        added.map_err(RepositoryError::Unclassified)?;
    }
    Ok(args)
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter value predicates
// ─────────────────────────────────────────────────────────────────────────────

/// Text counts as set unless it is empty or the bare `%%` wildcard that an
/// empty search term turns into.
pub fn is_text_set<S: AsRef<str>>(value: &S) -> bool {
    let value = value.as_ref();
    !value.is_empty() && value != "%%"
}

/// The nil UUID means "no id given".
pub fn is_id_set(value: &Uuid) -> bool {
    !value.is_nil()
}

/// Substring pattern for matching against an upper-cased column.
///
/// Upper-casing is ASCII-only to agree with SQLite's `upper()`.
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", term.to_ascii_uppercase())
}

// ─────────────────────────────────────────────────────────────────────────────
// Query
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    Like,
}

impl Comparison {
    const fn operator(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Like => "like",
        }
    }
}

#[derive(Debug, Clone)]
struct Predicate {
    column: &'static str,
    comparison: Comparison,
}

/// A single-table select, kept in parts until rendered.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    projection: Vec<&'static str>,
    source: &'static str,
    predicates: Vec<Predicate>,
    args: Vec<SqlValue>,
    ordering: Option<&'static str>,
    /// Unique column appended after `ordering` so equal sort keys still
    /// page in a fixed order.
    tiebreak: Option<&'static str>,
}

/// The two statements behind one list call, sharing `args`.
#[derive(Debug, Clone)]
pub struct PagedQuery {
    pub page_sql: String,
    pub count_sql: String,
    pub args: Vec<SqlValue>,
    /// The request after clamping.
    pub page: PageRequest,
}

impl SelectQuery {
    pub fn new(source: &'static str, projection: &[&'static str]) -> Self {
        Self {
            projection: projection.to_vec(),
            source,
            predicates: Vec::new(),
            args: Vec::new(),
            ordering: None,
            tiebreak: None,
        }
    }

    /// Add `column <op> $n` when `is_set(&value)` holds; otherwise the
    /// query is returned untouched.
    #[must_use]
    pub fn filter<T>(
        mut self,
        column: &'static str,
        comparison: Comparison,
        value: T,
        is_set: impl FnOnce(&T) -> bool,
    ) -> Self
    where
        T: Into<SqlValue>,
    {
        if is_set(&value) {
            self.predicates.push(Predicate { column, comparison });
            self.args.push(value.into());
        }
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: &'static str) -> Self {
        self.ordering = Some(column);
        self
    }

    /// Break ties in the ordering with `column`. Ignored when it is the
    /// ordering column itself.
    #[must_use]
    pub fn then_by(mut self, column: &'static str) -> Self {
        self.tiebreak = Some(column);
        self
    }

    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }

    /// The full select, without paging.
    pub fn to_sql(&self) -> String {
        let mut sql = format!(
            "select {} from {}{}",
            self.projection.join(", "),
            self.source,
            self.where_clause()
        );
        if let Some(column) = self.ordering {
            sql.push_str(" order by ");
            sql.push_str(column);
            if let Some(tiebreak) = self.tiebreak.filter(|t| *t != column) {
                sql.push_str(", ");
                sql.push_str(tiebreak);
            }
        }
        sql
    }

    /// Render the page query and its count query.
    ///
    /// Fails with `InvalidPagination` when no ordering was set: paging an
    /// unordered result gives no stable pages.
    pub fn paginate(self, request: PageRequest) -> Result<PagedQuery, RepositoryError> {
        if self.ordering.is_none() {
            return Err(RepositoryError::InvalidPagination(format!(
                "query on {} has no ordering",
                self.source
            )));
        }

        let page = request.normalized();
        let page_sql = format!(
            "{} limit {} offset {}",
            self.to_sql(),
            page.size,
            page.offset()
        );
        let count_sql = format!("select count(*) from {}{}", self.source, self.where_clause());

        Ok(PagedQuery {
            page_sql,
            count_sql,
            args: self.args,
            page,
        })
    }

    fn where_clause(&self) -> String {
        self.predicates
            .iter()
            .enumerate()
            .map(|(index, predicate)| {
                format!(
                    " {} {} {} ${}",
                    if index == 0 { "where" } else { "and" },
                    predicate.column,
                    predicate.comparison.operator(),
                    index + 1
                )
            })
            .collect()
    }
}
