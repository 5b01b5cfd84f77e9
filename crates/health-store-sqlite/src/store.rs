//! [`SqliteStore`]: the SQLite implementation of [`IssueStore`].

use std::path::Path;

use health_core::{
  facility::Facility,
  issue::{Coordinates, IssueReport, IssueType, NewIssue},
  store::{IssueSnapshot, IssueStore},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{ISSUE_COLUMNS, RawFacility, RawIssue, encode_issue_type},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An issue store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. The
/// connection closes when the last clone is dropped.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and initialise the schema.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.initialize_schema().await?;
    tracing::debug!(path = %path.display(), "opened issue store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.initialize_schema().await?;
    Ok(store)
  }

  /// Create both tables if they are absent. Safe to call repeatedly.
  pub async fn initialize_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// `WHERE` clause for an optional type predicate bound to `?1`.
fn type_clause(type_str: &Option<String>) -> &'static str {
  if type_str.is_some() { "WHERE type = ?1" } else { "" }
}

fn select_issues(
  conn: &rusqlite::Connection,
  type_str: &Option<String>,
) -> rusqlite::Result<Vec<RawIssue>> {
  let sql = format!(
    "SELECT {ISSUE_COLUMNS} FROM issues {} ORDER BY id",
    type_clause(type_str),
  );
  let mut stmt = conn.prepare(&sql)?;
  stmt
    .query_map(rusqlite::params_from_iter(type_str.iter()), RawIssue::from_row)?
    .collect()
}

fn select_count(
  conn: &rusqlite::Connection,
  type_str: &Option<String>,
) -> rusqlite::Result<i64> {
  let sql = format!("SELECT COUNT(*) FROM issues {}", type_clause(type_str));
  conn.query_row(&sql, rusqlite::params_from_iter(type_str.iter()), |row| {
    row.get(0)
  })
}

fn decode_count(count: i64) -> Result<u64> {
  u64::try_from(count).map_err(|_| Error::InvalidCount(count))
}

// ─── IssueStore impl ─────────────────────────────────────────────────────────

impl IssueStore for SqliteStore {
  type Error = Error;

  async fn insert_issue(&self, issue: NewIssue, at: Coordinates) -> Result<i64> {
    let type_str = encode_issue_type(issue.issue_type).to_owned();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO issues (type, location, description, lat, lon)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            type_str,
            issue.location,
            issue.description,
            at.latitude,
            at.longitude,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn get_issue(&self, id: i64) -> Result<Option<IssueReport>> {
    let raw: Option<RawIssue> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1"),
              rusqlite::params![id],
              RawIssue::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawIssue::into_report).transpose()
  }

  async fn list_issues(
    &self,
    issue_type: Option<IssueType>,
  ) -> Result<Vec<IssueReport>> {
    let type_str = issue_type.map(encode_issue_type).map(str::to_owned);

    let raws = self
      .conn
      .call(move |conn| Ok(select_issues(conn, &type_str)?))
      .await?;

    raws.into_iter().map(RawIssue::into_report).collect()
  }

  async fn count_issues(&self, issue_type: Option<IssueType>) -> Result<u64> {
    let type_str = issue_type.map(encode_issue_type).map(str::to_owned);

    let count = self
      .conn
      .call(move |conn| Ok(select_count(conn, &type_str)?))
      .await?;

    decode_count(count)
  }

  async fn snapshot_issues(
    &self,
    issue_type: Option<IssueType>,
  ) -> Result<IssueSnapshot> {
    let type_str = issue_type.map(encode_issue_type).map(str::to_owned);

    let (raws, count) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raws = select_issues(&tx, &type_str)?;
        let count = select_count(&tx, &type_str)?;
        tx.commit()?;
        Ok((raws, count))
      })
      .await?;

    Ok(IssueSnapshot {
      rows:        raws
        .into_iter()
        .map(RawIssue::into_report)
        .collect::<Result<_>>()?,
      total_count: decode_count(count)?,
    })
  }

  async fn list_facilities(&self) -> Result<Vec<Facility>> {
    let raws: Vec<RawFacility> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name, address FROM facilities ORDER BY id")?;
        let rows = stmt
          .query_map([], RawFacility::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawFacility::into_facility).collect())
  }
}
