//! The `IssueStore` trait.
//!
//! Implemented by storage backends (e.g. `health-store-sqlite`). Intake and
//! the dashboard reader depend on this abstraction and receive the store as
//! an explicit handle; nothing holds a process-wide connection.

use std::future::Future;

use crate::{
  facility::Facility,
  issue::{Coordinates, IssueReport, IssueType, NewIssue},
};

/// Matching rows and their count, read as one consistent view.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueSnapshot {
  pub rows:        Vec<IssueReport>,
  pub total_count: u64,
}

/// Durable, queryable persistence for issue reports and facilities.
///
/// Issue reports are append-only: there is no update or delete. Each insert
/// is atomic.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait IssueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a geocoded issue and return the id assigned to it.
  fn insert_issue(
    &self,
    issue: NewIssue,
    at: Coordinates,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Retrieve one issue by id. Returns `None` if not found.
  fn get_issue(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<IssueReport>, Self::Error>> + Send + '_;

  /// All issues in insertion order, optionally only those of one type.
  fn list_issues(
    &self,
    issue_type: Option<IssueType>,
  ) -> impl Future<Output = Result<Vec<IssueReport>, Self::Error>> + Send + '_;

  /// Number of issues matching the same predicate as
  /// [`list_issues`](Self::list_issues).
  fn count_issues(
    &self,
    issue_type: Option<IssueType>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// [`list_issues`](Self::list_issues) and
  /// [`count_issues`](Self::count_issues) for the same predicate, read
  /// together so no concurrent insert can land between them.
  fn snapshot_issues(
    &self,
    issue_type: Option<IssueType>,
  ) -> impl Future<Output = Result<IssueSnapshot, Self::Error>> + Send + '_;

  /// All facilities. Nothing in the current flows writes them.
  fn list_facilities(
    &self,
  ) -> impl Future<Output = Result<Vec<Facility>, Self::Error>> + Send + '_;
}
