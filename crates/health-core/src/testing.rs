//! In-memory doubles for the core traits, used by this crate's tests.

use std::{collections::HashMap, sync::Mutex};

use thiserror::Error;

use crate::{
  facility::Facility,
  geocode::Geocoder,
  issue::{Coordinates, IssueReport, IssueType, NewIssue},
  store::{IssueSnapshot, IssueStore},
};

#[derive(Debug, Error)]
#[error("backend unavailable")]
pub struct Unavailable;

#[derive(Default)]
pub struct MemoryStore {
  rows:   Mutex<Vec<IssueReport>>,
  broken: bool,
}

impl MemoryStore {
  pub fn broken() -> Self {
    Self { broken: true, ..Self::default() }
  }

  fn check(&self) -> Result<(), Unavailable> {
    if self.broken { Err(Unavailable) } else { Ok(()) }
  }
}

impl IssueStore for MemoryStore {
  type Error = Unavailable;

  async fn insert_issue(
    &self,
    issue: NewIssue,
    at: Coordinates,
  ) -> Result<i64, Unavailable> {
    self.check()?;
    let mut rows = self.rows.lock().unwrap();
    let id = rows.len() as i64 + 1;
    rows.push(IssueReport {
      id,
      issue_type:  issue.issue_type,
      location:    issue.location,
      description: issue.description,
      latitude:    at.latitude,
      longitude:   at.longitude,
    });
    Ok(id)
  }

  async fn get_issue(&self, id: i64) -> Result<Option<IssueReport>, Unavailable> {
    self.check()?;
    Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
  }

  async fn list_issues(
    &self,
    issue_type: Option<IssueType>,
  ) -> Result<Vec<IssueReport>, Unavailable> {
    self.check()?;
    Ok(
      self
        .rows
        .lock()
        .unwrap()
        .iter()
        .filter(|r| issue_type.is_none_or(|t| t == r.issue_type))
        .cloned()
        .collect(),
    )
  }

  async fn count_issues(
    &self,
    issue_type: Option<IssueType>,
  ) -> Result<u64, Unavailable> {
    Ok(self.list_issues(issue_type).await?.len() as u64)
  }

  async fn snapshot_issues(
    &self,
    issue_type: Option<IssueType>,
  ) -> Result<IssueSnapshot, Unavailable> {
    let rows = self.list_issues(issue_type).await?;
    let total_count = rows.len() as u64;
    Ok(IssueSnapshot { rows, total_count })
  }

  async fn list_facilities(&self) -> Result<Vec<Facility>, Unavailable> {
    self.check()?;
    Ok(Vec::new())
  }
}

pub struct TableGeocoder {
  places:      HashMap<&'static str, Coordinates>,
  unreachable: bool,
}

impl TableGeocoder {
  pub fn nairobi() -> Self {
    Self {
      places:      HashMap::from([("Nairobi", Coordinates::new(-1.2864, 36.8172))]),
      unreachable: false,
    }
  }

  pub fn unreachable() -> Self {
    Self { places: HashMap::new(), unreachable: true }
  }
}

impl Geocoder for TableGeocoder {
  type Error = Unavailable;

  async fn geocode(&self, text: &str) -> Result<Option<Coordinates>, Unavailable> {
    if self.unreachable {
      return Err(Unavailable);
    }
    Ok(self.places.get(text).copied())
  }
}
