//! Conversions between domain types and the plain values stored in SQLite
//! columns.
//!
//! Issue types are stored as their variant name. Text columns are nullable
//! in the schema; a NULL location or description reads back as empty.

use health_core::{
  facility::Facility,
  issue::{IssueReport, IssueType},
};

use crate::Result;

/// Column list shared by every issue query, in [`RawIssue::from_row`] order.
pub const ISSUE_COLUMNS: &str = "id, type, location, description, lat, lon";

// ─── IssueType ───────────────────────────────────────────────────────────────

pub fn encode_issue_type(t: IssueType) -> &'static str { t.as_str() }

pub fn decode_issue_type(s: &str) -> Result<IssueType> {
  Ok(IssueType::parse(s)?)
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// An `issues` row as read from SQLite, before decoding.
pub struct RawIssue {
  pub id:          i64,
  pub issue_type:  String,
  pub location:    Option<String>,
  pub description: Option<String>,
  pub lat:         f64,
  pub lon:         f64,
}

impl RawIssue {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      issue_type:  row.get(1)?,
      location:    row.get(2)?,
      description: row.get(3)?,
      lat:         row.get(4)?,
      lon:         row.get(5)?,
    })
  }

  pub fn into_report(self) -> Result<IssueReport> {
    Ok(IssueReport {
      id:          self.id,
      issue_type:  decode_issue_type(&self.issue_type)?,
      location:    self.location.unwrap_or_default(),
      description: self.description.unwrap_or_default(),
      latitude:    self.lat,
      longitude:   self.lon,
    })
  }
}

/// A `facilities` row as read from SQLite.
pub struct RawFacility {
  pub id:      i64,
  pub name:    Option<String>,
  pub address: Option<String>,
}

impl RawFacility {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:      row.get(0)?,
      name:    row.get(1)?,
      address: row.get(2)?,
    })
  }

  pub fn into_facility(self) -> Facility {
    Facility {
      id:      self.id,
      name:    self.name.unwrap_or_default(),
      address: self.address.unwrap_or_default(),
    }
  }
}
