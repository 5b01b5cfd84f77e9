//! Issue reports: the records users submit through the intake form.
//!
//! An issue report only ever exists with resolved coordinates: a submission
//! whose location cannot be geocoded is discarded before it reaches the
//! store. Reports are append-only; nothing in this system edits or deletes
//! them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Issue type ──────────────────────────────────────────────────────────────

/// The fixed set of reportable health issues.
///
/// The text form (database column, form values, JSON) is the variant name.
/// Declaration order is the display order used when counts tie.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
pub enum IssueType {
  Flu,
  Malaria,
  Diarrhea,
  Other,
}

impl IssueType {
  /// Parse the text form, reporting unknown values as
  /// [`Error::UnknownIssueType`].
  pub fn parse(s: &str) -> Result<Self> {
    s.parse()
      .map_err(|_| Error::UnknownIssueType(s.to_owned()))
  }

  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Dashboard filter: every report, or only reports of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
  #[default]
  All,
  Only(IssueType),
}

impl TypeFilter {
  /// The store-level predicate: `None` matches every row.
  pub fn issue_type(self) -> Option<IssueType> {
    match self {
      Self::All => None,
      Self::Only(t) => Some(t),
    }
  }
}

impl FromStr for TypeFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "All" => Ok(Self::All),
      other => IssueType::parse(other).map(Self::Only),
    }
  }
}

impl fmt::Display for TypeFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str("All"),
      Self::Only(t) => f.write_str(t.as_str()),
    }
  }
}

impl Serialize for TypeFilter {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// A resolved position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinates {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self { latitude, longitude }
  }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// A submission as entered by the user, before geocoding.
///
/// `location` is kept exactly as typed; `description` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
  pub issue_type:  IssueType,
  pub location:    String,
  #[serde(default)]
  pub description: String,
}

impl NewIssue {
  pub fn new(
    issue_type: IssueType,
    location: impl Into<String>,
    description: impl Into<String>,
  ) -> Self {
    Self {
      issue_type,
      location: location.into(),
      description: description.into(),
    }
  }
}

/// A persisted issue report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueReport {
  /// Assigned by the store, increasing in insertion order.
  pub id:          i64,
  pub issue_type:  IssueType,
  pub location:    String,
  pub description: String,
  pub latitude:    f64,
  pub longitude:   f64,
}

impl IssueReport {
  pub fn coordinates(&self) -> Coordinates {
    Coordinates::new(self.latitude, self.longitude)
  }
}
