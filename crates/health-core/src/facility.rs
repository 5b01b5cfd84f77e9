//! A physical health facility.
//!
//! The table exists in the persisted schema but no current flow writes to
//! it. Facilities are exposed read-only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
  pub id:      i64,
  pub name:    String,
  pub address: String,
}
