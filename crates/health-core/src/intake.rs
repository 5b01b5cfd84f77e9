//! Report intake: geocode a submission and persist it on success.

use serde::Serialize;

use crate::{
  Error, Result,
  geocode::Geocoder,
  issue::NewIssue,
  store::IssueStore,
};

/// Why a submission was turned away. Rejections are recoverable: the user
/// can correct the input and submit again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
  LocationNotFound,
}

impl Rejection {
  /// The message shown to the user.
  pub fn message(self) -> &'static str {
    match self {
      Self::LocationNotFound => "Location not found.",
    }
  }
}

/// The outcome of a submission that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Submission {
  Accepted { id: i64 },
  Rejected { reason: Rejection },
}

/// Geocode `issue.location` and store the report if it resolves.
///
/// Nothing is written unless geocoding produced coordinates. `description`
/// and the location's format are not validated beyond what the geocoder
/// itself rejects.
///
/// Service failures surface as [`Error::GeocodeService`] and storage failures
/// as [`Error::Storage`]; neither writes a partial row.
pub async fn submit_issue<S, G>(
  store: &S,
  geocoder: &G,
  issue: NewIssue,
) -> Result<Submission>
where
  S: IssueStore,
  G: Geocoder,
{
  let resolved = match geocoder.geocode(&issue.location).await {
    Ok(resolved) => resolved,
    Err(e) => {
      tracing::warn!(location = %issue.location, error = %e, "geocoding failed");
      return Err(Error::geocode_service(e));
    }
  };

  let Some(at) = resolved else {
    tracing::info!(location = %issue.location, "rejected report: location not found");
    return Ok(Submission::Rejected {
      reason: Rejection::LocationNotFound,
    });
  };

  let issue_type = issue.issue_type;
  let id = store
    .insert_issue(issue, at)
    .await
    .map_err(Error::storage)?;

  tracing::info!(
    id,
    issue_type = %issue_type,
    latitude = at.latitude,
    longitude = at.longitude,
    "accepted report"
  );
  Ok(Submission::Accepted { id })
}
