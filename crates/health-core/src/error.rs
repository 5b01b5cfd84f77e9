//! Error types for `health-core`.

use thiserror::Error;

/// A backend error that has crossed the core boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown issue type: {0:?}")]
  UnknownIssueType(String),

  /// The geocoder could not be reached or returned garbage. Distinct from a
  /// location that simply does not resolve.
  #[error("geocoding service error: {0}")]
  GeocodeService(#[source] BoxError),

  #[error("storage failure: {0}")]
  Storage(#[source] BoxError),
}

impl Error {
  pub fn storage(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(e))
  }

  pub fn geocode_service(
    e: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::GeocodeService(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
