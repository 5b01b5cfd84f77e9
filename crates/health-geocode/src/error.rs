//! Error type for `health-geocode`.

use thiserror::Error;

/// A failed lookup. A location that merely does not resolve is not an error;
/// adapters return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum Error {
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),

  #[error("geocoder returned status {status}: {message}")]
  Api { status: u16, message: String },

  #[error("unparseable geocoder response: {0}")]
  Parse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
