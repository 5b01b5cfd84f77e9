//! Error type for `health-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] health_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// `COUNT(*)` came back negative; only a corrupted database does this.
  #[error("invalid row count: {0}")]
  InvalidCount(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
