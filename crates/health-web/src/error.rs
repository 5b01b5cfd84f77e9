//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("template error: {0}")]
  Template(#[from] askama::Error),
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
  #[error("geocoding service error: {0}")]
  Geocoder(#[source] health_core::BoxError),
  #[error("store error: {0}")]
  Store(#[source] health_core::BoxError),
}

impl From<health_core::Error> for Error {
  fn from(err: health_core::Error) -> Self {
    match err {
      health_core::Error::UnknownIssueType(_) => Error::BadRequest(err.to_string()),
      health_core::Error::GeocodeService(e) => Error::Geocoder(e),
      health_core::Error::Storage(e) => Error::Store(e),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
      Error::Geocoder(e) => {
        tracing::warn!(error = %e, "geocoder unavailable");
        (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
      }
      e => {
        tracing::error!(error = %e, "page render failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
    }
  }
}
