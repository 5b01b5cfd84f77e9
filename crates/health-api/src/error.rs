//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use health_core::intake::Rejection;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The submission was understood but turned away; the user can fix it.
  #[error("{}", .0.message())]
  Rejected(Rejection),

  #[error("geocoding service error: {0}")]
  Geocoder(#[source] health_core::BoxError),

  #[error("store error: {0}")]
  Store(#[source] health_core::BoxError),
}

impl From<health_core::Error> for ApiError {
  fn from(err: health_core::Error) -> Self {
    match err {
      health_core::Error::UnknownIssueType(_) => Self::BadRequest(err.to_string()),
      health_core::Error::GeocodeService(e) => Self::Geocoder(e),
      health_core::Error::Storage(e) => Self::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Geocoder(_) => StatusCode::BAD_GATEWAY,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
