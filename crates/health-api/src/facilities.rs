//! `GET /facilities`: read-only; no flow writes facilities yet.

use axum::{Json, extract::State};
use health_core::{facility::Facility, geocode::Geocoder, store::IssueStore};

use crate::{ApiState, error::ApiError};

pub async fn list<S, G>(
  State(state): State<ApiState<S, G>>,
) -> Result<Json<Vec<Facility>>, ApiError>
where
  S: IssueStore,
  G: Geocoder,
{
  let facilities = state
    .store
    .list_facilities()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(facilities))
}
