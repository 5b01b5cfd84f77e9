//! Handlers for the aggregate views.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/dashboard` | Optional `?type=`; total, rows and per-type counts |
//! | `GET`  | `/markers` | Every stored report; ignores any filter |

use axum::{Json, extract::State};
use health_core::{
  dashboard::{Dashboard, MapMarker, get_dashboard, map_markers},
  geocode::Geocoder,
  store::IssueStore,
};

use crate::{ApiState, FilterParams, error::ApiError, extract::ApiQuery};

/// `GET /dashboard[?type=<type>]`
pub async fn summary<S, G>(
  State(state): State<ApiState<S, G>>,
  ApiQuery(params): ApiQuery<FilterParams>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: IssueStore,
  G: Geocoder,
{
  let filter = params.filter()?;
  Ok(Json(get_dashboard(state.store.as_ref(), filter).await?))
}

/// `GET /markers`
pub async fn markers<S, G>(
  State(state): State<ApiState<S, G>>,
) -> Result<Json<Vec<MapMarker>>, ApiError>
where
  S: IssueStore,
  G: Geocoder,
{
  Ok(Json(map_markers(state.store.as_ref()).await?))
}
