//! Handlers for `/issues` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/issues` | Optional `?type=All\|Flu\|Malaria\|Diarrhea\|Other` |
//! | `POST` | `/issues` | Body: [`CreateBody`]; 201 `{"id":..}`, 422 if the location does not resolve, 400 if the body is malformed |
//! | `GET`  | `/issues/:id` | 404 if not found |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use health_core::{
  geocode::Geocoder,
  intake::{Submission, submit_issue},
  issue::{IssueReport, IssueType, NewIssue},
  store::IssueStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  ApiState, FilterParams,
  error::ApiError,
  extract::{ApiJson, ApiPath, ApiQuery},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /issues[?type=<type>]`
pub async fn list<S, G>(
  State(state): State<ApiState<S, G>>,
  ApiQuery(params): ApiQuery<FilterParams>,
) -> Result<Json<Vec<IssueReport>>, ApiError>
where
  S: IssueStore,
  G: Geocoder,
{
  let filter = params.filter()?;
  let issues = state
    .store
    .list_issues(filter.issue_type())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(issues))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Body of `POST /issues`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub issue_type:  String,
  pub location:    String,
  #[serde(default)]
  pub description: String,
}

/// `POST /issues` with body `{"issue_type":"Flu","location":"Nairobi","description":"..."}`
pub async fn create<S, G>(
  State(state): State<ApiState<S, G>>,
  ApiJson(body): ApiJson<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: IssueStore,
  G: Geocoder,
{
  let issue_type = IssueType::parse(&body.issue_type)?;
  let issue = NewIssue::new(issue_type, body.location, body.description);

  match submit_issue(state.store.as_ref(), state.geocoder.as_ref(), issue).await? {
    Submission::Accepted { id } => Ok((StatusCode::CREATED, Json(json!({ "id": id })))),
    Submission::Rejected { reason } => Err(ApiError::Rejected(reason)),
  }
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /issues/:id`
pub async fn get_one<S, G>(
  State(state): State<ApiState<S, G>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<Json<IssueReport>, ApiError>
where
  S: IssueStore,
  G: Geocoder,
{
  let issue = state
    .store
    .get_issue(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("issue {id} not found")))?;
  Ok(Json(issue))
}
