//! Page handlers.
//!
//! Both handlers render the full page: the report form, the issue map, and
//! the metrics dashboard. A submission re-renders it with a flash message
//! and a status code that reflects the outcome.

use askama::Template;
use axum::{
  Form,
  extract::{Query, State},
  http::StatusCode,
  response::Html,
};
use health_api::FilterParams;
use health_core::{
  dashboard::{get_dashboard, map_markers},
  geocode::Geocoder,
  intake::{Submission, submit_issue},
  issue::{IssueType, NewIssue, TypeFilter},
  store::IssueStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  error::Error,
  views::{
    ChartData, Flash, FormValues, IssueRow, MarkerView, SelectOption,
    filter_options, script_json,
  },
};

pub const ACCEPTED_MESSAGE: &str = "Issue reported successfully!";
pub const GEOCODER_DOWN_MESSAGE: &str =
  "The location service is unavailable right now. Please try again shortly.";

// ── Template ────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
  flash:        Option<Flash>,
  form:         FormValues,
  /// Current dashboard filter, preserved across form submissions.
  filter:       String,
  filtered:     bool,
  filters:      Vec<SelectOption>,
  total_count:  u64,
  rows:         Vec<IssueRow>,
  has_counts:   bool,
  map_json:     String,
  markers_json: String,
  chart_json:   String,
}

async fn render_page<S, G>(
  state: &AppState<S, G>,
  filter: TypeFilter,
  flash: Option<Flash>,
  form: FormValues,
) -> Result<Html<String>, Error>
where
  S: IssueStore,
  G: Geocoder,
{
  let dashboard = get_dashboard(state.store.as_ref(), filter).await?;
  let markers = map_markers(state.store.as_ref()).await?;
  let marker_views: Vec<MarkerView<'_>> = markers.iter().map(MarkerView::from).collect();

  let map = &state.config.map;
  let chart = ChartData::from(&dashboard.counts_by_type);

  let tmpl = IndexTemplate {
    flash,
    form,
    filter: filter.to_string(),
    filtered: filter != TypeFilter::All,
    filters: filter_options(filter),
    total_count: dashboard.total_count,
    has_counts: !dashboard.counts_by_type.is_empty(),
    rows: dashboard.rows.into_iter().map(IssueRow::from).collect(),
    map_json: script_json(&json!({
      "lat": map.center_latitude,
      "lon": map.center_longitude,
      "zoom": map.zoom,
    }))?,
    markers_json: script_json(&marker_views)?,
    chart_json: script_json(&chart)?,
  };
  Ok(Html(tmpl.render()?))
}

fn parse_filter(params: &FilterParams) -> Result<TypeFilter, Error> {
  params.filter().map_err(|e| Error::BadRequest(e.to_string()))
}

// ── Index ───────────────────────────────────────────────────────

/// `GET /[?type=<filter>]`
pub async fn index<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<FilterParams>,
) -> Result<Html<String>, Error>
where
  S: IssueStore,
  G: Geocoder,
{
  let filter = parse_filter(&params)?;
  render_page(&state, filter, None, FormValues::blank()).await
}

// ── Submit ──────────────────────────────────────────────────────

/// The report form's fields.
#[derive(Debug, Deserialize)]
pub struct ReportForm {
  pub issue_type:  String,
  #[serde(default)]
  pub location:    String,
  #[serde(default)]
  pub description: String,
}

/// `POST /[?type=<filter>]` with a url-encoded [`ReportForm`].
pub async fn submit<S, G>(
  State(state): State<AppState<S, G>>,
  Query(params): Query<FilterParams>,
  Form(form): Form<ReportForm>,
) -> Result<(StatusCode, Html<String>), Error>
where
  S: IssueStore,
  G: Geocoder,
{
  let filter = parse_filter(&params)?;
  let issue_type = IssueType::parse(&form.issue_type)?;
  let issue = NewIssue::new(issue_type, form.location.clone(), form.description.clone());

  let outcome = submit_issue(state.store.as_ref(), state.geocoder.as_ref(), issue).await;
  let (status, flash, values) = match outcome {
    Ok(Submission::Accepted { .. }) => (
      StatusCode::OK,
      Flash::success(ACCEPTED_MESSAGE),
      FormValues::blank(),
    ),
    Ok(Submission::Rejected { reason }) => (
      StatusCode::UNPROCESSABLE_ENTITY,
      Flash::error(reason.message()),
      FormValues::refill(Some(issue_type), form.location, form.description),
    ),
    Err(health_core::Error::GeocodeService(_)) => (
      StatusCode::BAD_GATEWAY,
      Flash::error(GEOCODER_DOWN_MESSAGE),
      FormValues::refill(Some(issue_type), form.location, form.description),
    ),
    Err(e) => return Err(e.into()),
  };

  let page = render_page(&state, filter, Some(flash), values).await?;
  Ok((status, page))
}
