//! Web front end for the community health tracker.
//!
//! Serves the server-rendered page (report form, issue map, metrics
//! dashboard) and nests the JSON API from `health-api` under `/api`, all
//! backed by any [`IssueStore`] and [`Geocoder`].

pub mod config;
pub mod error;
pub mod pages;
pub mod views;

pub use config::{MapConfig, ServerConfig};
pub use error::Error;

use std::sync::Arc;

use axum::{Router, routing::get};
use health_core::{geocode::Geocoder, store::IssueStore};
use tower_http::trace::TraceLayer;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all page handlers.
///
/// The store handle is opened once at startup and injected here; handlers
/// never open their own connection.
pub struct AppState<S, G> {
  pub store:    Arc<S>,
  pub geocoder: Arc<G>,
  pub config:   Arc<ServerConfig>,
}

impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      geocoder: Arc::clone(&self.geocoder),
      config:   Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`]: pages at `/`, JSON API at `/api`.
pub fn router<S, G>(state: AppState<S, G>) -> Router
where
  S: IssueStore + 'static,
  G: Geocoder + 'static,
{
  let api = health_api::api_router(Arc::clone(&state.store), Arc::clone(&state.geocoder));

  Router::new()
    .route("/", get(pages::index::<S, G>).post(pages::submit::<S, G>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use std::time::Duration;

  use health_core::issue::Coordinates;
  use health_geocode::{NominatimGeocoder, StaticGeocoder};
  use health_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use crate::pages::{ACCEPTED_MESSAGE, GEOCODER_DOWN_MESSAGE};

  async fn state_with<G: Geocoder>(geocoder: G) -> AppState<SqliteStore, G> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:    Arc::new(store),
      geocoder: Arc::new(geocoder),
      config:   Arc::new(ServerConfig::default()),
    }
  }

  async fn make_state() -> AppState<SqliteStore, StaticGeocoder> {
    state_with(StaticGeocoder::new([
      ("Nairobi", Coordinates::new(-1.2864, 36.8172)),
      ("Mombasa", Coordinates::new(-4.0435, 39.6682)),
    ]))
    .await
  }

  async fn oneshot_raw<G: Geocoder + 'static>(
    state:  AppState<SqliteStore, G>,
    method: &str,
    uri:    &str,
    body:   &str,
  ) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if method == "POST" {
      builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
  }

  fn total_count(html: &str) -> &str {
    let marker = r#"id="total-count">"#;
    let start = html.find(marker).expect("metric present") + marker.len();
    let end = start + html[start..].find('<').unwrap();
    &html[start..end]
  }

  // ── GET / ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_page_renders_form_map_and_zero_metric() {
    let state = make_state().await;
    let (status, html) = oneshot_raw(state, "GET", "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Community Health Tracker"));
    assert!(html.contains("Report a Health Issue"));
    assert!(html.contains(r#"<div id="map">"#));
    assert!(html.contains("Total Reported Health Issues"));
    assert_eq!(total_count(&html), "0");
    assert!(html.contains("No health issues reported yet."));
  }

  #[tokio::test]
  async fn unknown_filter_is_a_bad_request() {
    let state = make_state().await;
    let (status, _) = oneshot_raw(state, "GET", "/?type=Measles", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── POST / ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn accepted_submission_shows_success_and_row() {
    let state = make_state().await;
    let (status, html) = oneshot_raw(
      state.clone(),
      "POST",
      "/",
      "issue_type=Flu&location=Nairobi&description=fever+cluster",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(ACCEPTED_MESSAGE));
    assert_eq!(total_count(&html), "1");
    assert!(html.contains("<td>fever cluster</td>"));
    assert!(html.contains("<td>-1.286400</td>"));
    assert!(html.contains("bar-chart"));
  }

  #[tokio::test]
  async fn rejected_submission_keeps_input_and_writes_nothing() {
    let state = make_state().await;
    let (status, html) = oneshot_raw(
      state.clone(),
      "POST",
      "/",
      "issue_type=Malaria&location=xyznotaplace123&description=",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Location not found."));
    assert!(html.contains(r#"value="xyznotaplace123""#));
    assert!(html.contains(r#"<option value="Malaria" selected>"#));
    assert_eq!(total_count(&html), "0");

    let count = state.store.count_issues(None).await.unwrap();
    assert_eq!(count, 0);
  }

  #[tokio::test]
  async fn user_text_is_escaped_in_table_and_popup() {
    let state = make_state().await;
    let (_, html) = oneshot_raw(
      state,
      "POST",
      "/",
      "issue_type=Other&location=Mombasa&description=%3C%2Fscript%3E%3Cb%3Ex%3C%2Fb%3E",
    )
    .await;
    assert!(!html.contains("<b>x"));
    // Table cell, escaped by the template engine.
    assert!(html.contains("<td>&#60;/script&#62;&#60;b&#62;x&#60;/b&#62;</td>"));
    // Marker popup, escaped before it is embedded in the page script.
    assert!(html.contains("&lt;/script&gt;&lt;b&gt;x&lt;/b&gt;"));
  }

  #[tokio::test]
  async fn filter_narrows_metric_and_table_but_not_map() {
    let state = make_state().await;
    for body in [
      "issue_type=Flu&location=Nairobi&description=a",
      "issue_type=Flu&location=Mombasa&description=b",
      "issue_type=Malaria&location=Nairobi&description=c",
    ] {
      oneshot_raw(state.clone(), "POST", "/", body).await;
    }

    let (status, html) = oneshot_raw(state, "GET", "/?type=Malaria", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(total_count(&html), "1");
    assert!(html.contains("<td>c</td>"));
    assert!(!html.contains("<td>a</td>"));
    assert!(html.contains(r#"<option value="Malaria" selected>"#));
    // All three reports stay on the map.
    assert_eq!(html.matches(r#""popup":"#).count(), 3);
  }

  #[tokio::test]
  async fn geocoder_outage_is_not_reported_as_unknown_location() {
    // Nothing listens on port 9, so every lookup fails at the transport.
    let geocoder =
      NominatimGeocoder::new("http://127.0.0.1:9", "health_tracker", Duration::from_millis(500))
        .unwrap();
    let state = state_with(geocoder).await;
    let (status, html) = oneshot_raw(
      state.clone(),
      "POST",
      "/",
      "issue_type=Flu&location=Nairobi&description=fever",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains(GEOCODER_DOWN_MESSAGE));
    assert!(!html.contains("Location not found."));
    assert!(html.contains(r#"value="Nairobi""#));
    assert_eq!(total_count(&html), "0");

    let count = state.store.count_issues(None).await.unwrap();
    assert_eq!(count, 0);
  }

  #[tokio::test]
  async fn empty_filter_result_is_worded_for_the_filter() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/", "issue_type=Flu&location=Nairobi&description=a")
      .await;

    let (_, html) = oneshot_raw(state.clone(), "GET", "/?type=Diarrhea", "").await;
    assert_eq!(total_count(&html), "0");
    assert!(html.contains("No Diarrhea reports match this filter."));
    assert!(!html.contains("No health issues reported yet."));

    let (_, html) = oneshot_raw(state, "GET", "/", "").await;
    assert!(!html.contains("match this filter"));
  }

  #[tokio::test]
  async fn unknown_issue_type_in_form_is_a_bad_request() {
    let state = make_state().await;
    let (status, _) = oneshot_raw(
      state,
      "POST",
      "/",
      "issue_type=Cholera&location=Nairobi&description=",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── /api ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn api_is_nested() {
    let state = make_state().await;
    let (status, body) = oneshot_raw(state, "GET", "/api/dashboard", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""total_count":0"#));
  }
}
