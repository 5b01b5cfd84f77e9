//! JSON REST API for the health tracker.
//!
//! Exposes an axum [`Router`] backed by any [`IssueStore`] and [`Geocoder`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", health_api::api_router(store.clone(), geocoder.clone()))
//! ```

pub mod dashboard;
pub mod error;
pub mod extract;
pub mod facilities;
pub mod issues;

use std::sync::Arc;

use axum::{Router, routing::get};
use health_core::{geocode::Geocoder, issue::TypeFilter, store::IssueStore};
use serde::Deserialize;

pub use error::ApiError;

// ─── State ────────────────────────────────────────────────────────────────────

/// Handles shared by every API handler.
pub struct ApiState<S, G> {
  pub store:    Arc<S>,
  pub geocoder: Arc<G>,
}

impl<S, G> Clone for ApiState<S, G> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      geocoder: Arc::clone(&self.geocoder),
    }
  }
}

// ─── Shared query parameters ─────────────────────────────────────────────────

/// `?type=All|Flu|Malaria|Diarrhea|Other`; absent means `All`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
  #[serde(rename = "type")]
  pub issue_type: Option<String>,
}

impl FilterParams {
  pub fn filter(&self) -> Result<TypeFilter, ApiError> {
    match self.issue_type.as_deref() {
      None | Some("") => Ok(TypeFilter::All),
      Some(s) => Ok(s.parse::<TypeFilter>()?),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(store: Arc<S>, geocoder: Arc<G>) -> Router<()>
where
  S: IssueStore + 'static,
  G: Geocoder + 'static,
{
  Router::new()
    // Issues
    .route("/issues", get(issues::list::<S, G>).post(issues::create::<S, G>))
    .route("/issues/{id}", get(issues::get_one::<S, G>))
    // Dashboard
    .route("/dashboard", get(dashboard::summary::<S, G>))
    .route("/markers", get(dashboard::markers::<S, G>))
    // Facilities
    .route("/facilities", get(facilities::list::<S, G>))
    .with_state(ApiState { store, geocoder })
}
