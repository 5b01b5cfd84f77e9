//! Configuration-driven choice of geocoding adapter.

use std::{collections::HashMap, time::Duration};

use health_core::{geocode::Geocoder, issue::Coordinates};
use serde::Deserialize;

use crate::{NominatimGeocoder, Result, StaticGeocoder};

/// Which adapter resolves locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
  #[default]
  Nominatim,
  Static,
}

/// The `[geocoder]` section of the server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
  pub provider:     Provider,
  pub base_url:     String,
  pub user_agent:   String,
  pub timeout_secs: u64,
  /// Place name → coordinates, used by [`Provider::Static`].
  pub places:       HashMap<String, Coordinates>,
}

impl Default for GeocoderConfig {
  fn default() -> Self {
    Self {
      provider:     Provider::Nominatim,
      base_url:     "https://nominatim.openstreetmap.org".to_string(),
      user_agent:   "health_tracker".to_string(),
      timeout_secs: 10,
      places:       HashMap::new(),
    }
  }
}

/// The geocoder selected by [`GeocoderConfig::provider`].
#[derive(Clone)]
pub enum GeocoderBackend {
  Nominatim(NominatimGeocoder),
  Static(StaticGeocoder),
}

impl GeocoderBackend {
  pub fn from_config(cfg: &GeocoderConfig) -> Result<Self> {
    let backend = match cfg.provider {
      Provider::Nominatim => Self::Nominatim(NominatimGeocoder::new(
        cfg.base_url.clone(),
        &cfg.user_agent,
        Duration::from_secs(cfg.timeout_secs),
      )?),
      Provider::Static => {
        let table = StaticGeocoder::new(cfg.places.clone());
        if table.is_empty() {
          tracing::warn!("static geocoder has no places; every report will be rejected");
        } else {
          tracing::debug!(places = table.len(), "loaded static gazetteer");
        }
        Self::Static(table)
      }
    };
    tracing::info!(provider = ?cfg.provider, "geocoder ready");
    Ok(backend)
  }
}

impl Geocoder for GeocoderBackend {
  type Error = crate::Error;

  async fn geocode(&self, text: &str) -> Result<Option<Coordinates>> {
    match self {
      Self::Nominatim(g) => g.geocode(text).await,
      Self::Static(g) => g.geocode(text).await,
    }
  }
}
