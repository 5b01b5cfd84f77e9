//! HTTP adapter for the Nominatim search API.

use std::time::Duration;

use health_core::{geocode::Geocoder, issue::Coordinates};
use reqwest::Client;
use serde::Deserialize;

use crate::{Error, Result, is_blank};

/// One entry of a `format=jsonv2` search response. Nominatim encodes the
/// coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
  lat: String,
  lon: String,
}

/// Geocoder backed by a Nominatim server.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct NominatimGeocoder {
  client:   Client,
  base_url: String,
}

impl NominatimGeocoder {
  /// `user_agent` is sent with every request; the public Nominatim instance
  /// refuses anonymous clients.
  pub fn new(
    base_url: impl Into<String>,
    user_agent: &str,
    timeout: Duration,
  ) -> Result<Self> {
    let client = Client::builder()
      .user_agent(user_agent)
      .timeout(timeout)
      .build()?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self) -> String {
    format!("{}/search", self.base_url.trim_end_matches('/'))
  }

  /// `GET {base_url}/search?q=<text>&format=jsonv2&limit=1`
  async fn search(&self, text: &str) -> Result<Option<Coordinates>> {
    let resp = self
      .client
      .get(self.url())
      .query(&[("q", text), ("format", "jsonv2"), ("limit", "1")])
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let message = resp.text().await.unwrap_or_default();
      return Err(Error::Api { status: status.as_u16(), message });
    }

    let places: Vec<Place> = resp.json().await.map_err(|e| {
      if e.is_decode() { Error::Parse(e.to_string()) } else { Error::Network(e) }
    })?;
    first_place(places)
  }
}

impl Geocoder for NominatimGeocoder {
  type Error = Error;

  async fn geocode(&self, text: &str) -> Result<Option<Coordinates>> {
    if is_blank(text) {
      return Ok(None);
    }
    let resolved = self.search(text).await?;
    tracing::debug!(query = text, ?resolved, "nominatim lookup");
    Ok(resolved)
  }
}

/// Coordinates of the first search result. An empty result list means the
/// location did not resolve.
fn first_place(places: Vec<Place>) -> Result<Option<Coordinates>> {
  let Some(place) = places.into_iter().next() else {
    return Ok(None);
  };

  let latitude = parse_degrees(&place.lat, 90.0)?;
  let longitude = parse_degrees(&place.lon, 180.0)?;
  Ok(Some(Coordinates::new(latitude, longitude)))
}

/// Parse a decimal-degree string, rejecting non-finite values and anything
/// outside `-limit..=limit`.
fn parse_degrees(s: &str, limit: f64) -> Result<f64> {
  let invalid = || Error::Parse(format!("invalid coordinate {s:?}"));
  let degrees: f64 = s.trim().parse().map_err(|_| invalid())?;
  if degrees.is_finite() && degrees.abs() <= limit {
    Ok(degrees)
  } else {
    Err(invalid())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn places(body: &str) -> Vec<Place> { serde_json::from_str(body).unwrap() }

  #[test]
  fn first_result_is_used() {
    let body = r#"[
      {"place_id": 1, "lat": "-1.2864", "lon": "36.8172", "display_name": "Nairobi, Kenya"},
      {"place_id": 2, "lat": "0.0", "lon": "0.0", "display_name": "Elsewhere"}
    ]"#;
    let at = first_place(places(body)).unwrap().unwrap();
    assert_eq!(at, Coordinates::new(-1.2864, 36.8172));
  }

  #[test]
  fn empty_result_list_is_not_found() {
    assert_eq!(first_place(Vec::new()).unwrap(), None);
  }

  #[test]
  fn unparseable_coordinates_are_a_service_error() {
    let err = first_place(places(r#"[{"lat": "north", "lon": "36.8"}]"#)).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
  }

  #[test]
  fn non_finite_or_out_of_range_coordinates_are_rejected() {
    for (lat, lon) in [
      ("NaN", "36.8"),
      ("-1.28", "inf"),
      ("-infinity", "36.8"),
      ("91.0", "36.8"),
      ("-1.28", "-180.5"),
    ] {
      let err = first_place(vec![Place { lat: lat.into(), lon: lon.into() }])
        .unwrap_err();
      assert!(matches!(err, Error::Parse(_)), "{lat}, {lon}: got {err:?}");
    }

    let edge = first_place(vec![Place { lat: "-90".into(), lon: "180".into() }])
      .unwrap()
      .unwrap();
    assert_eq!(edge, Coordinates::new(-90.0, 180.0));
  }

  #[test]
  fn search_url_tolerates_trailing_slash() {
    let g = NominatimGeocoder::new(
      "https://nominatim.example.org/",
      "health_tracker",
      Duration::from_secs(1),
    )
    .unwrap();
    assert_eq!(g.url(), "https://nominatim.example.org/search");
  }

  #[tokio::test]
  async fn blank_input_resolves_to_none_without_a_request() {
    // Port 9 on localhost would refuse the connection if a request were made.
    let g = NominatimGeocoder::new(
      "http://127.0.0.1:9",
      "health_tracker",
      Duration::from_millis(200),
    )
    .unwrap();
    assert_eq!(g.geocode("").await.unwrap(), None);
    assert_eq!(g.geocode("   \t").await.unwrap(), None);
  }

  #[tokio::test]
  async fn unreachable_server_is_a_network_error() {
    let g = NominatimGeocoder::new(
      "http://127.0.0.1:9",
      "health_tracker",
      Duration::from_millis(500),
    )
    .unwrap();
    let err = g.geocode("Nairobi").await.unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got {err:?}");
  }
}
