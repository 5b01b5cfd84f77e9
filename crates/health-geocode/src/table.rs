//! Offline geocoding from a fixed table of place names.

use std::collections::HashMap;

use health_core::{geocode::Geocoder, issue::Coordinates};

use crate::{Error, Result, is_blank};

/// Resolves place names from a table supplied up front.
///
/// Lookups ignore case and surrounding whitespace. Never fails.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
  places: HashMap<String, Coordinates>,
}

impl StaticGeocoder {
  pub fn new<K: AsRef<str>>(places: impl IntoIterator<Item = (K, Coordinates)>) -> Self {
    let places = places
      .into_iter()
      .map(|(name, at)| (normalize(name.as_ref()), at))
      .collect();
    Self { places }
  }

  pub fn lookup(&self, text: &str) -> Option<Coordinates> {
    if is_blank(text) {
      return None;
    }
    self.places.get(&normalize(text)).copied()
  }

  pub fn len(&self) -> usize { self.places.len() }

  pub fn is_empty(&self) -> bool { self.places.is_empty() }
}

fn normalize(name: &str) -> String { name.trim().to_lowercase() }

impl Geocoder for StaticGeocoder {
  type Error = Error;

  async fn geocode(&self, text: &str) -> Result<Option<Coordinates>> {
    Ok(self.lookup(text))
  }
}
