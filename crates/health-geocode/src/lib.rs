//! Geocoding adapters for the health tracker.
//!
//! [`NominatimGeocoder`] queries an OpenStreetMap Nominatim server over HTTP.
//! [`StaticGeocoder`] resolves from a fixed table of place names and needs
//! no network. [`GeocoderBackend`] picks one of them from configuration.

mod backend;
mod nominatim;
mod table;

pub mod error;

pub use backend::{GeocoderBackend, GeocoderConfig, Provider};
pub use error::{Error, Result};
pub use nominatim::NominatimGeocoder;
pub use table::StaticGeocoder;

/// `true` if there is nothing to look up.
pub(crate) fn is_blank(text: &str) -> bool { text.trim().is_empty() }
