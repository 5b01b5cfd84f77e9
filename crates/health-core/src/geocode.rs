//! The `Geocoder` trait.

use std::future::Future;

use crate::issue::Coordinates;

/// Resolves free-text place descriptions to coordinates.
///
/// `Ok(None)` means the location does not resolve; `Err` means the lookup
/// itself failed. Callers must not report a service failure to the user as
/// an unknown location. Implementations perform one lookup per call, with no
/// retry and no caching.
pub trait Geocoder: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Resolve `text` with a single lookup.
  fn geocode(
    &self,
    text: &str,
  ) -> impl Future<Output = Result<Option<Coordinates>, Self::Error>> + Send;
}
