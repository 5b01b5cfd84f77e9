//! Server configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML file,
//! then `HEALTH_*` environment variables (`__` separates nested keys, e.g.
//! `HEALTH_GEOCODER__PROVIDER=static`).

use std::path::{Path, PathBuf};

use health_geocode::GeocoderConfig;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// The SQLite database file; created on first start.
  pub store_path: PathBuf,
  pub geocoder:   GeocoderConfig,
  pub map:        MapConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8501,
      store_path: PathBuf::from("health_tracker.db"),
      geocoder:   GeocoderConfig::default(),
      map:        MapConfig::default(),
    }
  }
}

/// Initial view of the issue map.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MapConfig {
  pub center_latitude:  f64,
  pub center_longitude: f64,
  pub zoom:             u8,
}

impl Default for MapConfig {
  /// Nairobi.
  fn default() -> Self {
    Self {
      center_latitude:  -1.286389,
      center_longitude: 36.817223,
      zoom:             12,
    }
  }
}

/// Load configuration from `path` (if it exists) and the environment.
pub fn load(path: &Path) -> Result<ServerConfig, ::config::ConfigError> {
  ::config::Config::builder()
    .add_source(::config::File::from(path).required(false))
    .add_source(
      ::config::Environment::with_prefix("HEALTH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use health_geocode::Provider;

  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = load(Path::new("/nonexistent/health-tracker.toml")).unwrap();
    assert_eq!(cfg.port, 8501);
    assert_eq!(cfg.store_path, PathBuf::from("health_tracker.db"));
    assert_eq!(cfg.geocoder.provider, Provider::Nominatim);
    assert_eq!(cfg.map, MapConfig::default());
  }

  #[test]
  fn file_overrides_defaults() {
    let path = std::env::temp_dir()
      .join(format!("health-web-config-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      r#"
port = 9000
store_path = "/var/lib/health/tracker.db"

[geocoder]
provider = "static"

[geocoder.places.nairobi]
latitude = -1.2864
longitude = 36.8172

[map]
zoom = 7
"#,
    )
    .unwrap();

    let cfg = load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/health/tracker.db"));
    assert_eq!(cfg.geocoder.provider, Provider::Static);
    assert_eq!(cfg.geocoder.places.len(), 1);
    assert_eq!(cfg.geocoder.user_agent, "health_tracker");
    assert_eq!(cfg.map.zoom, 7);
    assert_eq!(cfg.map.center_latitude, -1.286389);
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/health.db")),
      PathBuf::from(home).join("health.db")
    );
    assert_eq!(expand_tilde(Path::new("/tmp/x.db")), PathBuf::from("/tmp/x.db"));
  }
}
