//! Constants and runtime configuration for the energy map.
//!
//! Compile-time constants cover the scenario model and the default view.
//! [`MapConfig`] carries the values that can be overridden at startup:
//! defaults first, then `energy_map.toml` (native only), then the
//! `ENERGY_MAP_DATA` environment variable (native) or the `?data=` query
//! parameter (wasm).

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Extra electricity (kWh) per m³ of gas no longer burned. Models gas boilers
/// being replaced by heat pumps.
pub const HEAT_PUMP_CONVERSION_FACTOR: f64 = 3.0;

/// Gas demand slider range, in percent of the 2023 baseline.
pub const GAS_DEMAND_PERCENT_RANGE: RangeInclusive<u32> = 0..=100;
/// PV adoption slider range, in percent of the 2023 baseline.
pub const PV_ADOPTION_PERCENT_RANGE: RangeInclusive<u32> = 100..=500;

pub const DEFAULT_DATA_PATH: &str = "data/alkmaar_energy_map.geojson";
pub const DEFAULT_CENTER_LAT: f64 = 52.632;
pub const DEFAULT_CENTER_LON: f64 = 4.753;
pub const DEFAULT_ZOOM: f64 = 13.0;

/// Padding in screen pixels around a region when the view is fitted to it.
pub const FIT_PADDING_PX: f32 = 40.0;
/// Clicking a region never zooms in further than this.
pub const FIT_MAX_ZOOM: f64 = 17.0;
pub const MIN_ZOOM: f64 = 8.0;
pub const MAX_ZOOM: f64 = 19.0;

pub const CONFIG_FILE_NAME: &str = "energy_map.toml";
pub const DATA_PATH_ENV: &str = "ENERGY_MAP_DATA";

/// Startup configuration, resolved once in `main` and inserted as a resource.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub title: String,
    /// Native: file path relative to the working directory.
    /// WASM: URL relative to the page.
    pub data_path: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
    pub fit_padding_px: f32,
    pub fit_max_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "PC6 Energy Map".to_string(),
            data_path: DEFAULT_DATA_PATH.to_string(),
            center_lat: DEFAULT_CENTER_LAT,
            center_lon: DEFAULT_CENTER_LON,
            zoom: DEFAULT_ZOOM,
            fit_padding_px: FIT_PADDING_PX,
            fit_max_zoom: FIT_MAX_ZOOM,
        }
    }
}

impl MapConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(ConfigError::Parse)
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents)
    }

    /// Replace the data path when an override is present and non-blank.
    pub fn with_data_path_override(mut self, data_path: Option<String>) -> Self {
        if let Some(path) = data_path {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                self.data_path = trimmed.to_string();
            }
        }
        self
    }

    /// Resolve the configuration from every source available on this target.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn resolve() -> Self {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        let config = if path.exists() {
            match Self::from_file(&path) {
                Ok(config) => {
                    info!("Loaded map config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("{}; falling back to defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        config.with_data_path_override(std::env::var(DATA_PATH_ENV).ok())
    }

    /// Resolve the configuration from every source available on this target.
    #[cfg(target_arch = "wasm32")]
    pub fn resolve() -> Self {
        Self::default().with_data_path_override(query_param("data"))
    }
}

/// Returns `Some(value)` if `?name=...` is present in the browser URL.
#[cfg(target_arch = "wasm32")]
fn query_param(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name)
}

/// Errors from reading `energy_map.toml`.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read {}: {}", path.display(), e),
            ConfigError::Parse(e) => write!(f, "Invalid map config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_alkmaar() {
        let config = MapConfig::default();
        assert_eq!(config.data_path, DEFAULT_DATA_PATH);
        assert!((config.center_lat - 52.632).abs() < 1e-9);
        assert!((config.center_lon - 4.753).abs() < 1e-9);
        assert!((config.zoom - 13.0).abs() < 1e-9);
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = MapConfig::from_toml_str(
            r#"
            data_path = "data/heerhugowaard.geojson"
            zoom = 14.5
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.data_path, "data/heerhugowaard.geojson");
        assert!((config.zoom - 14.5).abs() < 1e-9);
        assert_eq!(config.title, MapConfig::default().title);
        assert!((config.fit_max_zoom - FIT_MAX_ZOOM).abs() < 1e-9);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = MapConfig::from_toml_str("zoom = \"close\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn blank_override_keeps_configured_path() {
        let config = MapConfig::default().with_data_path_override(Some("   ".to_string()));
        assert_eq!(config.data_path, DEFAULT_DATA_PATH);

        let config = MapConfig::default().with_data_path_override(Some(" other.geojson ".into()));
        assert_eq!(config.data_path, "other.geojson");
    }

    #[test]
    fn slider_ranges_match_panel_controls() {
        assert_eq!(GAS_DEMAND_PERCENT_RANGE, 0..=100);
        assert_eq!(PV_ADOPTION_PERCENT_RANGE, 100..=500);
    }
}
