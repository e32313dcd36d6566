use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_GEOCODING_URL: &str = "https://api-adresse.data.gouv.fr/search/";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_RADAR_URL: &str = "https://www.ventusky.com/";
pub const DEFAULT_RADAR_LAYER: &str = "rain-3h";
pub const DEFAULT_RADAR_ZOOM: u8 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// radar_layer = "rain-3h"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address-search endpoint queried with `q` and `limit`.
    pub geocoding_url: String,

    /// Daily forecast endpoint.
    pub forecast_url: String,

    /// Radar site linked from each day card.
    pub radar_url: String,
    pub radar_layer: String,
    pub radar_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            radar_url: DEFAULT_RADAR_URL.to_string(),
            radar_layer: DEFAULT_RADAR_LAYER.to_string(),
            radar_zoom: DEFAULT_RADAR_ZOOM,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo-widget", "meteo")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Radar link centred on a location, coordinates rounded to two decimals.
    pub fn radar_link(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}?p={};{};{}&l={}",
            self.radar_url,
            two_decimals(latitude),
            two_decimals(longitude),
            self.radar_zoom,
            self.radar_layer
        )
    }
}

/// Two-decimal rendering with ties away from zero (`48.125` → `48.13`).
/// `{:.2}` alone would send exact ties to even.
fn two_decimals(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = Config::from_toml("forecast_url = \"http://localhost:9000/v1/forecast\"").unwrap();
        assert_eq!(cfg.forecast_url, "http://localhost:9000/v1/forecast");
        assert_eq!(cfg.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.radar_zoom, DEFAULT_RADAR_ZOOM);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("radar_zoom = \"high\"").is_err());
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let cfg = Config {
            radar_layer: "temperature-2m".into(),
            ..Config::default()
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn radar_link_rounds_coordinates() {
        let cfg = Config::default();
        assert_eq!(
            cfg.radar_link(48.8566, 2.3522),
            "https://www.ventusky.com/?p=48.86;2.35;10&l=rain-3h"
        );
    }

    #[test]
    fn radar_link_rounds_exact_ties_up() {
        let cfg = Config::default();
        assert_eq!(
            cfg.radar_link(48.125, 2.375),
            "https://www.ventusky.com/?p=48.13;2.38;10&l=rain-3h"
        );
        assert_eq!(two_decimals(-0.125), "-0.13");
    }
}
