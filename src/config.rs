use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub observer: ObserverConfig,
    pub satellite: SatelliteConfig,
    pub sources: SourcesConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            name: "Observer".to_string(),
            latitude: None,
            longitude: None,
            elevation: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SatelliteConfig {
    /// Substring matched against entry names in the TLE feed.
    pub name: String,
    /// Sub-point override while propagation is handled externally.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            name: "ISS".to_string(),
            latitude: None,
            longitude: None,
            elevation: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub tle_url: String,
    pub geolocation_url: String,
    /// `{x}` and `{y}` expand to longitude and latitude.
    pub elevation_url: String,
    pub timeout_seconds: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            tle_url: "https://celestrak.org/NORAD/elements/gp.php?GROUP=stations&FORMAT=tle"
                .to_string(),
            geolocation_url: "http://ip-api.com/json".to_string(),
            elevation_url: "https://epqs.nationalmap.gov/v1/json?x={x}&y={y}&units=Meters"
                .to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` if present, then the platform config directory,
    /// then fall back to built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }
        if let Some(dir) = dirs::config_dir() {
            let fallback = dir.join("isspoint").join("config.toml");
            if fallback.exists() {
                return Self::load(&fallback);
            }
        }
        Ok(Self::default())
    }
}
