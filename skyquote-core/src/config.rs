use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, fs, path::PathBuf, sync::Arc};

use crate::{
    geolocation::{DeniedGeolocator, FixedGeolocator, Geolocator, IpGeolocator, ip},
    model::Coordinates,
    provider::{DEFAULT_QUOTE_URL, DEFAULT_WEATHER_URL},
};

/// Where the weather flow gets its position from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// Approximate position from the public IP address.
    #[default]
    Ip,
    /// Coordinates stored in the config file.
    Fixed,
    /// The user declined to share a location.
    Denied,
    /// No location capability at all.
    #[serde(rename = "none")]
    Unsupported,
}

impl LocationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationSource::Ip => "ip",
            LocationSource::Fixed => "fixed",
            LocationSource::Denied => "denied",
            LocationSource::Unsupported => "none",
        }
    }

    pub const fn all() -> &'static [LocationSource] {
        &[
            LocationSource::Ip,
            LocationSource::Fixed,
            LocationSource::Denied,
            LocationSource::Unsupported,
        ]
    }
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LocationSource {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "ip" => Ok(LocationSource::Ip),
            "fixed" => Ok(LocationSource::Fixed),
            "denied" => Ok(LocationSource::Denied),
            "none" => Ok(LocationSource::Unsupported),
            _ => Err(anyhow!(
                "Unknown location source '{value}'. Supported sources: ip, fixed, denied, none."
            )),
        }
    }
}

/// `[location]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub source: LocationSource,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Override for the IP lookup endpoint.
    pub ip_lookup_url: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Quote endpoint; defaults to ZenQuotes.
    pub quote_url: Option<String>,

    /// Open-Meteo compatible forecast endpoint.
    pub weather_url: Option<String>,

    /// Example TOML:
    /// [location]
    /// source = "fixed"
    /// latitude = 40.0
    /// longitude = -73.0
    #[serde(default)]
    pub location: LocationConfig,
}

impl Config {
    pub fn quote_url(&self) -> &str {
        self.quote_url.as_deref().unwrap_or(DEFAULT_QUOTE_URL)
    }

    pub fn weather_url(&self) -> &str {
        self.weather_url.as_deref().unwrap_or(DEFAULT_WEATHER_URL)
    }

    /// Stored coordinates, if both halves are present.
    pub fn fixed_coordinates(&self) -> Option<Coordinates> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    /// Switch to a fixed position.
    pub fn set_fixed_location(&mut self, coords: Coordinates) {
        self.location.source = LocationSource::Fixed;
        self.location.latitude = Some(coords.latitude);
        self.location.longitude = Some(coords.longitude);
    }

    /// Build the geolocation capability for the configured source.
    ///
    /// `Ok(None)` means location is unsupported.
    pub fn geolocator(&self) -> Result<Option<Arc<dyn Geolocator>>> {
        let geo: Arc<dyn Geolocator> = match self.location.source {
            LocationSource::Ip => Arc::new(IpGeolocator::new(
                self.location.ip_lookup_url.as_deref().unwrap_or(ip::DEFAULT_IP_LOOKUP_URL),
            )),
            LocationSource::Fixed => {
                let coords = self.fixed_coordinates().ok_or_else(|| {
                    anyhow!(
                        "Location source is 'fixed' but no coordinates are configured.\n\
                         Hint: run `skyquote configure` or pass --lat/--lon."
                    )
                })?;
                Arc::new(FixedGeolocator::new(coords))
            }
            LocationSource::Denied => Arc::new(DeniedGeolocator),
            LocationSource::Unsupported => return Ok(None),
        };

        Ok(Some(geo))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
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

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyquote", "skyquote")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_source_as_str_roundtrip() {
        for source in LocationSource::all() {
            let parsed = LocationSource::try_from(source.as_str()).expect("roundtrip should succeed");
            assert_eq!(*source, parsed);
        }
    }

    #[test]
    fn unknown_location_source_error() {
        let err = LocationSource::try_from("gps").unwrap_err();
        assert!(err.to_string().contains("Unknown location source"));
    }

    #[test]
    fn defaults_use_public_endpoints_and_ip_lookup() {
        let cfg = Config::default();
        assert_eq!(cfg.quote_url(), DEFAULT_QUOTE_URL);
        assert_eq!(cfg.weather_url(), DEFAULT_WEATHER_URL);
        assert_eq!(cfg.location.source, LocationSource::Ip);
        assert!(cfg.geolocator().unwrap().is_some());
    }

    #[test]
    fn parses_location_table() {
        let cfg = Config::from_toml(
            r#"
            weather_url = "http://localhost:8080/v1/forecast"

            [location]
            source = "fixed"
            latitude = 40.0
            longitude = -73.0
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.weather_url(), "http://localhost:8080/v1/forecast");
        assert_eq!(cfg.fixed_coordinates(), Some(Coordinates::new(40.0, -73.0)));
        assert!(cfg.geolocator().unwrap().is_some());
    }

    #[test]
    fn none_source_means_unsupported() {
        let cfg = Config::from_toml("[location]\nsource = \"none\"\n").unwrap();
        assert_eq!(cfg.location.source, LocationSource::Unsupported);
        assert!(cfg.geolocator().unwrap().is_none());
    }

    #[test]
    fn fixed_without_coordinates_errors() {
        let mut cfg = Config::default();
        cfg.location.source = LocationSource::Fixed;

        let err = cfg.geolocator().unwrap_err();
        assert!(err.to_string().contains("no coordinates are configured"));
    }

    #[test]
    fn set_fixed_location_switches_source() {
        let mut cfg = Config::default();
        cfg.set_fixed_location(Coordinates::new(51.5, -0.12));

        assert_eq!(cfg.location.source, LocationSource::Fixed);
        assert_eq!(cfg.fixed_coordinates(), Some(Coordinates::new(51.5, -0.12)));
    }

    #[test]
    fn config_survives_toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_fixed_location(Coordinates::new(1.0, 2.0));

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = Config::from_toml(&text).unwrap();
        assert_eq!(back.fixed_coordinates(), cfg.fixed_coordinates());
        assert_eq!(back.location.source, LocationSource::Fixed);
    }
}
