use serde::{Deserialize, Serialize};

/// A single quote ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    pub const MISSING_TEXT: &'static str = "No quote text found.";
    pub const UNKNOWN_AUTHOR: &'static str = "Unknown";

    /// Extract a quote from the quote service body.
    ///
    /// The body is either a quote object or an array whose first element is
    /// the quote object. Anything without usable `q` / `a` fields falls back
    /// to the placeholder text and author. Returns `None` only for a JSON
    /// `null`, which carries no quote at all.
    pub fn from_json(data: &serde_json::Value) -> Option<Self> {
        let obj = match data.as_array() {
            Some(items) if !items.is_empty() => &items[0],
            _ => data,
        };

        if obj.is_null() {
            return None;
        }

        let field = |name: &str| {
            obj.get(name)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };

        Some(Self {
            text: field("q").unwrap_or_else(|| Self::MISSING_TEXT.to_string()),
            author: field("a").unwrap_or_else(|| Self::UNKNOWN_AUTHOR.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// `"40.00, -73.00"`
    pub fn label(&self) -> String {
        format!("{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

/// Display data for one weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherInfo {
    pub icon: &'static str,
    pub description: &'static str,
}

/// Hourly relative humidity as returned by Open-Meteo.
///
/// `time[i]` corresponds to `relativehumidity_2m[i]`. Either array may be
/// missing from the response; the series is then unusable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyHumiditySeries {
    pub time: Option<Vec<String>>,
    pub relativehumidity_2m: Option<Vec<Option<f64>>>,
}

/// The `current_weather` block of an Open-Meteo response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i64,
    #[serde(default)]
    pub time: Option<String>,
}

/// Parsed weather service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current_weather: CurrentWeather,
    #[serde(default)]
    pub hourly: Option<HourlyHumiditySeries>,
}

/// What the weather flow renders for a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub humidity: String,
    pub code: i64,
    pub observation_time: Option<String>,
}

impl WeatherSnapshot {
    pub fn from_report(report: &WeatherReport) -> Self {
        let cw = &report.current_weather;
        let target = cw.time.as_deref().unwrap_or_default();

        Self {
            temperature_c: cw.temperature,
            wind_speed_kmh: cw.windspeed,
            humidity: crate::humidity::resolve(report.hourly.as_ref(), target),
            code: cw.weathercode,
            observation_time: cw.time.clone(),
        }
    }

    /// Temperature rounded half up, the way it is displayed.
    pub fn rounded_temperature(&self) -> i64 {
        round_half_up(self.temperature_c)
    }
}

/// Round to the nearest integer with ties going towards positive infinity
/// (`-2.5` becomes `-2`, `2.5` becomes `3`).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Lifecycle of a single flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    RequestingLocation,
    Loading,
    Success,
    Error,
}
