use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{Coordinates, CurrentWeather, HourlyHumiditySeries, WeatherReport},
};

use super::WeatherSource;

/// Open-Meteo forecast API (no key required).
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    url: String,
    http: Client,
}

impl OpenMeteoSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current_weather: Option<CurrentWeather>,
    hourly: Option<HourlyHumiditySeries>,
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    async fn current_weather(&self, coords: Coordinates) -> Result<WeatherReport, FetchError> {
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("latitude", coords.latitude.to_string().as_str()),
                ("longitude", coords.longitude.to_string().as_str()),
                ("current_weather", "true"),
                ("hourly", "relativehumidity_2m"),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::status(status, &body));
        }

        let parsed: OmResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(format!("Open-Meteo JSON: {e}")))?;

        let current_weather = parsed
            .current_weather
            .ok_or_else(|| FetchError::Malformed("No current weather data".to_string()))?;

        Ok(WeatherReport { current_weather, hourly: parsed.hourly })
    }
}
