use std::time::Instant;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::GeolocationError, model::Coordinates};

use super::{GeolocationOptions, Geolocator};

pub const DEFAULT_IP_LOOKUP_URL: &str = "http://ip-api.com/json";

/// Approximate position from the public IP address (ip-api.com JSON shape).
///
/// The last successful fix is kept in memory and reused while it is younger
/// than [`GeolocationOptions::maximum_age`].
#[derive(Debug)]
pub struct IpGeolocator {
    url: String,
    http: Client,
    last_fix: Mutex<Option<(Instant, Coordinates)>>,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new(), last_fix: Mutex::new(None) }
    }

    fn cached(&self, options: &GeolocationOptions) -> Option<Coordinates> {
        let last_fix = *self.last_fix.lock();
        last_fix
            .filter(|(at, _)| at.elapsed() <= options.maximum_age)
            .map(|(_, coords)| coords)
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new(DEFAULT_IP_LOOKUP_URL)
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(
        &self,
        options: &GeolocationOptions,
    ) -> Result<Coordinates, GeolocationError> {
        if let Some(coords) = self.cached(options) {
            tracing::debug!("Reusing cached IP location fix");
            return Ok(coords);
        }

        if options.high_accuracy {
            tracing::debug!("High accuracy requested; IP lookup is approximate only");
        }

        let res = self
            .http
            .get(&self.url)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        if !res.status().is_success() {
            return Err(GeolocationError::PositionUnavailable(format!(
                "IP lookup returned status {}",
                res.status()
            )));
        }

        let body: IpApiResponse = res.json().await.map_err(classify_transport)?;

        let coords = match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(lat), Some(lon)) => Coordinates::new(lat, lon),
            _ => {
                return Err(GeolocationError::PositionUnavailable(
                    body.message.unwrap_or_else(|| "IP lookup failed".to_string()),
                ));
            }
        };

        *self.last_fix.lock() = Some((Instant::now(), coords));
        tracing::info!("Located via IP at {}", coords.label());

        Ok(coords)
    }
}

fn classify_transport(err: reqwest::Error) -> GeolocationError {
    if err.is_timeout() {
        GeolocationError::Timeout
    } else {
        GeolocationError::PositionUnavailable(err.to_string())
    }
}
