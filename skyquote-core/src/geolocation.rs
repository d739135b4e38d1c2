//! Position acquisition.
//!
//! A missing geolocator (`Option::None`) means the host cannot locate the
//! user at all; implementations only report why a lookup failed.

use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;

use crate::{error::GeolocationError, model::Coordinates};

pub mod ip;

pub use ip::IpGeolocator;

/// Lookup parameters passed to every [`Geolocator`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    /// Give up after this long.
    pub timeout: Duration,
    /// A previously acquired fix younger than this may be reused.
    pub maximum_age: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout: Duration::from_millis(8_000),
            maximum_age: Duration::from_millis(5 * 60 * 1000),
        }
    }
}

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(
        &self,
        options: &GeolocationOptions,
    ) -> Result<Coordinates, GeolocationError>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    coords: Coordinates,
}

impl FixedGeolocator {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(
        &self,
        _options: &GeolocationOptions,
    ) -> Result<Coordinates, GeolocationError> {
        Ok(self.coords)
    }
}

/// The user declined to share their location.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedGeolocator;

#[async_trait]
impl Geolocator for DeniedGeolocator {
    async fn current_position(
        &self,
        _options: &GeolocationOptions,
    ) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = GeolocationOptions::default();
        assert!(!opts.high_accuracy);
        assert_eq!(opts.timeout, Duration::from_secs(8));
        assert_eq!(opts.maximum_age, Duration::from_secs(300));
    }

    #[tokio::test]
    async fn fixed_returns_its_coordinates() {
        let geo = FixedGeolocator::new(Coordinates::new(1.5, 2.5));
        let pos = geo.current_position(&GeolocationOptions::default()).await;
        assert_eq!(pos, Ok(Coordinates::new(1.5, 2.5)));
    }

    #[tokio::test]
    async fn denied_reports_permission_denied() {
        let pos = DeniedGeolocator.current_position(&GeolocationOptions::default()).await;
        assert_eq!(pos, Err(GeolocationError::PermissionDenied));
    }
}
