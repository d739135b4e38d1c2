use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    classify::classify,
    error::{FetchError, GeolocationError},
    geolocation::{GeolocationOptions, Geolocator},
    model::{Coordinates, FlowState, WeatherReport, WeatherSnapshot},
    presentation::{Field, Markup, PresentationSink, StatusClass},
    provider::WeatherSource,
};

pub const UNSUPPORTED_STATUS: &str = "Geolocation is not supported by your browser.";
pub const UNSUPPORTED_DESCRIPTION: &str = "Location unavailable.";
pub const UNSUPPORTED_LOCATION: &str = "Not supported";

pub const DENIED_STATUS: &str =
    "Location permission denied. Weather cannot be shown without your approximate location.";
pub const DENIED_DESCRIPTION: &str = "Location access denied.";
pub const DENIED_LOCATION: &str = "Permission denied";

pub const LOCATION_FAILED_STATUS: &str = "Could not get your location.";
pub const LOCATION_FAILED_DESCRIPTION: &str = "Location unavailable.";

pub const FETCH_FAILED_STATUS: &str =
    "Could not load weather. Please check your internet connection or try again later.";
pub const LOADED_STATUS: &str = "Weather loaded using your browser location.";

/// Locates the user, fetches current conditions and writes the weather fields.
#[derive(Debug)]
pub struct WeatherFlow {
    geolocator: Option<Arc<dyn Geolocator>>,
    source: Arc<dyn WeatherSource>,
    sink: Arc<dyn PresentationSink>,
    options: GeolocationOptions,
    state: Mutex<FlowState>,
}

impl WeatherFlow {
    /// `geolocator: None` means the host has no way to locate the user.
    pub fn new(
        geolocator: Option<Arc<dyn Geolocator>>,
        source: Arc<dyn WeatherSource>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            geolocator,
            source,
            sink,
            options: GeolocationOptions::default(),
            state: Mutex::new(FlowState::Idle),
        }
    }

    pub fn state(&self) -> FlowState {
        *self.state.lock()
    }

    pub async fn run(&self) {
        let Some(geolocator) = &self.geolocator else {
            self.show_unsupported();
            return;
        };

        *self.state.lock() = FlowState::RequestingLocation;
        self.sink.set_markup(Field::WeatherStatus, Markup::Loading("Requesting your location"));

        match geolocator.current_position(&self.options).await {
            Ok(coords) => self.load_weather(coords).await,
            Err(err) => self.show_location_error(&err),
        }
    }

    async fn load_weather(&self, coords: Coordinates) {
        *self.state.lock() = FlowState::Loading;
        self.sink.set_markup(Field::WeatherStatus, Markup::Loading("Fetching current weather"));
        self.sink.remove_class(Field::WeatherStatus, StatusClass::Error);
        self.sink.remove_class(Field::WeatherStatus, StatusClass::Success);

        match self.source.current_weather(coords).await {
            Ok(report) => self.show_weather(&report, coords),
            Err(err) => self.show_fetch_error(&err),
        }
    }

    fn show_weather(&self, report: &WeatherReport, coords: Coordinates) {
        let snapshot = WeatherSnapshot::from_report(report);
        let info = classify(snapshot.code);
        let temperature = snapshot.rounded_temperature();

        self.sink.set_text(Field::WeatherIcon, info.icon);
        self.sink.set_markup(Field::Temperature, Markup::Temperature(temperature));
        self.sink.set_text(Field::WeatherDescription, info.description);

        // No separate apparent-temperature reading is requested.
        self.sink.set_text(Field::FeelsLike, &format!("Feels like: {temperature}°C"));
        self.sink.set_text(Field::Wind, &format!("Wind: {} km/h", snapshot.wind_speed_kmh));
        self.sink.set_text(Field::Humidity, &format!("Humidity: {}", snapshot.humidity));
        self.sink.set_text(Field::WeatherLocation, &coords.label());

        self.sink.add_class(Field::WeatherStatus, StatusClass::Success);
        self.sink.set_text(Field::WeatherStatus, LOADED_STATUS);

        *self.state.lock() = FlowState::Success;
        tracing::info!(
            code = snapshot.code,
            humidity = %snapshot.humidity,
            observed = snapshot.observation_time.as_deref().unwrap_or("unknown"),
            "Weather loaded for {}",
            coords.label()
        );
    }

    fn show_unsupported(&self) {
        tracing::warn!("No geolocation capability available");

        self.sink.add_class(Field::WeatherStatus, StatusClass::Error);
        self.sink.set_text(Field::WeatherStatus, UNSUPPORTED_STATUS);
        self.sink.set_text(Field::WeatherDescription, UNSUPPORTED_DESCRIPTION);
        self.sink.set_text(Field::WeatherLocation, UNSUPPORTED_LOCATION);

        *self.state.lock() = FlowState::Error;
    }

    fn show_location_error(&self, err: &GeolocationError) {
        tracing::warn!("Geolocation error: {err}");

        self.sink.add_class(Field::WeatherStatus, StatusClass::Error);
        match err {
            GeolocationError::PermissionDenied => {
                self.sink.set_text(Field::WeatherStatus, DENIED_STATUS);
                self.sink.set_text(Field::WeatherDescription, DENIED_DESCRIPTION);
                self.sink.set_text(Field::WeatherLocation, DENIED_LOCATION);
            }
            GeolocationError::PositionUnavailable(_) | GeolocationError::Timeout => {
                self.sink.set_text(Field::WeatherStatus, LOCATION_FAILED_STATUS);
                self.sink.set_text(Field::WeatherDescription, LOCATION_FAILED_DESCRIPTION);
            }
        }

        *self.state.lock() = FlowState::Error;
    }

    fn show_fetch_error(&self, err: &FetchError) {
        tracing::error!("Failed to fetch weather: {err}");

        self.sink.add_class(Field::WeatherStatus, StatusClass::Error);
        self.sink.set_text(Field::WeatherStatus, FETCH_FAILED_STATUS);

        *self.state.lock() = FlowState::Error;
    }
}
