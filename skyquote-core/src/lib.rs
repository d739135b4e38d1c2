//! Core library for the `skyquote` widget.
//!
//! This crate defines:
//! - Weather code classification and humidity lookup
//! - The quote and weather flows and the display they write to
//! - Abstractions over the quote service, weather service and geolocation
//! - Configuration handling
//!
//! It is used by `skyquote-cli`, but any front-end that implements
//! [`PresentationSink`] can drive it.

pub mod app;
pub mod classify;
pub mod config;
pub mod error;
pub mod flow;
pub mod geolocation;
pub mod humidity;
pub mod model;
pub mod presentation;
pub mod provider;

pub use app::App;
pub use config::{Config, LocationConfig, LocationSource};
pub use error::{FetchError, GeolocationError};
pub use geolocation::{GeolocationOptions, Geolocator};
pub use model::{Coordinates, FlowState, Quote, WeatherInfo, WeatherReport, WeatherSnapshot};
pub use presentation::{Control, Field, Markup, MemorySink, PresentationSink, StatusClass};
pub use provider::{QuoteSource, WeatherSource};
