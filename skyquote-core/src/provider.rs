//! HTTP data sources the flows depend on.

use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::{
    Config,
    error::FetchError,
    model::{Coordinates, Quote, WeatherReport},
    provider::{open_meteo::OpenMeteoSource, quote::HttpQuoteSource},
};

pub mod open_meteo;
pub mod quote;

pub const DEFAULT_QUOTE_URL: &str = "https://zenquotes.io/api/random";
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[async_trait]
pub trait QuoteSource: Send + Sync + Debug {
    /// Fetch one random quote.
    async fn fetch_quote(&self) -> Result<Quote, FetchError>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Fetch current conditions plus hourly humidity for `coords`.
    async fn current_weather(&self, coords: Coordinates) -> Result<WeatherReport, FetchError>;
}

/// Build the quote source described by `config`.
pub fn quote_source_from_config(config: &Config) -> Arc<dyn QuoteSource> {
    Arc::new(HttpQuoteSource::new(config.quote_url()))
}

/// Build the weather source described by `config`.
pub fn weather_source_from_config(config: &Config) -> Arc<dyn WeatherSource> {
    Arc::new(OpenMeteoSource::new(config.weather_url()))
}
