use std::sync::Arc;

use anyhow::Result;

use crate::{
    Config,
    flow::{QuoteFlow, WeatherFlow},
    geolocation::Geolocator,
    model::FlowState,
    presentation::PresentationSink,
    provider::{QuoteSource, WeatherSource, quote_source_from_config, weather_source_from_config},
};

/// Both flows wired to one display.
#[derive(Debug)]
pub struct App {
    quote: QuoteFlow,
    weather: WeatherFlow,
}

impl App {
    pub fn new(
        quotes: Arc<dyn QuoteSource>,
        weather: Arc<dyn WeatherSource>,
        geolocator: Option<Arc<dyn Geolocator>>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            quote: QuoteFlow::new(quotes, sink.clone()),
            weather: WeatherFlow::new(geolocator, weather, sink),
        }
    }

    pub fn from_config(config: &Config, sink: Arc<dyn PresentationSink>) -> Result<Self> {
        Ok(Self::new(
            quote_source_from_config(config),
            weather_source_from_config(config),
            config.geolocator()?,
            sink,
        ))
    }

    /// First quote and weather, fetched concurrently.
    pub async fn on_load(&self) {
        tracing::debug!("Loading initial quote and weather");
        tokio::join!(self.quote.run(), self.weather.run());
    }

    /// The "new quote" action.
    pub async fn request_new_quote(&self) {
        self.quote.run().await;
    }

    pub fn quote_state(&self) -> FlowState {
        self.quote.state()
    }

    pub fn weather_state(&self) -> FlowState {
        self.weather.state()
    }
}
