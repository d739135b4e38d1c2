//! The two trigger-to-display sequences.

pub mod quote;
pub mod weather;

pub use quote::QuoteFlow;
pub use weather::WeatherFlow;
