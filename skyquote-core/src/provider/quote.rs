use async_trait::async_trait;
use reqwest::Client;

use crate::{error::FetchError, model::Quote};

use super::QuoteSource;

/// Random quote endpoint returning ZenQuotes-shaped JSON (`q`, `a`).
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    url: String,
    http: Client,
}

impl HttpQuoteSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch_quote(&self) -> Result<Quote, FetchError> {
        let res = self.http.get(&self.url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::status(status, &body));
        }

        let data: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(format!("quote JSON: {e}")))?;

        Quote::from_json(&data)
            .ok_or_else(|| FetchError::Malformed("quote response was null".to_string()))
    }
}
