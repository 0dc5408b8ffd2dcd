use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{SymbolLookup, SymbolMatch};
use crate::config::LookupConfig;
use crate::error::{NotaError, Result};

/// Yahoo Finance search response
#[derive(Debug, Deserialize)]
struct YahooSearchResponse {
    #[serde(default)]
    quotes: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    symbol: String,
}

/// Symbol search backed by the Yahoo Finance search endpoint
pub struct YahooSymbolLookup {
    client: Client,
    base_url: String,
    region: String,
}

impl YahooSymbolLookup {
    pub fn new(config: &LookupConfig) -> anyhow::Result<Self> {
        info!(
            "Using Yahoo Finance symbol search at {} (timeout {}s)",
            config.base_url, config.timeout_secs
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            region: config.region.clone(),
        })
    }

    fn search_url(&self, query: &str) -> std::result::Result<Url, String> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("q", query),
                ("quotesCount", "1"),
                ("country", self.region.as_str()),
            ],
        )
        .map_err(|e| format!("invalid search URL '{}': {}", self.base_url, e))
    }
}

impl SymbolLookup for YahooSymbolLookup {
    fn search(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        let transport = |reason: String| NotaError::LookupTransportFailure {
            query: query.to_string(),
            reason,
        };

        let url = self.search_url(query).map_err(transport)?;
        debug!("Searching Yahoo Finance for '{}'", query);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(transport(format!(
                "Yahoo Finance returned error status: {}",
                response.status()
            )));
        }

        let data: YahooSearchResponse = response
            .json()
            .map_err(|e| transport(format!("failed to parse Yahoo Finance response: {}", e)))?;

        debug!("Yahoo Finance returned {} quotes for '{}'", data.quotes.len(), query);
        Ok(data
            .quotes
            .into_iter()
            .map(|q| SymbolMatch::new(q.symbol))
            .collect())
    }
}
