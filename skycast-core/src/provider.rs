use crate::{
    Config, ForecastSnapshot,
    model::CityMatch,
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

pub mod weatherapi;

/// Failures reported by the upstream weather service itself, as opposed to
/// transport or decoding failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The service answered with its structured `{"error": {...}}` body.
    #[error("{message}")]
    Api { status: u16, code: i64, message: String },

    /// Non-success status without a recognisable error body.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Raw access to a weather service. Every failure is returned to the caller;
/// see [`crate::LookupClient`] for the layer that absorbs them.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Free-text city search, in upstream order and unfiltered.
    async fn search_cities(&self, query: &str) -> anyhow::Result<Vec<CityMatch>>;

    /// Current conditions plus `days` of forecast, with air quality.
    async fn get_forecast(&self, city: &str, days: u8) -> anyhow::Result<ForecastSnapshot>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;

    Ok(Arc::new(WeatherApiProvider::with_base_url(
        api_key.to_owned(),
        config.base_url.clone(),
    )))
}
