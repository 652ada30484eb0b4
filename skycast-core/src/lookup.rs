//! Failure-absorbing lookup layer on top of a [`WeatherProvider`].
//!
//! Nothing here returns an error. A failed search degrades to an empty list
//! and is only logged. A failed forecast fetch yields `None` and raises one
//! user-visible notification. The two paths differ on purpose.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::{
    Config, ForecastSnapshot, SearchResult,
    notify::{Notification, Notifier},
    provider::{ProviderError, WeatherProvider},
};

/// Anything that can answer a finished search query.
#[async_trait]
pub trait CitySearch: Send + Sync + 'static {
    async fn search(&self, query: &str) -> Vec<SearchResult>;
}

#[derive(Debug, Clone)]
pub struct LookupClient {
    provider: Arc<dyn WeatherProvider>,
    notifier: Arc<dyn Notifier>,
    target_country: String,
    forecast_days: u8,
}

impl LookupClient {
    pub fn new(provider: Arc<dyn WeatherProvider>, notifier: Arc<dyn Notifier>) -> Self {
        let defaults = Config::default();
        Self {
            provider,
            notifier,
            target_country: defaults.target_country,
            forecast_days: defaults.forecast_days,
        }
    }

    pub fn from_config(
        config: &Config,
        provider: Arc<dyn WeatherProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            notifier,
            target_country: config.target_country.clone(),
            forecast_days: config.forecast_days,
        }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Search cities, keeping only those in the target country, in upstream order.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        match self.provider.search_cities(query).await {
            Ok(cities) => {
                let total = cities.len();
                let results: Vec<SearchResult> = cities
                    .into_iter()
                    .filter(|city| city.country == self.target_country)
                    .map(SearchResult::from)
                    .collect();
                debug!(total, kept = results.len(), "city search finished");
                results
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "city search failed");
                Vec::new()
            }
        }
    }

    /// Fetch the full forecast for `city`. On failure notifies once and returns `None`.
    #[instrument(skip(self))]
    pub async fn get_forecast(&self, city: &str) -> Option<ForecastSnapshot> {
        match self.provider.get_forecast(city, self.forecast_days).await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                error!(error = %format!("{err:#}"), "forecast fetch failed");
                self.notifier.notify(Notification::error(failure_message(&err)));
                None
            }
        }
    }
}

#[async_trait]
impl CitySearch for LookupClient {
    async fn search(&self, query: &str) -> Vec<SearchResult> {
        LookupClient::search(self, query).await
    }
}

fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ProviderError>() {
        Some(ProviderError::Api { message, .. }) => format!("Error: {message}"),
        Some(ProviderError::Status { .. }) | None => {
            format!("Error: {}", err.root_cause())
        }
    }
}
