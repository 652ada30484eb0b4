use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    config::DEFAULT_BASE_URL,
    model::{CityMatch, ForecastSnapshot},
};

use super::{ProviderError, WeatherProvider};

/// Client for the weatherapi.com v1 REST API.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    async fn get_json(&self, endpoint: &str, query: &[(&str, &str)], what: &str) -> Result<String> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to weatherapi.com ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read weatherapi.com {what} response body"))?;

        debug!(%status, bytes = body.len(), "weatherapi.com {what} response");

        if !status.is_success() {
            return Err(error_from_body(status, &body).into());
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    error: WaErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WaErrorDetail {
    code: i64,
    message: String,
}

fn error_from_body(status: StatusCode, body: &str) -> ProviderError {
    match serde_json::from_str::<WaErrorBody>(body) {
        Ok(parsed) => ProviderError::Api {
            status: status.as_u16(),
            code: parsed.error.code,
            message: parsed.error.message,
        },
        Err(_) => ProviderError::Status { status: status.as_u16(), body: truncate_body(body) },
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self))]
    async fn search_cities(&self, query: &str) -> Result<Vec<CityMatch>> {
        let body = self.get_json("search.json", &[("q", query)], "search").await?;

        serde_json::from_str(&body).context("Failed to parse weatherapi.com search JSON")
    }

    #[instrument(skip(self))]
    async fn get_forecast(&self, city: &str, days: u8) -> Result<ForecastSnapshot> {
        let days = days.to_string();
        let body = self
            .get_json("forecast.json", &[("q", city), ("days", &days), ("aqi", "yes")], "forecast")
            .await?;

        serde_json::from_str(&body).context("Failed to parse weatherapi.com forecast JSON")
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
