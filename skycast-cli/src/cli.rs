use std::{sync::Arc, time::Duration};

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use skycast_core::{
    ChannelNotifier, Config, Dashboard, LookupClient, Notification, POPULAR_CITIES,
    SearchDebouncer, SearchResult, provider_from_config,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::render;

/// Upper bound on how long `pick` waits for a debounced search to settle.
const SEARCH_SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather forecasts for cities across India")]
pub struct Cli {
    /// weatherapi.com API key; overrides the config file.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Override the API base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for a city by name.
    Search {
        /// Free-text query, at least 3 characters.
        query: String,
    },

    /// Show current conditions and the forecast for a city.
    Forecast {
        /// City name; defaults to `default_city` from the config.
        city: Option<String>,
    },

    /// Interactively search, pick a city and show its forecast.
    Pick,

    /// List the quick-select cities.
    Popular,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?.with_api_key(self.api_key);
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        match self.command {
            Command::Popular => {
                for city in POPULAR_CITIES {
                    println!("{city}");
                }
                Ok(())
            }
            Command::Search { query } => {
                let (lookup, _toasts) = lookup_client(&config)?;
                search(&config, &lookup, &query).await
            }
            Command::Forecast { city } => {
                let (lookup, toasts) = lookup_client(&config)?;
                let mut dashboard = Dashboard::new(lookup, &config);
                match city {
                    Some(city) => dashboard.select_city(city).await,
                    None => dashboard.load().await,
                };
                show_dashboard(&dashboard, toasts)
            }
            Command::Pick => {
                let (lookup, toasts) = lookup_client(&config)?;
                let city = pick_city(&config, &lookup).await?;
                let mut dashboard = Dashboard::new(lookup, &config);
                dashboard.select_city(city.name).await;
                show_dashboard(&dashboard, toasts)
            }
        }
    }
}

fn lookup_client(
    config: &Config,
) -> anyhow::Result<(LookupClient, UnboundedReceiver<Notification>)> {
    let provider = provider_from_config(config)?;
    let (notifier, toasts) = ChannelNotifier::new();
    Ok((LookupClient::from_config(config, provider, Arc::new(notifier)), toasts))
}

async fn search(config: &Config, lookup: &LookupClient, query: &str) -> anyhow::Result<()> {
    let min = config.search.min_query_len;
    if query.chars().count() < min {
        bail!("Type at least {min} characters to search.");
    }

    let results = lookup.search(query).await;
    if results.is_empty() {
        println!("No city found. Try a different search.");
    }
    for city in results {
        println!("{city}");
    }
    Ok(())
}

fn show_dashboard(
    dashboard: &Dashboard,
    mut toasts: UnboundedReceiver<Notification>,
) -> anyhow::Result<()> {
    while let Ok(toast) = toasts.try_recv() {
        render::toast(&toast);
    }

    match dashboard.snapshot().snapshot() {
        Some(snapshot) => {
            render::snapshot(snapshot);
            Ok(())
        }
        None => Err(anyhow!(
            "No weather data available for {}. Try searching for another Indian city.",
            dashboard.city()
        )),
    }
}

/// Each answer to the prompt is fed to the debouncer as one input event.
async fn pick_city(config: &Config, lookup: &LookupClient) -> anyhow::Result<SearchResult> {
    let mut debouncer = SearchDebouncer::new(Arc::new(lookup.clone()), config.search.clone());
    let mut state = debouncer.subscribe();
    let min = config.search.min_query_len;

    loop {
        let query = tokio::task::spawn_blocking(|| {
            Text::new("Search Indian cities:")
                .with_help_message("Press Esc to cancel")
                .prompt()
        })
        .await
        .context("Prompt task failed")??;

        debouncer.input(query.clone());
        if query.chars().count() < min {
            println!("Type at least {min} characters.");
            continue;
        }

        println!("Searching...");
        let settled = tokio::time::timeout(
            SEARCH_SETTLE_TIMEOUT,
            state.wait_for(|s| !s.loading && s.answered.as_deref() == Some(query.as_str())),
        )
        .await
        .context("City search timed out")?
        .context("City search was cancelled")?
        .clone();
        debug!(query = %query, results = settled.results.len(), "search settled");

        if settled.results.is_empty() {
            println!("No city found. Try a different search.");
            continue;
        }

        let picked = tokio::task::spawn_blocking(move || {
            Select::new("Cities", settled.results).prompt()
        })
        .await
        .context("Prompt task failed")??;

        debouncer.shutdown();
        return Ok(picked);
    }
}
