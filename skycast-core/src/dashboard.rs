//! Selected-city forecast state.

use tracing::info;

use crate::{
    Config, ForecastSnapshot,
    lookup::LookupClient,
    notify::Notification,
};

/// Quick-select shortcuts offered next to the search box.
pub const POPULAR_CITIES: &[&str] = &[
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Hyderabad",
    "Chennai",
    "Kolkata",
    "Pune",
    "Jaipur",
    "Lucknow",
    "Ahmedabad",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SnapshotState {
    /// Nothing fetched yet, or the last fetch failed.
    #[default]
    Empty,
    Ready(Box<ForecastSnapshot>),
}

impl SnapshotState {
    pub fn snapshot(&self) -> Option<&ForecastSnapshot> {
        match self {
            SnapshotState::Empty => None,
            SnapshotState::Ready(snapshot) => Some(snapshot.as_ref()),
        }
    }
}

/// Holds the selected city and the forecast fetched for it.
///
/// Forecast fetches are triggered by selection, never by typing, so they are
/// not debounced.
#[derive(Debug)]
pub struct Dashboard {
    lookup: LookupClient,
    city: String,
    snapshot: SnapshotState,
}

impl Dashboard {
    pub fn new(lookup: LookupClient, config: &Config) -> Self {
        Self { lookup, city: config.default_city.clone(), snapshot: SnapshotState::Empty }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn snapshot(&self) -> &SnapshotState {
        &self.snapshot
    }

    /// Fetch the forecast for the current city. A blank city is a no-op.
    pub async fn load(&mut self) -> &SnapshotState {
        if self.city.trim().is_empty() {
            return &self.snapshot;
        }

        self.snapshot = match self.lookup.get_forecast(&self.city).await {
            Some(snapshot) => {
                info!(city = %self.city, "forecast loaded");
                SnapshotState::Ready(Box::new(snapshot))
            }
            None => SnapshotState::Empty,
        };
        &self.snapshot
    }

    /// Switch to `city` and fetch its forecast.
    pub async fn select_city(&mut self, city: impl Into<String>) -> &SnapshotState {
        self.city = city.into();
        if !self.city.trim().is_empty() {
            self.lookup
                .notifier()
                .notify(Notification::info(format!("Loading weather data for {}", self.city)));
        }
        self.load().await
    }
}
