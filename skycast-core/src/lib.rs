//! Core library for the SkyCast weather dashboard.
//!
//! This crate defines:
//! - Configuration loading
//! - Access to the weatherapi.com search and forecast endpoints
//! - A failure-absorbing lookup layer with user-facing notifications
//! - Debounced search-as-you-type
//! - Selected-city forecast state and condition-code categories
//!
//! It is used by `skycast-cli`, but any front-end can drive it.

pub mod condition;
pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod lookup;
pub mod model;
pub mod notify;
pub mod provider;

pub use condition::Condition;
pub use config::{Config, SearchConfig};
pub use dashboard::{Dashboard, POPULAR_CITIES, SnapshotState};
pub use debounce::{SearchDebouncer, SearchState};
pub use lookup::{CitySearch, LookupClient};
pub use model::{AirQualityCategory, ForecastSnapshot, SearchResult};
pub use notify::{ChannelNotifier, Notification, Notifier, TracingNotifier};
pub use provider::{ProviderError, WeatherProvider, provider_from_config};
