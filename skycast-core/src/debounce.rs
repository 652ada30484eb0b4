//! Search-as-you-type debouncing.
//!
//! Every keystroke goes through [`SearchDebouncer::input`]. At most one
//! deferred search is pending at any time: a new keystroke aborts the previous
//! timer before scheduling its own. When the quiet period elapses, the lookup
//! runs as a detached task, so later keystrokes never cancel a request that is
//! already on the wire.

use std::sync::{
    Arc,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};

use tokio::{sync::watch, task::JoinHandle, time::sleep};
use tracing::debug;

use crate::{SearchResult, config::SearchConfig, lookup::CitySearch};

/// What a search box renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Latest input, updated on every keystroke.
    pub query: String,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    /// Query that produced `results`, `None` when they were cleared locally.
    pub answered: Option<String>,
}

#[derive(Debug)]
pub struct SearchDebouncer<S: CitySearch> {
    search: Arc<S>,
    config: SearchConfig,
    state: Arc<watch::Sender<SearchState>>,
    generation: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
    pending: Option<JoinHandle<()>>,
}

impl<S: CitySearch> SearchDebouncer<S> {
    pub fn new(search: Arc<S>, config: SearchConfig) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            search,
            config,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            pending: None,
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Feed the current contents of the search box.
    ///
    /// Must be called from within a tokio runtime.
    pub fn input(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.cancel_pending();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.chars().count() < self.config.min_query_len {
            self.state.send_modify(|s| {
                s.query = query;
                s.results.clear();
                s.loading = false;
                s.answered = None;
            });
            return;
        }

        self.state.send_modify(|s| s.query.clone_from(&query));

        let search = SearchRun {
            search: Arc::clone(&self.search),
            state: Arc::clone(&self.state),
            latest: Arc::clone(&self.generation),
            in_flight: Arc::clone(&self.in_flight),
            discard_stale: self.config.discard_stale,
            generation,
            query,
        };
        let quiet_period = self.config.quiet_period();

        self.pending = Some(tokio::spawn(async move {
            sleep(quiet_period).await;
            // Once spawned, the lookup is out of reach of `cancel_pending`.
            tokio::spawn(search.run());
        }));
    }

    /// Cancel a still-pending search. In-flight lookups are left alone.
    pub fn shutdown(&mut self) {
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<S: CitySearch> Drop for SearchDebouncer<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

struct SearchRun<S: CitySearch> {
    search: Arc<S>,
    state: Arc<watch::Sender<SearchState>>,
    latest: Arc<AtomicU64>,
    in_flight: Arc<AtomicUsize>,
    discard_stale: bool,
    generation: u64,
    query: String,
}

impl<S: CitySearch> SearchRun<S> {
    async fn run(self) {
        debug!(
            query = %self.query,
            generation = self.generation,
            "quiet period elapsed, searching"
        );
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| s.loading = true);

        let results = self.search.search(&self.query).await;
        let still_running = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;

        if self.discard_stale && self.latest.load(Ordering::SeqCst) != self.generation {
            debug!(query = %self.query, "dropping stale search response");
            // The latest lookup clears `loading` itself; only the last one out does it here.
            if still_running == 0 {
                self.state.send_modify(|s| s.loading = false);
            }
            return;
        }

        self.state.send_modify(|s| {
            s.results = results;
            s.loading = false;
            s.answered = Some(self.query);
        });
    }
}
