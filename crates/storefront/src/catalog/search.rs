//! Debounced catalog search.
//!
//! Every edit to the search inputs schedules a query after a fixed quiet
//! window. Each submission bumps a sequence counter; a woken task that is no
//! longer the latest exits before fetching, and a response that arrives
//! after a newer submission is discarded without touching state. That
//! ordering guarantee is the whole point: a slow early response must never
//! overwrite a newer result set.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::watch;

use crate::api::{ApiError, ProductSource};
use crate::catalog::{CatalogQuery, CatalogState};

use voltpeak_core::Product;

/// Debounced query pipeline over a [`ProductSource`].
///
/// Shared state lives behind `Arc`s so the pipeline itself can be cheaply
/// cloned into front-end tasks.
pub struct SearchPipeline<S> {
    source: Arc<S>,
    window: Duration,
    seq: Arc<AtomicU64>,
    state: Arc<RwLock<CatalogState>>,
    applied_tx: Arc<watch::Sender<u64>>,
}

impl<S> Clone for SearchPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            window: self.window,
            seq: Arc::clone(&self.seq),
            state: Arc::clone(&self.state),
            applied_tx: Arc::clone(&self.applied_tx),
        }
    }
}

impl<S: ProductSource> SearchPipeline<S> {
    /// Create a pipeline with the given quiet window.
    #[must_use]
    pub fn new(source: S, window: Duration) -> Self {
        let (applied_tx, _) = watch::channel(0);
        Self {
            source: Arc::new(source),
            window,
            seq: Arc::new(AtomicU64::new(0)),
            state: Arc::new(RwLock::new(CatalogState::new())),
            applied_tx: Arc::new(applied_tx),
        }
    }

    /// The shared catalog view state.
    #[must_use]
    pub fn state(&self) -> Arc<RwLock<CatalogState>> {
        Arc::clone(&self.state)
    }

    /// Run `f` against the current catalog state.
    pub fn with_state<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Switch the category tab (client-side only, no fetch).
    pub fn select_category(&self, category: impl Into<String>) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        guard.select_category(category);
    }

    /// Subscribe to the sequence numbers of applied result sets.
    ///
    /// The receiver observes the sequence of each submission whose results
    /// (or failure) actually settled the pipeline.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.applied_tx.subscribe()
    }

    /// Submit edited search inputs.
    ///
    /// Starts a fresh quiet window and supersedes any pending submission.
    /// Only the request issued after the shopper stops editing for the whole
    /// window reaches the backend.
    pub fn submit(&self, query: CatalogQuery) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        if query.is_inverted_range() {
            tracing::debug!(
                min = %query.min_price,
                max = %query.max_price,
                "price range is inverted; passing through for the backend to interpret"
            );
        }

        {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            guard.loading = true;
        }

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.seq);
        let applied_tx = Arc::clone(&self.applied_tx);
        let window = self.window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;

            // Superseded while waiting out the quiet window: never fetch.
            if latest.load(Ordering::SeqCst) != seq {
                return;
            }

            let result = source.search(query).await;

            // A newer submission won while this request was in flight: the
            // response is stale, discard it.
            if latest.load(Ordering::SeqCst) != seq {
                tracing::debug!(seq, "discarding stale catalog response");
                return;
            }

            let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
            match result {
                Ok(products) => {
                    tracing::debug!(seq, count = products.len(), "catalog results applied");
                    guard.apply_results(products);
                }
                Err(e) => {
                    // Previous results stay; no retry.
                    tracing::error!(seq, error = %e, "catalog query failed");
                }
            }
            guard.loading = false;
            drop(guard);

            let _ = applied_tx.send(seq);
        });
    }

    /// Run a query immediately, bypassing the debounce window and shared
    /// state (one-shot front ends).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the backend call fails.
    pub async fn query_now(&self, query: CatalogQuery) -> Result<Vec<Product>, ApiError> {
        if query.is_inverted_range() {
            tracing::debug!("price range is inverted; passing through");
        }
        self.source.search(query).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use voltpeak_core::Price;

    /// Fake backend: records every query, answers with one product named
    /// after the keyword, and can delay each call by a scripted latency.
    struct FakeCatalog {
        queries: Mutex<Vec<CatalogQuery>>,
        latencies: Mutex<VecDeque<Duration>>,
        fail: Mutex<bool>,
    }

    impl FakeCatalog {
        fn new() -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
                latencies: Mutex::new(VecDeque::new()),
                fail: Mutex::new(false),
            }
        }

        fn with_latencies(latencies: impl IntoIterator<Item = u64>) -> Self {
            let fake = Self::new();
            *fake.latencies.lock().unwrap() = latencies
                .into_iter()
                .map(Duration::from_millis)
                .collect();
            fake
        }

        fn query_count(&self) -> usize {
            self.queries.lock().unwrap().len()
        }

        fn last_keyword(&self) -> String {
            self.queries.lock().unwrap().last().unwrap().keyword.clone()
        }
    }

    impl ProductSource for FakeCatalog {
        async fn search(&self, query: CatalogQuery) -> Result<Vec<Product>, ApiError> {
            let latency = self.latencies.lock().unwrap().pop_front();
            let keyword = query.keyword.clone();
            self.queries.lock().unwrap().push(query);

            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }

            if *self.fail.lock().unwrap() {
                return Err(ApiError::Backend {
                    status: 500,
                    message: "backend down".to_owned(),
                });
            }

            Ok(vec![Product::new(
                format!("p-{keyword}"),
                keyword,
                Price::from_units(1000),
            )])
        }
    }

    fn query(keyword: &str) -> CatalogQuery {
        CatalogQuery {
            keyword: keyword.to_owned(),
            ..CatalogQuery::default()
        }
    }

    const WINDOW: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_issue_one_query() {
        let pipeline = SearchPipeline::new(FakeCatalog::new(), WINDOW);
        let mut applied = pipeline.subscribe();

        // "a", "ab", "abc" at 100ms intervals
        pipeline.submit(query("a"));
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(100)).await;
        pipeline.submit(query("ab"));
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(100)).await;
        pipeline.submit(query("abc"));
        tokio::task::yield_now().await;

        // Let the final quiet window elapse.
        tokio::time::advance(WINDOW).await;
        applied.changed().await.unwrap();

        let source = pipeline.source.as_ref();
        assert_eq!(source.query_count(), 1);
        assert_eq!(source.last_keyword(), "abc");

        pipeline.with_state(|s| {
            assert_eq!(s.products.len(), 1);
            assert_eq!(s.products[0].name, "abc");
            assert!(!s.loading);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_response_is_discarded() {
        // First query takes 1000ms, second is instant.
        let pipeline = SearchPipeline::new(FakeCatalog::with_latencies([1000, 0]), WINDOW);
        let mut applied = pipeline.subscribe();

        pipeline.submit(query("slow"));
        tokio::task::yield_now().await;
        // Quiet window elapses; the slow request goes out.
        tokio::time::advance(WINDOW).await;
        tokio::task::yield_now().await;

        // A new submission supersedes it while it is still in flight.
        pipeline.submit(query("fast"));
        tokio::task::yield_now().await;
        tokio::time::advance(WINDOW).await;
        applied.changed().await.unwrap();

        pipeline.with_state(|s| assert_eq!(s.products[0].name, "fast"));

        // The slow response eventually lands - and must change nothing.
        tokio::time::advance(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;

        let source = pipeline.source.as_ref();
        assert_eq!(source.query_count(), 2);
        pipeline.with_state(|s| assert_eq!(s.products[0].name, "fast"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_results_and_clears_loading() {
        let pipeline = SearchPipeline::new(FakeCatalog::new(), WINDOW);
        let mut applied = pipeline.subscribe();

        pipeline.submit(query("good"));
        tokio::time::advance(WINDOW).await;
        applied.changed().await.unwrap();

        *pipeline.source.fail.lock().unwrap() = true;
        pipeline.submit(query("bad"));
        tokio::time::advance(WINDOW).await;
        applied.changed().await.unwrap();

        pipeline.with_state(|s| {
            assert_eq!(s.products.len(), 1);
            assert_eq!(s.products[0].name, "good");
            assert!(!s.loading);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_replace_not_merge() {
        let pipeline = SearchPipeline::new(FakeCatalog::new(), WINDOW);
        let mut applied = pipeline.subscribe();

        pipeline.submit(query("first"));
        tokio::time::advance(WINDOW).await;
        applied.changed().await.unwrap();

        pipeline.submit(query("second"));
        tokio::time::advance(WINDOW).await;
        applied.changed().await.unwrap();

        pipeline.with_state(|s| {
            assert_eq!(s.products.len(), 1);
            assert_eq!(s.products[0].name, "second");
        });
    }
}
