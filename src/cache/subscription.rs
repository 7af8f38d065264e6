//! Typed views over cache entries.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;

use crate::infra::transport::ApiError;

use super::keys::QueryKey;
use super::state::{QueryState, QueryStatus};
use super::store::{Erased, ErasedFetcher, QueryCache};

/// A key, a fetcher for it, and whether it may run at all.
pub struct QuerySpec<T> {
    key: QueryKey,
    enabled: bool,
    fetcher: ErasedFetcher,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for QuerySpec<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            enabled: self.enabled,
            fetcher: self.fetcher.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for QuerySpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySpec")
            .field("key", &self.key)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> QuerySpec<T> {
    pub fn new<F, Fut>(key: QueryKey, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        // Calling the erased fetcher only builds a future; the user closure
        // runs on first poll, outside the cache lock.
        let fetch = Arc::new(fetch);
        let fetcher: ErasedFetcher = Arc::new(move || {
            let fetch = fetch.clone();
            async move { fetch().await.map(|value| Arc::new(value) as Erased) }.boxed()
        });
        Self {
            key,
            enabled: true,
            fetcher,
            _marker: PhantomData,
        }
    }
}

impl<T> QuerySpec<T> {
    /// Gate the spec. Gates combine: a spec disabled once stays disabled.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = self.enabled && enabled;
        self
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn fetcher(&self) -> &ErasedFetcher {
        &self.fetcher
    }
}

/// Per-subscription behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// While a changed key loads, keep showing the previous key's data.
    pub keep_previous_data: bool,
}

struct Mounted {
    key: QueryKey,
    changes: watch::Receiver<u64>,
}

/// A live view of one query. The key may change over the subscription's
/// life; dropping it releases the entry for eviction.
pub struct Subscription<T> {
    cache: QueryCache,
    spec: QuerySpec<T>,
    mounted: Option<Mounted>,
    options: QueryOptions,
    placeholder: Option<Arc<T>>,
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("spec", &self.spec)
            .field("options", &self.options)
            .field("has_placeholder", &self.placeholder.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> Subscription<T> {
    pub(crate) fn new(cache: QueryCache, spec: QuerySpec<T>) -> Self {
        let options = QueryOptions {
            keep_previous_data: cache.config().keep_previous_data,
        };
        let mut subscription = Self {
            cache,
            spec,
            mounted: None,
            options,
            placeholder: None,
        };
        subscription.mount();
        subscription
    }

    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn key(&self) -> &QueryKey {
        self.spec.key()
    }

    pub fn is_enabled(&self) -> bool {
        self.spec.is_enabled()
    }

    /// Current state for the current key. A disabled spec reads as idle.
    pub fn state(&self) -> QueryState<T> {
        let Some(mounted) = &self.mounted else {
            return QueryState::idle();
        };
        let mut state = self
            .cache
            .snapshot(&mounted.key)
            .map_or_else(QueryState::idle, |snapshot| {
                snapshot.into_state(&mounted.key)
            });
        if state.data.is_none()
            && state.status == QueryStatus::Loading
            && let Some(previous) = &self.placeholder
        {
            state.data = Some(previous.clone());
            state.is_placeholder = true;
        }
        state
    }

    /// Point the subscription at a new spec.
    ///
    /// With the same key and gate only the fetcher is swapped. Otherwise the
    /// old key is released, the data shown for it is kept as placeholder when
    /// `keep_previous_data` is set, and the new key is mounted. A late
    /// response for the old key lands in the old entry and is never shown
    /// here.
    pub fn set_query(&mut self, spec: QuerySpec<T>) {
        if spec.key() == self.spec.key() && spec.is_enabled() == self.spec.is_enabled() {
            if let Some(mounted) = &self.mounted {
                self.cache.replace_fetcher(&mounted.key, spec.fetcher());
            }
            self.spec = spec;
            return;
        }

        self.placeholder = if self.options.keep_previous_data {
            self.state().data
        } else {
            None
        };
        self.unmount();
        self.spec = spec;
        self.mount();
    }

    /// Force a new request for the current key. The pending one, if any,
    /// is superseded.
    pub fn refetch(&self) {
        if let Some(mounted) = &self.mounted {
            self.cache.refetch(&mounted.key);
        }
    }

    /// Wait for the next change to the current key's entry. Returns `false`
    /// when nothing can change: the spec is disabled.
    pub async fn changed(&mut self) -> bool {
        match &mut self.mounted {
            Some(mounted) => mounted.changes.changed().await.is_ok(),
            None => false,
        }
    }

    /// Wait until the current key is no longer loading.
    pub async fn settled(&mut self) -> QueryState<T> {
        loop {
            let state = self.state();
            if state.status != QueryStatus::Loading {
                return state;
            }
            if !self.changed().await {
                return self.state();
            }
        }
    }

    fn mount(&mut self) {
        if !self.spec.is_enabled() {
            return;
        }
        let key = self.spec.key().clone();
        let changes = self.cache.mount(&key, self.spec.fetcher());
        self.mounted = Some(Mounted { key, changes });
    }

    fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            self.cache.unmount(&mounted.key);
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            self.cache.unmount(&mounted.key);
        }
    }
}
