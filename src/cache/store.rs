//! Process-wide query cache.
//!
//! Every entry is keyed by a [`QueryKey`] and owns at most one request in
//! flight. Readers that arrive while a request is pending join it instead of
//! issuing another. Each issued request carries a generation number; a
//! response is applied only if its generation is still the entry's current
//! one, so the last-issued request always wins.

use std::any::Any;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use lru::LruCache;
use metrics::{counter, gauge};
use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::infra::transport::ApiError;

use super::config::CacheConfig;
use super::keys::{KeyPrefix, QueryKey};
use super::lock::{Site, lock};
use super::state::{QueryState, QueryStatus};
use super::subscription::{QueryOptions, QuerySpec, Subscription};

const SOURCE: &str = "cache::store";

pub(crate) type Erased = Arc<dyn Any + Send + Sync>;
pub(crate) type ErasedResult = Result<Erased, ApiError>;
pub(crate) type ErasedFetcher = Arc<dyn Fn() -> BoxFuture<'static, ErasedResult> + Send + Sync>;
type InFlight = Shared<BoxFuture<'static, ErasedResult>>;

struct Entry {
    status: QueryStatus,
    data: Option<Erased>,
    error: Option<ApiError>,
    fetched_at: Option<(Instant, OffsetDateTime)>,
    stale: bool,
    /// Generation of the most recently issued request or direct write.
    generation: u64,
    in_flight: Option<(u64, InFlight)>,
    /// Last fetcher registered for this key; reused by invalidation.
    fetcher: Option<ErasedFetcher>,
    subscribers: usize,
    version: watch::Sender<u64>,
}

impl Entry {
    fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            fetched_at: None,
            stale: false,
            generation: 0,
            in_flight: None,
            fetcher: None,
            subscribers: 0,
            version,
        }
    }

    fn notify(&self) {
        self.version.send_modify(|v| *v = v.wrapping_add(1));
    }

    fn is_fresh(&self, stale_time: Duration) -> bool {
        self.status == QueryStatus::Success
            && !self.stale
            && self.data.is_some()
            && self
                .fetched_at
                .is_some_and(|(at, _)| at.elapsed() < stale_time)
    }

    fn is_idle(&self) -> bool {
        self.subscribers == 0 && self.in_flight.is_none()
    }

    fn issue(&mut self, fetcher: &ErasedFetcher) -> (u64, InFlight) {
        self.generation += 1;
        let generation = self.generation;
        let request = fetcher().shared();
        self.in_flight = Some((generation, request.clone()));
        self.status = QueryStatus::Loading;
        self.notify();
        (generation, request)
    }

    /// Decide how a read of this entry is served.
    fn plan(&mut self, fetcher: &ErasedFetcher, stale_time: Duration) -> Plan {
        if let Some((_, request)) = &self.in_flight {
            counter!("rentbook_query_dedup_total").increment(1);
            return Plan::Join(request.clone());
        }
        if self.is_fresh(stale_time)
            && let Some(data) = &self.data
        {
            counter!("rentbook_query_hit_total").increment(1);
            return Plan::Fresh(data.clone());
        }
        counter!("rentbook_query_miss_total").increment(1);
        let (generation, request) = self.issue(fetcher);
        Plan::Issued(generation, request)
    }
}

enum Plan {
    Fresh(Erased),
    Join(InFlight),
    Issued(u64, InFlight),
}

/// Point-in-time copy of an entry, still type-erased.
pub(crate) struct Snapshot {
    pub status: QueryStatus,
    pub data: Option<Erased>,
    pub error: Option<ApiError>,
    pub fetched_at: Option<OffsetDateTime>,
    pub stale: bool,
}

impl Snapshot {
    pub(crate) fn into_state<T: Send + Sync + 'static>(self, key: &QueryKey) -> QueryState<T> {
        QueryState {
            status: self.status,
            data: self.data.and_then(|data| downcast(data, key)),
            error: self.error,
            last_fetched_at: self.fetched_at,
            is_stale: self.stale,
            is_placeholder: false,
        }
    }
}

pub(crate) fn downcast<T: Send + Sync + 'static>(data: Erased, key: &QueryKey) -> Option<Arc<T>> {
    match data.downcast::<T>() {
        Ok(typed) => Some(typed),
        Err(_) => {
            warn!(
                key = %key,
                expected = std::any::type_name::<T>(),
                "cached value has unexpected type"
            );
            None
        }
    }
}

struct Inner {
    config: CacheConfig,
    entries: Mutex<LruCache<QueryKey, Entry>>,
}

/// Shared handle to the query cache. Clones refer to the same entries.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("config", &self.inner.config)
            .field("entries", &self.len())
            .finish()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                entries: Mutex::new(LruCache::unbounded()),
            }),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    pub fn len(&self) -> usize {
        lock(&self.inner.entries, Site::new(SOURCE, "len")).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to a query. Enabled specs start fetching immediately
    /// unless fresh data is cached or a request is already in flight.
    pub fn subscribe<T: Send + Sync + 'static>(&self, spec: QuerySpec<T>) -> Subscription<T> {
        Subscription::new(self.clone(), spec)
    }

    pub fn subscribe_with<T: Send + Sync + 'static>(
        &self,
        spec: QuerySpec<T>,
        options: QueryOptions,
    ) -> Subscription<T> {
        Subscription::new(self.clone(), spec).with_options(options)
    }

    /// Resolve a query once without subscribing to it.
    ///
    /// A disabled spec fails with a precondition error and issues nothing.
    pub async fn fetch<T: Send + Sync + 'static>(
        &self,
        spec: &QuerySpec<T>,
    ) -> Result<Arc<T>, ApiError> {
        if !spec.is_enabled() {
            return Err(ApiError::precondition(format!(
                "query {} is not enabled",
                spec.key()
            )));
        }
        let key = spec.key().clone();
        let plan = {
            let mut entries = lock(&self.inner.entries, Site::new(SOURCE, "fetch"));
            let entry = entries.get_or_insert_mut(key.clone(), Entry::new);
            entry.fetcher = Some(spec.fetcher().clone());
            let plan = entry.plan(spec.fetcher(), self.inner.config.stale_time);
            record_len(&entries);
            plan
        };
        let data = match plan {
            Plan::Fresh(data) => data,
            Plan::Join(request) => request.await?,
            Plan::Issued(generation, request) => {
                self.drive(key.clone(), generation, request.clone());
                let outcome = request.await;
                self.complete(&key, generation, outcome.clone());
                outcome?
            }
        };
        downcast(data, &key).ok_or_else(|| {
            ApiError::decode(format!("cached value for {key} has an unexpected type"))
        })
    }

    /// Typed read of an entry's state without subscribing.
    pub fn state<T: Send + Sync + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        self.snapshot(key)
            .map_or_else(QueryState::idle, |snapshot| snapshot.into_state(key))
    }

    pub fn get_query_data<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        self.snapshot(key)
            .and_then(|snapshot| snapshot.data)
            .and_then(|data| downcast(data, key))
    }

    /// Write data for a key directly. Counts as the newest write, so any
    /// response still in flight for the key is discarded when it lands.
    pub fn set_query_data<T: Send + Sync + 'static>(&self, key: &QueryKey, data: T) {
        let mut entries = lock(&self.inner.entries, Site::new(SOURCE, "set_query_data"));
        let entry = entries.get_or_insert_mut(key.clone(), Entry::new);
        entry.generation += 1;
        entry.in_flight = None;
        entry.status = QueryStatus::Success;
        entry.data = Some(Arc::new(data));
        entry.error = None;
        entry.stale = false;
        entry.fetched_at = Some((Instant::now(), OffsetDateTime::now_utc()));
        entry.notify();
        self.evict_idle(&mut entries);
    }

    /// Mark every entry under `prefix` stale. Entries that are subscribed
    /// or have a request in flight are refetched once; the new request
    /// supersedes whatever was pending. Returns the number of entries
    /// marked.
    pub fn invalidate(&self, prefix: &KeyPrefix) -> usize {
        self.invalidate_many(std::slice::from_ref(prefix))
    }

    /// Like [`QueryCache::invalidate`] for several prefixes at once. A key
    /// matched by more than one prefix is marked and refetched once.
    pub fn invalidate_many(&self, prefixes: &[KeyPrefix]) -> usize {
        let mut issued = Vec::new();
        let marked = {
            let mut entries = lock(&self.inner.entries, Site::new(SOURCE, "invalidate"));
            let mut marked = 0;
            for (key, entry) in entries.iter_mut() {
                if !prefixes.iter().any(|prefix| key.matches(prefix)) {
                    continue;
                }
                marked += 1;
                entry.stale = true;
                let busy = entry.subscribers > 0 || entry.in_flight.is_some();
                match entry.fetcher.clone() {
                    Some(fetcher) if busy => {
                        let (generation, request) = entry.issue(&fetcher);
                        issued.push((key.clone(), generation, request));
                    }
                    _ => entry.notify(),
                }
            }
            marked
        };
        counter!("rentbook_query_invalidated_total").increment(marked as u64);
        debug!(
            prefixes = prefixes.len(),
            marked,
            refetching = issued.len(),
            "invalidated queries"
        );
        for (key, generation, request) in issued {
            self.drive(key, generation, request);
        }
        marked
    }

    /// Forget every cached result. Unwatched entries are dropped; watched
    /// ones are reset to idle and lose their fetcher, so nothing is
    /// requested again until a subscriber mounts a new spec. Responses
    /// still in flight are discarded. Used when the session ends.
    pub fn clear(&self) {
        let mut entries = lock(&self.inner.entries, Site::new(SOURCE, "clear"));
        let unwatched: Vec<QueryKey> = entries
            .iter()
            .filter(|(_, entry)| entry.subscribers == 0)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &unwatched {
            entries.pop(key);
        }
        for (_, entry) in entries.iter_mut() {
            entry.generation += 1;
            entry.in_flight = None;
            entry.fetcher = None;
            entry.status = QueryStatus::Idle;
            entry.data = None;
            entry.error = None;
            entry.stale = false;
            entry.fetched_at = None;
            entry.notify();
        }
        debug!(dropped = unwatched.len(), reset = entries.len(), "cleared query cache");
        record_len(&entries);
    }

    pub(crate) fn snapshot(&self, key: &QueryKey) -> Option<Snapshot> {
        let entries = lock(&self.inner.entries, Site::new(SOURCE, "snapshot"));
        entries.peek(key).map(|entry| Snapshot {
            status: entry.status,
            data: entry.data.clone(),
            error: entry.error.clone(),
            fetched_at: entry.fetched_at.map(|(_, at)| at),
            stale: entry.stale,
        })
    }

    /// Register a subscriber for `key` and start a fetch if one is due.
    pub(crate) fn mount(&self, key: &QueryKey, fetcher: &ErasedFetcher) -> watch::Receiver<u64> {
        let (receiver, plan) = {
            let mut entries = lock(&self.inner.entries, Site::new(SOURCE, "mount"));
            let entry = entries.get_or_insert_mut(key.clone(), Entry::new);
            entry.subscribers += 1;
            entry.fetcher = Some(fetcher.clone());
            let receiver = entry.version.subscribe();
            let plan = entry.plan(fetcher, self.inner.config.stale_time);
            record_len(&entries);
            (receiver, plan)
        };
        if let Plan::Issued(generation, request) = plan {
            self.drive(key.clone(), generation, request);
        }
        receiver
    }

    /// Replace the fetcher of a mounted key without refetching.
    pub(crate) fn replace_fetcher(&self, key: &QueryKey, fetcher: &ErasedFetcher) {
        let mut entries = lock(&self.inner.entries, Site::new(SOURCE, "replace_fetcher"));
        if let Some(entry) = entries.peek_mut(key) {
            entry.fetcher = Some(fetcher.clone());
        }
    }

    pub(crate) fn unmount(&self, key: &QueryKey) {
        let mut entries = lock(&self.inner.entries, Site::new(SOURCE, "unmount"));
        if let Some(entry) = entries.peek_mut(key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
        }
        self.evict_idle(&mut entries);
    }

    /// Issue a new request for `key` even if one is pending.
    pub(crate) fn refetch(&self, key: &QueryKey) {
        let issued = {
            let mut entries = lock(&self.inner.entries, Site::new(SOURCE, "refetch"));
            entries.get_mut(key).and_then(|entry| {
                let fetcher = entry.fetcher.clone()?;
                Some(entry.issue(&fetcher))
            })
        };
        if let Some((generation, request)) = issued {
            self.drive(key.clone(), generation, request);
        }
    }

    fn drive(&self, key: QueryKey, generation: u64, request: InFlight) {
        let cache = self.clone();
        tokio::spawn(async move {
            let outcome = request.await;
            cache.complete(&key, generation, outcome);
        });
    }

    fn complete(&self, key: &QueryKey, generation: u64, outcome: ErasedResult) {
        let mut entries = lock(&self.inner.entries, Site::new(SOURCE, "complete"));
        let Some(entry) = entries.peek_mut(key) else {
            debug!(key = %key, generation, "response for evicted query dropped");
            return;
        };
        let current = entry.in_flight.as_ref().map(|(current, _)| *current);
        if current.is_none() && entry.generation == generation {
            // Already applied by another awaiter of the same request.
            return;
        }
        if current != Some(generation) {
            counter!("rentbook_query_discard_total").increment(1);
            debug!(
                key = %key,
                generation,
                latest = entry.generation,
                "discarding superseded response"
            );
            return;
        }
        entry.in_flight = None;
        match outcome {
            Ok(data) => {
                entry.status = QueryStatus::Success;
                entry.data = Some(data);
                entry.error = None;
                entry.stale = false;
                entry.fetched_at = Some((Instant::now(), OffsetDateTime::now_utc()));
            }
            Err(error) => {
                warn!(key = %key, error = %error, "query failed");
                entry.status = QueryStatus::Error;
                entry.error = Some(error);
            }
        }
        entry.notify();
        self.evict_idle(&mut entries);
    }

    fn evict_idle(&self, entries: &mut LruCache<QueryKey, Entry>) {
        let capacity = self.inner.config.capacity_non_zero().get();
        while entries.len() > capacity {
            let victim = entries
                .iter()
                .rev()
                .find(|(_, entry)| entry.is_idle())
                .map(|(key, _)| key.clone());
            let Some(victim) = victim else {
                break;
            };
            entries.pop(&victim);
            counter!("rentbook_query_evict_total").increment(1);
            debug!(key = %victim, "evicted idle query entry");
        }
        record_len(entries);
    }
}

#[allow(clippy::cast_precision_loss)]
fn record_len(entries: &LruCache<QueryKey, Entry>) {
    gauge!("rentbook_query_entries").set(entries.len() as f64);
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::oneshot;

    use super::*;
    use crate::cache::keys::ResourceTag;

    /// Fetcher whose responses are released one by one from the test.
    struct Scripted {
        calls: Arc<AtomicUsize>,
        pending: Arc<Mutex<VecDeque<oneshot::Receiver<Result<String, ApiError>>>>>,
    }

    impl Scripted {
        fn new() -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                pending: Arc::new(Mutex::new(VecDeque::new())),
            }
        }

        fn expect(&self) -> oneshot::Sender<Result<String, ApiError>> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().expect("lock").push_back(rx);
            tx
        }

        fn spec(&self, key: QueryKey) -> QuerySpec<String> {
            let calls = self.calls.clone();
            let pending = self.pending.clone();
            QuerySpec::new(key, move || {
                calls.fetch_add(1, Ordering::SeqCst);
                let next = pending.lock().expect("lock").pop_front();
                async move {
                    match next {
                        Some(rx) => rx
                            .await
                            .unwrap_or_else(|_| Err(ApiError::network("dropped"))),
                        None => Err(ApiError::network("unexpected call")),
                    }
                }
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Yield until `n` requests have started.
        async fn started(&self, n: usize) {
            for _ in 0..100 {
                if self.calls() >= n {
                    return;
                }
                tokio::task::yield_now().await;
            }
            panic!("expected {n} requests, saw {}", self.calls());
        }
    }

    fn key(id: &str) -> QueryKey {
        QueryKey::detail(ResourceTag::Houses, id)
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_request() {
        let cache = QueryCache::default();
        let script = Scripted::new();
        let reply = script.expect();
        let spec = script.spec(key("h1"));

        let first = cache.fetch(&spec);
        let second = cache.fetch(&spec);
        let release = async move {
            tokio::task::yield_now().await;
            reply.send(Ok("house".into())).expect("receiver alive");
        };
        let (a, b, ()) = tokio::join!(first, second, release);

        assert_eq!(a.expect("first").as_str(), "house");
        assert_eq!(b.expect("second").as_str(), "house");
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test]
    async fn superseded_response_is_discarded() {
        let cache = QueryCache::default();
        let script = Scripted::new();
        let older = script.expect();
        let newer = script.expect();
        let mut sub = cache.subscribe(script.spec(key("h1")));
        script.started(1).await;

        sub.refetch();
        script.started(2).await;

        newer.send(Ok("newer".into())).expect("receiver alive");
        let state = sub.settled().await;
        assert_eq!(state.data.as_deref().map(String::as_str), Some("newer"));

        older.send(Ok("older".into())).expect("receiver alive");
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        let state = sub.state();
        assert_eq!(state.data.as_deref().map(String::as_str), Some("newer"));
        assert!(state.is_success());
    }

    #[tokio::test]
    async fn fresh_data_is_served_within_stale_time() {
        let cache = QueryCache::new(CacheConfig {
            stale_time: Duration::from_secs(60),
            ..CacheConfig::default()
        });
        let script = Scripted::new();
        script
            .expect()
            .send(Ok("cached".into()))
            .expect("receiver alive");
        let spec = script.spec(key("h1"));

        cache.fetch(&spec).await.expect("first fetch");
        let again = cache.fetch(&spec).await.expect("second fetch");
        assert_eq!(again.as_str(), "cached");
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test]
    async fn invalidation_marks_idle_entries_stale_without_fetching() {
        let cache = QueryCache::default();
        let script = Scripted::new();
        script
            .expect()
            .send(Ok("house".into()))
            .expect("receiver alive");
        cache
            .fetch(&script.spec(key("h1")))
            .await
            .expect("fetch");

        let marked = cache.invalidate(&KeyPrefix::resource(ResourceTag::Houses));
        assert_eq!(marked, 1);
        assert_eq!(script.calls(), 1);
        let state: QueryState<String> = cache.state(&key("h1"));
        assert!(state.is_stale);
        assert!(state.is_success());
    }

    #[tokio::test]
    async fn errors_keep_previous_data() {
        let cache = QueryCache::default();
        let script = Scripted::new();
        script.expect().send(Ok("v1".into())).expect("alive");
        script
            .expect()
            .send(Err(ApiError::from_status(500, br#"{"message":"boom"}"#)))
            .expect("alive");
        let mut sub = cache.subscribe(script.spec(key("h1")));
        sub.settled().await;

        sub.refetch();
        let state = sub.settled().await;
        assert!(state.is_error());
        assert_eq!(state.data.as_deref().map(String::as_str), Some("v1"));
        assert_eq!(
            state.error.as_ref().and_then(ApiError::message),
            Some("boom")
        );
    }

    #[tokio::test]
    async fn set_query_data_overrides_pending_request() {
        let cache = QueryCache::default();
        let script = Scripted::new();
        let pending = script.expect();
        let sub = cache.subscribe(script.spec(key("h1")));

        cache.set_query_data(&key("h1"), String::from("local"));
        pending.send(Ok("remote".into())).expect("alive");
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        let data = cache.get_query_data::<String>(&key("h1"));
        assert_eq!(data.as_deref().map(String::as_str), Some("local"));
        assert!(sub.state().is_success());
    }

    #[tokio::test]
    async fn capacity_evicts_only_idle_entries() {
        let cache = QueryCache::new(CacheConfig {
            capacity: 2,
            ..CacheConfig::default()
        });
        let script = Scripted::new();
        script.expect().send(Ok("one".into())).expect("alive");
        let mut held = cache.subscribe(script.spec(key("h1")));
        held.settled().await;

        cache.set_query_data(&key("h2"), String::from("two"));
        cache.set_query_data(&key("h3"), String::from("three"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get_query_data::<String>(&key("h1")).is_some());
        assert!(cache.get_query_data::<String>(&key("h2")).is_none());
        assert!(cache.get_query_data::<String>(&key("h3")).is_some());

        drop(held);
        cache.set_query_data(&key("h4"), String::from("four"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get_query_data::<String>(&key("h1")).is_none());
        assert!(cache.get_query_data::<String>(&key("h4")).is_some());
    }

    #[tokio::test]
    async fn clear_drops_unwatched_entries() {
        let cache = QueryCache::default();
        cache.set_query_data(&key("h1"), String::from("one"));
        cache.set_query_data(&key("h2"), String::from("two"));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn clear_resets_watched_entries_without_fetching() {
        let cache = QueryCache::default();
        let script = Scripted::new();
        script.expect().send(Ok("one".into())).expect("alive");
        let late = script.expect();
        let mut sub = cache.subscribe(script.spec(key("h1")));
        sub.settled().await;
        sub.refetch();
        script.started(2).await;

        cache.clear();
        late.send(Ok("late".into())).expect("alive");
        cache.invalidate(&KeyPrefix::all());
        sub.refetch();
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        assert_eq!(script.calls(), 2);
        let state = sub.state();
        assert_eq!(state.status, QueryStatus::Idle);
        assert!(state.data.is_none());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn fetcher_may_read_the_cache_when_called() {
        let cache = QueryCache::default();
        cache.set_query_data(&key("parent"), String::from("h0"));
        let reader = cache.clone();
        let spec = QuerySpec::new(key("child"), move || {
            let parent = reader.get_query_data::<String>(&key("parent"));
            async move {
                parent
                    .map(|id| format!("{id}/child"))
                    .ok_or_else(|| ApiError::precondition("parent missing"))
            }
        });

        let value = tokio::time::timeout(Duration::from_secs(2), cache.fetch(&spec))
            .await
            .expect("fetch finished")
            .expect("fetch succeeded");
        assert_eq!(value.as_str(), "h0/child");

        let mut sub = cache.subscribe(spec);
        sub.refetch();
        let state = tokio::time::timeout(Duration::from_secs(2), sub.settled())
            .await
            .expect("refetch finished");
        assert!(state.is_success());
    }

    #[tokio::test]
    async fn overlapping_prefixes_refetch_an_entry_once() {
        let cache = QueryCache::default();
        let script = Scripted::new();
        script.expect().send(Ok("v1".into())).expect("alive");
        script.expect().send(Ok("v2".into())).expect("alive");
        let mut sub = cache.subscribe(script.spec(key("h1")));
        sub.settled().await;

        let marked = cache.invalidate_many(&[
            KeyPrefix::resource(ResourceTag::Houses),
            KeyPrefix::record(ResourceTag::Houses, "h1"),
        ]);
        assert_eq!(marked, 1);
        let state = sub.settled().await;
        assert_eq!(state.data.as_deref().map(String::as_str), Some("v2"));
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert_eq!(script.calls(), 2);
    }

    #[tokio::test]
    async fn disabled_spec_cannot_be_fetched() {
        let cache = QueryCache::default();
        let script = Scripted::new();
        let err = cache
            .fetch(&script.spec(key("h1")).enabled(false))
            .await
            .expect_err("disabled");
        assert_eq!(err.kind(), crate::infra::transport::ErrorKind::Precondition);
        assert_eq!(script.calls(), 0);
    }
}
