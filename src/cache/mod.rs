//! Rentbook query cache.
//!
//! Server data is cached per [`QueryKey`]. A key is built from a resource
//! tag, a query kind and either a record id or the scalar fields of a typed
//! filter, so two filters with the same field values share one entry.
//!
//! - Concurrent reads of one key share a single request.
//! - Responses from superseded requests are discarded.
//! - [`QueryCache::invalidate`] marks a family of keys stale and refetches
//!   the ones currently subscribed.
//! - [`QueryCache::clear`] forgets every result without refetching.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! capacity = 256
//! stale_time_ms = 0
//! keep_previous_data = true
//! ```

mod config;
mod keys;
pub(crate) mod lock;
mod state;
mod store;
mod subscription;

pub use config::CacheConfig;
pub use keys::{KeyPrefix, KeySegment, KeyValue, QueryKey, QueryKind, ResourceTag};
pub use state::{QueryState, QueryStatus};
pub use store::QueryCache;
pub use subscription::{QueryOptions, QuerySpec, Subscription};
