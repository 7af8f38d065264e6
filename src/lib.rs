//! Client data layer for the rentbook rental-property API.
//!
//! - [`infra::transport`]: the REST transport and its normalized [`ApiError`].
//! - [`application::services`]: one typed service per resource.
//! - [`cache`]: the keyed query cache with deduplication and invalidation.
//! - [`application::mutation`]: writes that invalidate what they touch.
//! - [`application::context`]: the [`AppContext`] every call goes through.

pub mod application;
pub mod cache;
pub mod config;
pub mod infra;

pub use application::AppContext;
pub use infra::transport::ApiError;
