//! Query specs and mutations, one module per resource.
//!
//! Every query is gated on a signed-in profile and on its filter's own
//! precondition, so nothing fires before the inputs exist.

pub mod billing;
pub mod contracts;
pub mod houses;
pub mod rooms;
pub mod scheduler;
pub mod tenants;

use std::future::Future;

use rentbook_api_types::{Paginated, Total};

use crate::application::context::AppContext;
use crate::application::filter::Filter;
use crate::cache::{QueryKey, QuerySpec, ResourceTag};
use crate::infra::transport::ApiError;

fn list_spec<T, F, S, Fut>(
    ctx: &AppContext,
    tag: ResourceTag,
    filter: F,
    fetch: S,
) -> QuerySpec<Paginated<T>>
where
    T: Send + Sync + 'static,
    F: Filter,
    S: Fn(F) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Paginated<T>, ApiError>> + Send + 'static,
{
    let enabled = ctx.profile().is_authenticated() && filter.can_fetch();
    let key = QueryKey::list(tag, &filter);
    QuerySpec::new(key, move || fetch(filter.clone())).enabled(enabled)
}

/// Counts are keyed and fetched without pagination, so paging through a
/// list never refetches its total.
fn total_spec<F, S, Fut>(ctx: &AppContext, tag: ResourceTag, filter: &F, fetch: S) -> QuerySpec<Total>
where
    F: Filter,
    S: Fn(F) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Total, ApiError>> + Send + 'static,
{
    let filter = filter.without_pagination();
    let enabled = ctx.profile().is_authenticated() && filter.can_fetch();
    let key = QueryKey::total(tag, &filter);
    QuerySpec::new(key, move || fetch(filter.clone())).enabled(enabled)
}

fn detail_spec<T, S, Fut>(ctx: &AppContext, tag: ResourceTag, id: &str, fetch: S) -> QuerySpec<T>
where
    T: Send + Sync + 'static,
    S: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let id = id.trim().to_string();
    let enabled = ctx.profile().is_authenticated() && !id.is_empty();
    let key = QueryKey::detail(tag, &id);
    QuerySpec::new(key, move || fetch(id.clone())).enabled(enabled)
}
