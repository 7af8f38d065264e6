use rentbook_api_types::{
    Deleted, Paginated, Tenant, TenantCreate, TenantFilter, TenantPatch, Total, Update,
};

use crate::application::context::AppContext;
use crate::application::mutation::Mutation;
use crate::cache::{KeyPrefix, QuerySpec, ResourceTag};

use super::{detail_spec, list_spec, total_spec};

const TAG: ResourceTag = ResourceTag::Tenants;

/// Tenant writes change room occupancy too.
fn affected() -> Vec<KeyPrefix> {
    let mut prefixes = KeyPrefix::list_views(TAG).to_vec();
    prefixes.extend(KeyPrefix::list_views(ResourceTag::Rooms));
    prefixes
}

/// Disabled until the filter names a room.
pub fn list(ctx: &AppContext, filter: TenantFilter) -> QuerySpec<Paginated<Tenant>> {
    let service = ctx.tenants();
    list_spec(ctx, TAG, filter, move |filter| {
        let service = service.clone();
        async move { service.list(&filter).await }
    })
}

pub fn total(ctx: &AppContext, filter: &TenantFilter) -> QuerySpec<Total> {
    let service = ctx.tenants();
    total_spec(ctx, TAG, filter, move |filter| {
        let service = service.clone();
        async move { service.total(&filter).await }
    })
}

pub fn detail(ctx: &AppContext, id: &str) -> QuerySpec<Tenant> {
    let service = ctx.tenants();
    detail_spec(ctx, TAG, id, move |id| {
        let service = service.clone();
        async move { service.get(&id).await }
    })
}

pub fn create(ctx: &AppContext) -> Mutation<TenantCreate, Tenant> {
    let service = ctx.tenants();
    Mutation::new(ctx, "tenants.create", move |input: TenantCreate| {
        let service = service.clone();
        async move { service.create(&input).await }
    })
    .invalidates(affected())
    .success_message("tenants", "created")
}

pub fn update(ctx: &AppContext) -> Mutation<Update<TenantPatch>, Tenant> {
    let service = ctx.tenants();
    Mutation::new(ctx, "tenants.update", move |input: Update<TenantPatch>| {
        let service = service.clone();
        async move { service.update(input).await }
    })
    .invalidates(KeyPrefix::list_views(TAG))
    .invalidates_with(|input: &Update<TenantPatch>| vec![KeyPrefix::record(TAG, &input.id)])
    .success_message("tenants", "updated")
}

pub fn toggle_status(ctx: &AppContext) -> Mutation<String, Tenant> {
    let service = ctx.tenants();
    Mutation::new(ctx, "tenants.toggle_status", move |id: String| {
        let service = service.clone();
        async move { service.toggle_status(&id).await }
    })
    .invalidates(affected())
    .invalidates_with(|id: &String| vec![KeyPrefix::record(TAG, id)])
    .success_message("tenants", "status_toggled")
}

pub fn delete(ctx: &AppContext) -> Mutation<String, Deleted<Tenant>> {
    let service = ctx.tenants();
    Mutation::new(ctx, "tenants.delete", move |id: String| {
        let service = service.clone();
        async move { service.delete(&id).await }
    })
    .invalidates(affected())
    .invalidates_with(|id: &String| vec![KeyPrefix::record(TAG, id)])
    .success_message("tenants", "deleted")
}
