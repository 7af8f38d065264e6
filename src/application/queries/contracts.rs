use rentbook_api_types::{
    Contract, ContractCreate, ContractFilter, ContractPatch, Deleted, Paginated, Update,
};

use crate::application::context::AppContext;
use crate::application::mutation::Mutation;
use crate::cache::{KeyPrefix, QuerySpec, ResourceTag};

use super::{detail_spec, list_spec};

const TAG: ResourceTag = ResourceTag::Contracts;

/// A contract decides whether its room is occupied.
fn affected() -> Vec<KeyPrefix> {
    let mut prefixes = KeyPrefix::list_views(TAG).to_vec();
    prefixes.push(KeyPrefix::resource(ResourceTag::Rooms));
    prefixes
}

pub fn list(ctx: &AppContext, filter: ContractFilter) -> QuerySpec<Paginated<Contract>> {
    let service = ctx.contracts();
    list_spec(ctx, TAG, filter, move |filter| {
        let service = service.clone();
        async move { service.list(&filter).await }
    })
}

pub fn detail(ctx: &AppContext, id: &str) -> QuerySpec<Contract> {
    let service = ctx.contracts();
    detail_spec(ctx, TAG, id, move |id| {
        let service = service.clone();
        async move { service.get(&id).await }
    })
}

pub fn create(ctx: &AppContext) -> Mutation<ContractCreate, Contract> {
    let service = ctx.contracts();
    Mutation::new(ctx, "contracts.create", move |input: ContractCreate| {
        let service = service.clone();
        async move { service.create(&input).await }
    })
    .invalidates(affected())
    .success_message("contracts", "created")
}

pub fn update(ctx: &AppContext) -> Mutation<Update<ContractPatch>, Contract> {
    let service = ctx.contracts();
    Mutation::new(ctx, "contracts.update", move |input: Update<ContractPatch>| {
        let service = service.clone();
        async move { service.update(input).await }
    })
    .invalidates(affected())
    .invalidates_with(|input: &Update<ContractPatch>| vec![KeyPrefix::record(TAG, &input.id)])
    .success_message("contracts", "updated")
}

pub fn delete(ctx: &AppContext) -> Mutation<String, Deleted<Contract>> {
    let service = ctx.contracts();
    Mutation::new(ctx, "contracts.delete", move |id: String| {
        let service = service.clone();
        async move { service.delete(&id).await }
    })
    .invalidates(affected())
    .invalidates_with(|id: &String| vec![KeyPrefix::record(TAG, id)])
    .success_message("contracts", "deleted")
}
