use rentbook_api_types::{Deleted, House, HouseCreate, HouseFilter, HousePatch, Paginated, Update};

use crate::application::context::AppContext;
use crate::application::mutation::Mutation;
use crate::cache::{KeyPrefix, QuerySpec, ResourceTag};

use super::{detail_spec, list_spec};

const TAG: ResourceTag = ResourceTag::Houses;

pub fn list(ctx: &AppContext, filter: HouseFilter) -> QuerySpec<Paginated<House>> {
    let service = ctx.houses();
    list_spec(ctx, TAG, filter, move |filter| {
        let service = service.clone();
        async move { service.list(&filter).await }
    })
}

pub fn detail(ctx: &AppContext, id: &str) -> QuerySpec<House> {
    let service = ctx.houses();
    detail_spec(ctx, TAG, id, move |id| {
        let service = service.clone();
        async move { service.get(&id).await }
    })
}

pub fn create(ctx: &AppContext) -> Mutation<HouseCreate, House> {
    let service = ctx.houses();
    Mutation::new(ctx, "houses.create", move |input: HouseCreate| {
        let service = service.clone();
        async move { service.create(&input).await }
    })
    .invalidates(KeyPrefix::list_views(TAG))
    .success_message("houses", "created")
}

pub fn update(ctx: &AppContext) -> Mutation<Update<HousePatch>, House> {
    let service = ctx.houses();
    Mutation::new(ctx, "houses.update", move |input: Update<HousePatch>| {
        let service = service.clone();
        async move { service.update(input).await }
    })
    .invalidates(KeyPrefix::list_views(TAG))
    .invalidates_with(|input: &Update<HousePatch>| vec![KeyPrefix::record(TAG, &input.id)])
    .success_message("houses", "updated")
}

/// Deleting a house takes its rooms with it.
pub fn delete(ctx: &AppContext) -> Mutation<String, Deleted<House>> {
    let service = ctx.houses();
    Mutation::new(ctx, "houses.delete", move |id: String| {
        let service = service.clone();
        async move { service.delete(&id).await }
    })
    .invalidates([
        KeyPrefix::resource(TAG),
        KeyPrefix::resource(ResourceTag::Rooms),
    ])
    .success_message("houses", "deleted")
}
