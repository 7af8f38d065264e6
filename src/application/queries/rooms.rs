use rentbook_api_types::{Deleted, Paginated, Room, RoomCreate, RoomFilter, RoomPatch, Update};

use crate::application::context::AppContext;
use crate::application::mutation::Mutation;
use crate::cache::{KeyPrefix, QuerySpec, ResourceTag};

use super::{detail_spec, list_spec};

const TAG: ResourceTag = ResourceTag::Rooms;

/// Room writes also change the room counts shown on houses.
fn affected() -> Vec<KeyPrefix> {
    let mut prefixes = KeyPrefix::list_views(TAG).to_vec();
    prefixes.push(KeyPrefix::resource(ResourceTag::Houses));
    prefixes
}

pub fn list(ctx: &AppContext, filter: RoomFilter) -> QuerySpec<Paginated<Room>> {
    let service = ctx.rooms();
    list_spec(ctx, TAG, filter, move |filter| {
        let service = service.clone();
        async move { service.list(&filter).await }
    })
}

pub fn detail(ctx: &AppContext, id: &str) -> QuerySpec<Room> {
    let service = ctx.rooms();
    detail_spec(ctx, TAG, id, move |id| {
        let service = service.clone();
        async move { service.get(&id).await }
    })
}

pub fn create(ctx: &AppContext) -> Mutation<RoomCreate, Room> {
    let service = ctx.rooms();
    Mutation::new(ctx, "rooms.create", move |input: RoomCreate| {
        let service = service.clone();
        async move { service.create(&input).await }
    })
    .invalidates(affected())
    .success_message("rooms", "created")
}

pub fn update(ctx: &AppContext) -> Mutation<Update<RoomPatch>, Room> {
    let service = ctx.rooms();
    Mutation::new(ctx, "rooms.update", move |input: Update<RoomPatch>| {
        let service = service.clone();
        async move { service.update(input).await }
    })
    .invalidates(affected())
    .invalidates_with(|input: &Update<RoomPatch>| vec![KeyPrefix::record(TAG, &input.id)])
    .success_message("rooms", "updated")
}

pub fn delete(ctx: &AppContext) -> Mutation<String, Deleted<Room>> {
    let service = ctx.rooms();
    Mutation::new(ctx, "rooms.delete", move |id: String| {
        let service = service.clone();
        async move { service.delete(&id).await }
    })
    .invalidates(affected())
    .invalidates_with(|id: &String| vec![KeyPrefix::record(TAG, id)])
    .success_message("rooms", "deleted")
}
