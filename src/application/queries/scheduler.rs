use rentbook_api_types::{
    Bill, Deleted, Paginated, Scheduler, SchedulerBillFilter, SchedulerCreate, SchedulerFilter,
    SchedulerPatch, Total, Update,
};

use crate::application::context::AppContext;
use crate::application::mutation::Mutation;
use crate::cache::{KeyPrefix, QuerySpec, ResourceTag};

use super::{detail_spec, list_spec, total_spec};

const TAG: ResourceTag = ResourceTag::Schedulers;

pub fn list(ctx: &AppContext, filter: SchedulerFilter) -> QuerySpec<Paginated<Scheduler>> {
    let service = ctx.schedulers();
    list_spec(ctx, TAG, filter, move |filter| {
        let service = service.clone();
        async move { service.list(&filter).await }
    })
}

pub fn total(ctx: &AppContext, filter: &SchedulerFilter) -> QuerySpec<Total> {
    let service = ctx.schedulers();
    total_spec(ctx, TAG, filter, move |filter| {
        let service = service.clone();
        async move { service.total(&filter).await }
    })
}

/// Bills generated by one scheduler; disabled until the filter names it.
pub fn bills(ctx: &AppContext, filter: SchedulerBillFilter) -> QuerySpec<Paginated<Bill>> {
    let service = ctx.schedulers();
    list_spec(ctx, ResourceTag::SchedulerBills, filter, move |filter| {
        let service = service.clone();
        async move { service.bills(&filter).await }
    })
}

pub fn detail(ctx: &AppContext, id: &str) -> QuerySpec<Scheduler> {
    let service = ctx.schedulers();
    detail_spec(ctx, TAG, id, move |id| {
        let service = service.clone();
        async move { service.get(&id).await }
    })
}

pub fn create(ctx: &AppContext) -> Mutation<SchedulerCreate, Scheduler> {
    let service = ctx.schedulers();
    Mutation::new(ctx, "schedulers.create", move |input: SchedulerCreate| {
        let service = service.clone();
        async move { service.create(&input).await }
    })
    .invalidates(KeyPrefix::list_views(TAG))
    .success_message("schedulers", "created")
}

pub fn update(ctx: &AppContext) -> Mutation<Update<SchedulerPatch>, Scheduler> {
    let service = ctx.schedulers();
    Mutation::new(ctx, "schedulers.update", move |input: Update<SchedulerPatch>| {
        let service = service.clone();
        async move { service.update(input).await }
    })
    .invalidates(KeyPrefix::list_views(TAG))
    .invalidates_with(|input: &Update<SchedulerPatch>| vec![KeyPrefix::record(TAG, &input.id)])
    .success_message("schedulers", "updated")
}

pub fn delete(ctx: &AppContext) -> Mutation<String, Deleted<Scheduler>> {
    let service = ctx.schedulers();
    Mutation::new(ctx, "schedulers.delete", move |id: String| {
        let service = service.clone();
        async move { service.delete(&id).await }
    })
    .invalidates(KeyPrefix::list_views(TAG))
    .invalidates([KeyPrefix::resource(ResourceTag::SchedulerBills)])
    .invalidates_with(|id: &String| vec![KeyPrefix::record(TAG, id)])
    .success_message("schedulers", "deleted")
}
