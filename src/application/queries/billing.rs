use rentbook_api_types::{Bill, BillCreate, BillFilter, Paginated, Total};

use crate::application::context::AppContext;
use crate::application::mutation::Mutation;
use crate::cache::{KeyPrefix, QuerySpec, ResourceTag};

use super::{list_spec, total_spec};

const TAG: ResourceTag = ResourceTag::Bills;

pub fn list(ctx: &AppContext, filter: BillFilter) -> QuerySpec<Paginated<Bill>> {
    let service = ctx.billing();
    list_spec(ctx, TAG, filter, move |filter| {
        let service = service.clone();
        async move { service.list(&filter).await }
    })
}

pub fn total(ctx: &AppContext, filter: &BillFilter) -> QuerySpec<Total> {
    let service = ctx.billing();
    total_spec(ctx, TAG, filter, move |filter| {
        let service = service.clone();
        async move { service.total(&filter).await }
    })
}

pub fn create(ctx: &AppContext) -> Mutation<BillCreate, Bill> {
    let service = ctx.billing();
    Mutation::new(ctx, "bills.create", move |input: BillCreate| {
        let service = service.clone();
        async move { service.create(&input).await }
    })
    .invalidates(KeyPrefix::list_views(TAG))
    .success_message("bills", "created")
}
