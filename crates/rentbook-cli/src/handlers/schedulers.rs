#![deny(clippy::all, clippy::pedantic)]

use rentbook::AppContext;
use rentbook::application::queries::scheduler;
use rentbook_api_types::{
    SchedulerBillFilter, SchedulerCreate, SchedulerFilter, SchedulerPatch, Update,
};

use crate::args::SchedulersCmd;
use crate::client::CliError;
use crate::io::read_json;

use super::{run, show};

pub async fn handle(ctx: &AppContext, cmd: SchedulersCmd) -> Result<(), CliError> {
    match cmd {
        SchedulersCmd::List {
            room,
            active,
            paging,
        } => {
            let filter = SchedulerFilter {
                room,
                is_active: active,
                page: paging.page,
                page_size: paging.page_size,
            };
            show(ctx, scheduler::list(ctx, filter)).await
        }
        SchedulersCmd::Total { room, active } => {
            let filter = SchedulerFilter {
                room,
                is_active: active,
                ..SchedulerFilter::default()
            };
            show(ctx, scheduler::total(ctx, &filter)).await
        }
        SchedulersCmd::Bills { scheduler: id, paging } => {
            let filter = SchedulerBillFilter {
                scheduler: Some(id),
                page: paging.page,
                page_size: paging.page_size,
            };
            show(ctx, scheduler::bills(ctx, filter)).await
        }
        SchedulersCmd::Get { id } => show(ctx, scheduler::detail(ctx, &id)).await,
        SchedulersCmd::Create { payload } => {
            let input: SchedulerCreate = read_json(payload)?;
            run(ctx, scheduler::create(ctx), input).await
        }
        SchedulersCmd::Update { id, payload } => {
            let patch: SchedulerPatch = read_json(payload)?;
            run(ctx, scheduler::update(ctx), Update::new(id, patch)).await
        }
        SchedulersCmd::Delete { id } => run(ctx, scheduler::delete(ctx), id).await,
    }
}
