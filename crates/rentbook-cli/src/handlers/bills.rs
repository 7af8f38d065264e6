#![deny(clippy::all, clippy::pedantic)]

use rentbook::AppContext;
use rentbook::application::queries::billing;
use rentbook_api_types::{BillCreate, BillFilter};

use crate::args::{BillFilterArgs, BillsCmd, Paging};
use crate::client::CliError;
use crate::io::read_json;

use super::{run, show};

pub async fn handle(ctx: &AppContext, cmd: BillsCmd) -> Result<(), CliError> {
    match cmd {
        BillsCmd::List { filter, paging } => {
            show(ctx, billing::list(ctx, bill_filter(filter, paging))).await
        }
        BillsCmd::Total { filter } => {
            let filter = bill_filter(filter, Paging::default());
            show(ctx, billing::total(ctx, &filter)).await
        }
        BillsCmd::Create { payload } => {
            let input: BillCreate = read_json(payload)?;
            run(ctx, billing::create(ctx), input).await
        }
    }
}

fn bill_filter(args: BillFilterArgs, paging: Paging) -> BillFilter {
    BillFilter {
        room: args.room,
        tenant: args.tenant,
        status: args.status.map(Into::into),
        period: args.period,
        page: paging.page,
        page_size: paging.page_size,
    }
}
