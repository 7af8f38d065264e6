#![deny(clippy::all, clippy::pedantic)]

use rentbook::AppContext;
use rentbook::application::queries::contracts;
use rentbook_api_types::{ContractCreate, ContractFilter, ContractPatch, Update};

use crate::args::ContractsCmd;
use crate::client::CliError;
use crate::io::read_json;

use super::{run, show};

pub async fn handle(ctx: &AppContext, cmd: ContractsCmd) -> Result<(), CliError> {
    match cmd {
        ContractsCmd::List {
            room,
            tenant,
            status,
            paging,
        } => {
            let filter = ContractFilter {
                room,
                tenant,
                status: status.map(Into::into),
                page: paging.page,
                page_size: paging.page_size,
            };
            show(ctx, contracts::list(ctx, filter)).await
        }
        ContractsCmd::Get { id } => show(ctx, contracts::detail(ctx, &id)).await,
        ContractsCmd::Create { payload } => {
            let input: ContractCreate = read_json(payload)?;
            run(ctx, contracts::create(ctx), input).await
        }
        ContractsCmd::Update { id, payload } => {
            let patch: ContractPatch = read_json(payload)?;
            run(ctx, contracts::update(ctx), Update::new(id, patch)).await
        }
        ContractsCmd::Delete { id } => run(ctx, contracts::delete(ctx), id).await,
    }
}
