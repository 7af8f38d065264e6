#![deny(clippy::all, clippy::pedantic)]

use rentbook::AppContext;
use rentbook::application::queries::houses;
use rentbook_api_types::{HouseCreate, HouseFilter, HousePatch, Update};

use crate::args::HousesCmd;
use crate::client::CliError;
use crate::io::read_json;

use super::{run, show};

pub async fn handle(ctx: &AppContext, cmd: HousesCmd) -> Result<(), CliError> {
    match cmd {
        HousesCmd::List { search, paging } => {
            let filter = HouseFilter {
                search,
                page: paging.page,
                page_size: paging.page_size,
            };
            show(ctx, houses::list(ctx, filter)).await
        }
        HousesCmd::Get { id } => show(ctx, houses::detail(ctx, &id)).await,
        HousesCmd::Create { payload } => {
            let input: HouseCreate = read_json(payload)?;
            run(ctx, houses::create(ctx), input).await
        }
        HousesCmd::Update { id, payload } => {
            let patch: HousePatch = read_json(payload)?;
            run(ctx, houses::update(ctx), Update::new(id, patch)).await
        }
        HousesCmd::Delete { id } => run(ctx, houses::delete(ctx), id).await,
    }
}
