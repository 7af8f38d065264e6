#![deny(clippy::all, clippy::pedantic)]

use rentbook::AppContext;
use rentbook::application::queries::rooms;
use rentbook_api_types::{RoomCreate, RoomFilter, RoomPatch, Update};

use crate::args::RoomsCmd;
use crate::client::CliError;
use crate::io::read_json;

use super::{run, show};

pub async fn handle(ctx: &AppContext, cmd: RoomsCmd) -> Result<(), CliError> {
    match cmd {
        RoomsCmd::List {
            house,
            status,
            search,
            paging,
        } => {
            let filter = RoomFilter {
                house,
                status: status.map(Into::into),
                search,
                page: paging.page,
                page_size: paging.page_size,
            };
            show(ctx, rooms::list(ctx, filter)).await
        }
        RoomsCmd::Get { id } => show(ctx, rooms::detail(ctx, &id)).await,
        RoomsCmd::Create { payload } => {
            let input: RoomCreate = read_json(payload)?;
            run(ctx, rooms::create(ctx), input).await
        }
        RoomsCmd::Update { id, payload } => {
            let patch: RoomPatch = read_json(payload)?;
            run(ctx, rooms::update(ctx), Update::new(id, patch)).await
        }
        RoomsCmd::Delete { id } => run(ctx, rooms::delete(ctx), id).await,
    }
}
