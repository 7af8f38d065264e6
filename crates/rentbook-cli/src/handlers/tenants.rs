#![deny(clippy::all, clippy::pedantic)]

use rentbook::AppContext;
use rentbook::application::queries::tenants;
use rentbook_api_types::{TenantCreate, TenantFilter, TenantPatch, Update};

use crate::args::TenantsCmd;
use crate::client::CliError;
use crate::io::read_json;

use super::{run, show};

pub async fn handle(ctx: &AppContext, cmd: TenantsCmd) -> Result<(), CliError> {
    match cmd {
        TenantsCmd::List {
            room,
            active,
            search,
            paging,
        } => {
            let filter = TenantFilter {
                room: Some(room),
                is_active: active,
                search,
                page: paging.page,
                page_size: paging.page_size,
            };
            show(ctx, tenants::list(ctx, filter)).await
        }
        TenantsCmd::Total { room, active } => {
            let filter = TenantFilter {
                room: Some(room),
                is_active: active,
                ..TenantFilter::default()
            };
            show(ctx, tenants::total(ctx, &filter)).await
        }
        TenantsCmd::Get { id } => show(ctx, tenants::detail(ctx, &id)).await,
        TenantsCmd::Create { payload } => {
            let input: TenantCreate = read_json(payload)?;
            run(ctx, tenants::create(ctx), input).await
        }
        TenantsCmd::Update { id, payload } => {
            let patch: TenantPatch = read_json(payload)?;
            run(ctx, tenants::update(ctx), Update::new(id, patch)).await
        }
        TenantsCmd::ToggleStatus { id } => run(ctx, tenants::toggle_status(ctx), id).await,
        TenantsCmd::Delete { id } => run(ctx, tenants::delete(ctx), id).await,
    }
}
