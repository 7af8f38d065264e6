#![deny(clippy::all, clippy::pedantic)]

pub mod bills;
pub mod contracts;
pub mod houses;
pub mod rooms;
pub mod schedulers;
pub mod session;
pub mod tenants;

use rentbook::AppContext;
use rentbook::application::Mutation;
use rentbook::cache::QuerySpec;
use serde::Serialize;

use crate::client::{CliError, require_profile};
use crate::print::print_json;

/// Read through the query cache and print the result.
pub(crate) async fn show<T>(ctx: &AppContext, spec: QuerySpec<T>) -> Result<(), CliError>
where
    T: Serialize + Send + Sync + 'static,
{
    require_profile(ctx)?;
    let data = ctx.cache().fetch(&spec).await?;
    print_json(data.as_ref())
}

/// Run a mutation and print what the server returned.
pub(crate) async fn run<I, O>(
    ctx: &AppContext,
    mutation: Mutation<I, O>,
    input: I,
) -> Result<(), CliError>
where
    I: Send + 'static,
    O: Serialize + Send + 'static,
{
    require_profile(ctx)?;
    let out = mutation.mutate(input).await?;
    print_json(&out)
}
