//! rentbook-cli: command-line client for the rentbook API.
//! Every command goes through the library's context, so reads share the
//! query cache and writes run as cache-invalidating mutations.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;


use clap::Parser;
use rentbook::{config, infra::telemetry};

use args::{Cli, Commands};
use client::{CliError, build_ctx};
use handlers::{bills, contracts, houses, rooms, schedulers, session, tenants};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = config::load(&cli.config)?;
    telemetry::init(&settings.logging)?;
    let ctx = build_ctx(&settings).await?;

    match cli.command {
        Commands::Login(cmd) => session::login(&ctx, cmd.action).await?,
        Commands::Logout => session::logout(&ctx).await?,
        Commands::Whoami => session::whoami(&ctx)?,
        Commands::Houses(cmd) => houses::handle(&ctx, cmd.action).await?,
        Commands::Rooms(cmd) => rooms::handle(&ctx, cmd.action).await?,
        Commands::Tenants(cmd) => tenants::handle(&ctx, cmd.action).await?,
        Commands::Schedulers(cmd) => schedulers::handle(&ctx, cmd.action).await?,
        Commands::Bills(cmd) => bills::handle(&ctx, cmd.action).await?,
        Commands::Contracts(cmd) => contracts::handle(&ctx, cmd.action).await?,
    }

    Ok(())
}
