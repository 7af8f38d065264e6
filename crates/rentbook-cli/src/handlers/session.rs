#![deny(clippy::all, clippy::pedantic)]

use rentbook::AppContext;
use rentbook::application::auth;

use crate::args::LoginCmd;
use crate::client::{CliError, require_profile};
use crate::print::print_json;

pub async fn login(ctx: &AppContext, cmd: LoginCmd) -> Result<(), CliError> {
    match cmd {
        LoginCmd::Code => {
            let code = auth::generate(ctx).await?;
            print_json(&code)
        }
        LoginCmd::Confirm { code } => {
            let profile = auth::authenticate(ctx, &code).await?;
            print_json(&profile)
        }
    }
}

pub async fn logout(ctx: &AppContext) -> Result<(), CliError> {
    auth::logout(ctx).await?;
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<(), CliError> {
    let profile = require_profile(ctx)?;
    print_json(&profile)
}
