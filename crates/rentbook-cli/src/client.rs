#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use rentbook::application::auth::{self, AuthError};
use rentbook::application::{AppContext, ContextError};
use rentbook::config::{LoadError, Settings};
use rentbook::infra::error::InfraError;
use rentbook::ApiError;
use rentbook_api_types::Profile;
use thiserror::Error;

use crate::print::TerminalNotifier;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] LoadError),
    #[error("failed to set up: {0}")]
    Context(#[from] ContextError),
    #[error("failed to set up logging: {0}")]
    Telemetry(#[from] InfraError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("not signed in (run `rentbook-cli login code` first)")]
    NotSignedIn,
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to render output: {0}")]
    Output(String),
}

/// Wire the application context and pick up any stored session.
pub async fn build_ctx(settings: &Settings) -> Result<AppContext, CliError> {
    let ctx = AppContext::from_settings(settings, Arc::new(TerminalNotifier)).await?;
    auth::restore(&ctx).await?;
    Ok(ctx)
}

pub fn require_profile(ctx: &AppContext) -> Result<Profile, CliError> {
    ctx.profile().get().ok_or(CliError::NotSignedIn)
}
