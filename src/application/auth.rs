//! Sign-in, session restore and sign-out.

use rentbook_api_types::{Profile, TelegramLoginCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::context::AppContext;
use crate::infra::error::InfraError;
use crate::infra::transport::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] InfraError),
}

/// Ask the server for a one-time login code and the bot link to confirm it.
pub async fn generate(ctx: &AppContext) -> Result<TelegramLoginCode, ApiError> {
    ctx.telegram().generate().await
}

/// Trade a confirmed login code for a session.
///
/// The token is stored in the session cookie and attached to the transport,
/// and the profile is latched.
pub async fn authenticate(ctx: &AppContext, code: &str) -> Result<Profile, AuthError> {
    let response = match ctx.telegram().authenticate(code).await {
        Ok(response) => response,
        Err(error) => {
            let message = error.message().map_or_else(
                || ctx.localizer().translate("common", "error_generic"),
                str::to_string,
            );
            ctx.notifier().error(&message);
            return Err(error.into());
        }
    };

    let cookie = ctx.cookie();
    ctx.session()
        .set(&cookie.name, &response.access_token, cookie.max_age_seconds)
        .await?;
    let profile_json = serde_json::to_string(&response.profile)
        .map_err(|err| InfraError::session(format!("failed to encode profile: {err}")))?;
    ctx.session()
        .set(&cookie.profile_name(), &profile_json, cookie.max_age_seconds)
        .await?;

    ctx.transport().set_token(Some(response.access_token));
    ctx.profile().set(Some(response.profile.clone()));
    info!(profile = %response.profile.id, "signed in");
    ctx.notifier()
        .success(&ctx.localizer().translate("auth", "logged_in"));
    Ok(response.profile)
}

/// Pick up a session stored by an earlier run. Returns the restored
/// profile, or `None` when there is no live session.
pub async fn restore(ctx: &AppContext) -> Result<Option<Profile>, AuthError> {
    let cookie = ctx.cookie();
    let Some(token) = ctx.session().get(&cookie.name).await? else {
        debug!(cookie = %cookie.name, "no stored session");
        return Ok(None);
    };
    ctx.transport().set_token(Some(token));

    let profile = match ctx.session().get(&cookie.profile_name()).await? {
        Some(raw) => match serde_json::from_str::<Profile>(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(error = %err, "stored profile is unreadable; continuing without it");
                None
            }
        },
        None => None,
    };
    ctx.profile().set(profile.clone());
    debug!(has_profile = profile.is_some(), "session restored");
    Ok(profile)
}

/// End the session: forget the cookies, the token, the profile and every
/// cached query.
pub async fn logout(ctx: &AppContext) -> Result<(), AuthError> {
    let cookie = ctx.cookie();
    ctx.session().remove(&cookie.name).await?;
    ctx.session().remove(&cookie.profile_name()).await?;
    ctx.transport().set_token(None);
    ctx.profile().clear();
    ctx.cache().clear();
    info!("signed out");
    ctx.notifier()
        .success(&ctx.localizer().translate("auth", "logged_out"));
    Ok(())
}
