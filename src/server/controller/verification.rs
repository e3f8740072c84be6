use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::server::{
    error::{auth::AuthError, AppError},
    service::verification::{apply_member_roles, VerificationService},
    state::AppState,
    util::page::render_page,
};

/// Query parameters sent back by either OAuth provider.
///
/// Providers send `code` and `state` on success, or `error` and optionally
/// `error_description` when the user denies access.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Splits the parameters into the code and state of a successful redirect.
    fn into_code_and_state(self) -> Result<(String, String), AuthError> {
        if let Some(error) = self.error {
            let detail = match self.error_description {
                Some(description) => format!("{}: {}", error, description),
                None => error,
            };
            return Err(AuthError::ProviderError(detail));
        }

        match (self.code, self.state) {
            (Some(code), Some(state)) if !code.is_empty() && !state.is_empty() => {
                Ok((code, state))
            }
            _ => Err(AuthError::MissingCallbackParams),
        }
    }
}

/// GET /oauth/discord/callback - Discord leg of verification
///
/// Confirms the Discord account that authorised is the one that ran `/verify`, then
/// sends the browser on to Roblox with a fresh state token.
///
/// # Returns
/// - `303 See Other`: Redirect to the Roblox authorise page
/// - `400 Bad Request`: Provider error, missing parameters or invalid state
/// - `403 Forbidden`: A different Discord account authorised
/// - `502 Bad Gateway`: Discord rejected the code exchange
/// - `500 Internal Server Error`: Database or network failure
pub async fn discord_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let result: Result<_, AppError> = async {
        let (code, state_token) = params.into_code_and_state()?;

        let service = VerificationService::new(
            &state.db,
            &state.http_client,
            &state.discord_oauth,
            &state.roblox_oauth,
        );

        service
            .discord_callback(code, &state_token, Utc::now())
            .await
    }
    .await;

    match result {
        Ok(url) => Redirect::to(url.as_str()).into_response(),
        Err(err) => failure_page(err),
    }
}

/// GET /oauth/callback - Roblox leg of verification
///
/// Links the Roblox account, then applies the member's nickname and verification roles.
/// Discord failures while applying roles are logged only; the link is kept.
///
/// # Returns
/// - `200 OK`: Success page naming the linked Roblox account
/// - `400 Bad Request`: Provider error, missing parameters, invalid state or Roblox id
/// - `409 Conflict`: The Roblox account is linked to another member
/// - `502 Bad Gateway`: Roblox rejected the code exchange
/// - `500 Internal Server Error`: Database or network failure
pub async fn roblox_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let result: Result<_, AppError> = async {
        let (code, state_token) = params.into_code_and_state()?;

        let service = VerificationService::new(
            &state.db,
            &state.http_client,
            &state.discord_oauth,
            &state.roblox_oauth,
        );

        service
            .roblox_callback(code, &state_token, Utc::now())
            .await
    }
    .await;

    let verified = match result {
        Ok(verified) => verified,
        Err(err) => return failure_page(err),
    };

    apply_member_roles(
        &state.role_provider(),
        &state.bot_config.ranks,
        state.verification_roles,
        &verified,
    )
    .await;

    let message = format!(
        "You are now verified as {} (@{}). You can close this page and return to Discord.",
        verified.roblox_display_name, verified.roblox_username
    );

    (
        StatusCode::OK,
        Html(render_page("Verification Complete", &message)),
    )
        .into_response()
}

/// Renders any verification failure as an HTML page.
///
/// Auth errors carry their own status and wording; everything else is logged and shown
/// as a generic 500 page.
fn failure_page(err: AppError) -> Response {
    match err {
        AppError::AuthErr(auth) => auth.into_response(),
        err => {
            tracing::error!("Verification callback failed: {}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_page(
                    "Verification Failed",
                    "Something went wrong on our side. Please run /verify again later.",
                )),
            )
                .into_response()
        }
    }
}
