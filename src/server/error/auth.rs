use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::server::util::page::render_page;

/// Errors raised by the dual OAuth verification flow.
///
/// These are surfaced to a browser, so they render as small HTML pages rather than
/// JSON bodies.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The state token is unknown, already used or expired.
    #[error("OAuth state token is invalid or expired")]
    InvalidState,

    /// The Discord account that authorised differs from the one that ran `/verify`.
    #[error("Discord account {actual} does not match verification request for {expected}")]
    AccountMismatch {
        /// Discord ID stored with the state token
        expected: u64,
        /// Discord ID returned by the token exchange
        actual: u64,
    },

    /// The provider rejected the authorization code.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),

    /// The provider redirected back with an `error` query parameter.
    #[error("OAuth provider returned an error: {0}")]
    ProviderError(String),

    /// The callback arrived without an authorization code or state.
    #[error("OAuth callback is missing the authorization code or state")]
    MissingCallbackParams,

    /// The Roblox account is already linked to a different Discord user.
    #[error("Roblox account {roblox_id} is already linked to another Discord account")]
    RobloxAlreadyLinked {
        /// Roblox user ID from the userinfo endpoint
        roblox_id: i64,
    },

    /// Roblox returned a `sub` claim that is not a numeric user ID.
    #[error("Roblox returned an invalid user id: {0}")]
    InvalidRobloxId(String),
}

/// Converts verification errors into HTML error pages.
///
/// # Returns
/// - 400 Bad Request - Invalid state, provider error, missing params, bad Roblox id
/// - 403 Forbidden - Account mismatch
/// - 409 Conflict - Roblox account already linked elsewhere
/// - 502 Bad Gateway - Token exchange failure
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Verification failed: {}", self);

        let (status, message) = match &self {
            Self::InvalidState => (
                StatusCode::BAD_REQUEST,
                "This verification link is invalid or has expired. Run /verify again in Discord.",
            ),
            Self::AccountMismatch { .. } => (
                StatusCode::FORBIDDEN,
                "You authorised a different Discord account than the one that requested verification.",
            ),
            Self::ProviderError(_) | Self::MissingCallbackParams => (
                StatusCode::BAD_REQUEST,
                "Authorisation was cancelled or failed. Run /verify again in Discord.",
            ),
            Self::RobloxAlreadyLinked { .. } => (
                StatusCode::CONFLICT,
                "This Roblox account is already linked to another Discord account.",
            ),
            Self::InvalidRobloxId(_) => (
                StatusCode::BAD_REQUEST,
                "Roblox returned an unexpected account id.",
            ),
            Self::TokenExchange(_) => (
                StatusCode::BAD_GATEWAY,
                "Could not complete authorisation with the provider, please try again.",
            ),
        };

        (status, Html(render_page("Verification Failed", message))).into_response()
    }
}
