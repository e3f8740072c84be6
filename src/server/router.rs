use axum::{routing::get, Router};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::trace::TraceLayer;

use crate::server::{
    controller::{
        health::health,
        verification::{discord_callback, roblox_callback},
    },
    error::AppError,
    state::AppState,
};

/// Seconds for one request slot to replenish per client IP.
const OAUTH_REPLENISH_SECONDS: u64 = 6;
/// Requests a client IP may burst before being throttled.
const OAUTH_BURST_SIZE: u32 = 10;

/// Builds the HTTP router.
///
/// OAuth callbacks are rate limited per peer IP, so the server must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn router(state: AppState) -> Result<Router, AppError> {
    let governor = GovernorConfigBuilder::default()
        .per_second(OAUTH_REPLENISH_SECONDS)
        .burst_size(OAUTH_BURST_SIZE)
        .finish()
        .ok_or_else(|| AppError::InternalError("Invalid OAuth rate limit settings".to_string()))?;

    let oauth = Router::new()
        .route("/oauth/discord/callback", get(discord_callback))
        .route("/oauth/callback", get(roblox_callback))
        .layer(GovernorLayer::new(Arc::new(governor)));

    Ok(Router::new()
        .merge(oauth)
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
