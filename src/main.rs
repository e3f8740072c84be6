mod server;

use std::{net::SocketAddr, sync::Arc};

use serenity::{
    all::{ChannelId, GuildId, RoleId},
    http::Http,
};
use tracing_subscriber::EnvFilter;

use crate::server::{
    bot, config::Config, error::AppError, model::config::BotConfig, router::router,
    scheduler::cleanup, service::verification::VerificationRoles, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let bot_config = BotConfig::load(&config.bot_config_path)?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let discord_oauth = startup::setup_discord_oauth(&config)?;
    let roblox_oauth = startup::setup_roblox_oauth(&config)?;

    let state = AppState {
        db: db.clone(),
        http_client,
        discord_oauth,
        roblox_oauth,
        bot_config: Arc::new(bot_config),
        discord_http: Arc::new(Http::new(&config.discord_bot_token)),
        guild_id: GuildId::new(config.discord_guild_id),
        verification_roles: VerificationRoles {
            verified: config.verified_role_id.map(RoleId::new),
            unverified: config.unverified_role_id.map(RoleId::new),
            unranked: config.unranked_role_id.map(RoleId::new),
        },
        audit_channel_id: config.audit_log_channel_id.map(ChannelId::new),
    };

    tracing::info!("Starting server");

    let bot_client = bot::start::init_bot(&config, state.clone()).await?;
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    tokio::spawn(async move {
        if let Err(e) = cleanup::start_scheduler(db).await {
            tracing::error!("Cleanup scheduler error: {}", e);
        }
    });

    let app = router(state)?;
    let address = SocketAddr::from(([0, 0, 0, 0], config.oauth_server_port));
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("OAuth server listening on {}", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
