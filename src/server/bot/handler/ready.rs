//! Ready event handler.
//!
//! Fired once the bot completes the gateway handshake, and again after every full
//! reconnect. The guild's slash command list is overwritten here so the registered
//! commands always match the running build and the event types in the bot config.

use serenity::all::{Context, Ready};

use crate::server::{bot::command, state::AppState};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared state holding the managed guild and bot config
/// - `ctx` - Discord context used to register the guild commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let definitions = command::definitions(&state.bot_config);
    match state.guild_id.set_commands(&ctx.http, definitions).await {
        Ok(commands) => tracing::info!(
            "Registered {} slash commands in guild {}",
            commands.len(),
            state.guild_id
        ),
        Err(e) => tracing::error!(
            "Failed to register slash commands in guild {}: {}",
            state.guild_id,
            e
        ),
    }
}
