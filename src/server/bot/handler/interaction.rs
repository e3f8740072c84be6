use serenity::all::{Context, Interaction};

use crate::server::{bot::command, state::AppState};

/// Routes slash commands to the command dispatcher. Other interaction kinds are ignored.
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    tracing::debug!(
        "/{} invoked by {} ({})",
        command.data.name,
        command.user.name,
        command.user.id
    );

    if let Err(e) = command::dispatch(state, &ctx, &command).await {
        tracing::error!("Failed to reply to /{}: {}", command.data.name, e);
    }
}
