use chrono::Utc;
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, Guild, UserId};

use crate::server::{
    bot::command::{options, Invocation},
    error::AppError,
    model::{
        config::BotConfig,
        event::{EndedEvent, Participant},
    },
    service::event::{apply_extra_participants, format_duration, EndEventInput, EventService},
};

/// Discord caps a string option at this many choices.
const MAX_CHOICES: usize = 25;

const EXTRA_PARTICIPANT_OPTIONS: [&str; 5] = [
    "extraparticipant1",
    "extraparticipant2",
    "extraparticipant3",
    "extraparticipant4",
    "extraparticipant5",
];

fn event_type_option(config: &BotConfig) -> CreateCommandOption {
    config.event_types.iter().take(MAX_CHOICES).fold(
        CreateCommandOption::new(CommandOptionType::String, "eventtype", "Type of event")
            .required(true),
        |option, (name, rules)| {
            let label = if rules.description.is_empty() {
                name.clone()
            } else {
                rules.description.clone()
            };
            option.add_string_choice(label, name.clone())
        },
    )
}

pub fn register_start(config: &BotConfig) -> CreateCommand {
    CreateCommand::new("start-event")
        .description("Start hosting an event")
        .add_option(event_type_option(config))
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "name",
            "Name of the event",
        ))
}

pub fn register_end() -> CreateCommand {
    let command = CreateCommand::new("end-event")
        .description("End your event and award points to everyone in your voice channel")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "notes",
            "Notes for the event log",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "image",
            "Link to a screenshot of the event",
        ));

    EXTRA_PARTICIPANT_OPTIONS.iter().fold(command, |command, name| {
        command.add_option(CreateCommandOption::new(
            CommandOptionType::User,
            *name,
            "Add a member not in voice, or remove one who is",
        ))
    })
}

pub fn register_transfer() -> CreateCommand {
    CreateCommand::new("transfer-event")
        .description("Hand your active event over to another host")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::User,
                "newhost",
                "Member who takes over the event",
            )
            .required(true),
        )
}

pub async fn start_event(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let event_type = options::required_string(&invocation.options, "eventtype")?;
    let state = invocation.state;

    let name = match options::string(&invocation.options, "name") {
        Some(name) => name.to_string(),
        None => default_event_name(&state.bot_config, event_type),
    };

    let audit = state.audit_log();
    let event = EventService::new(&state.db, &state.bot_config, &audit)
        .start(
            &name,
            event_type,
            invocation.caller_id().get(),
            &invocation.caller.roles,
            Utc::now(),
        )
        .await?;

    Ok(format!(
        "Started {} event '{}' (ID {}). Run /end-event when it is over.",
        event.event_type, event.name, event.id
    ))
}

pub async fn transfer_event(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let new_host = options::required_user(&invocation.options, "newhost")?;
    if new_host.bot {
        return Err(AppError::BadRequest(
            "Events cannot be transferred to a bot.".to_string(),
        ));
    }
    // Confirms the new host is in the guild.
    invocation.member(new_host.id).await?;

    let state = invocation.state;
    let audit = state.audit_log();
    let event = EventService::new(&state.db, &state.bot_config, &audit)
        .transfer(invocation.caller_id().get(), new_host.id.get())
        .await?;

    Ok(format!(
        "**Event transferred**\nEvent: {} ({})\nFrom: <@{}>\nTo: <@{}>\n\n<@{}> can now end this event and award points.",
        event.name,
        event.event_type,
        invocation.caller_id(),
        new_host.id,
        new_host.id
    ))
}

pub async fn end_event(invocation: &Invocation<'_>) -> Result<String, AppError> {
    let state = invocation.state;

    let attendees = {
        let Some(guild) = invocation.ctx.cache.guild(state.guild_id) else {
            return Err(AppError::InternalError(format!(
                "Guild {} is not cached",
                state.guild_id
            )));
        };
        voice_participants(&guild, invocation.caller_id())?
    };

    let extras = EXTRA_PARTICIPANT_OPTIONS
        .iter()
        .filter_map(|name| options::user(&invocation.options, name))
        .map(|user| Participant {
            user_id: user.id.get(),
            username: user.name.clone(),
        })
        .collect();

    let input = EndEventInput {
        host_id: invocation.caller_id().get(),
        participants: apply_extra_participants(attendees, extras),
        notes: options::string(&invocation.options, "notes").map(str::to_string),
        image_link: options::string(&invocation.options, "image").map(str::to_string),
    };

    let audit = state.audit_log();
    let ended = EventService::new(&state.db, &state.bot_config, &audit)
        .end(input, Utc::now())
        .await?;

    Ok(event_summary(&ended))
}

/// Non-bot members sharing the host's voice channel, host included.
///
/// # Returns
/// - `Ok(Vec<Participant>)` - Everyone in the host's channel
/// - `Err(AppError::BadRequest)` - The host is not in a voice channel
pub fn voice_participants(guild: &Guild, host_id: UserId) -> Result<Vec<Participant>, AppError> {
    let Some(channel_id) = guild
        .voice_states
        .get(&host_id)
        .and_then(|state| state.channel_id)
    else {
        return Err(AppError::BadRequest(
            "You must be in a voice channel to end an event.".to_string(),
        ));
    };

    let participants = guild
        .voice_states
        .values()
        .filter(|state| state.channel_id == Some(channel_id))
        .filter_map(|state| {
            let member = state
                .member
                .as_ref()
                .or_else(|| guild.members.get(&state.user_id))?;
            (!member.user.bot).then(|| Participant {
                user_id: state.user_id.get(),
                username: member.user.name.clone(),
            })
        })
        .collect();

    Ok(participants)
}

fn default_event_name(config: &BotConfig, event_type: &str) -> String {
    config
        .event_type(event_type)
        .map(|rules| rules.description.clone())
        .filter(|description| !description.is_empty())
        .unwrap_or_else(|| event_type.to_string())
}

pub fn event_summary(ended: &EndedEvent) -> String {
    format!(
        "**Event ended: {}** ({})\nDuration: {}\nParticipants: {}\nPoints awarded: {} each",
        ended.event.name,
        ended.event.event_type,
        format_duration(ended.duration),
        ended.participants.len(),
        ended.points_per_participant
    )
}
