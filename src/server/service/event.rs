//! Event hosting and attendance points.
//!
//! A host starts an event of a configured type, runs it in a voice channel and ends it.
//! Each host runs at most one event at a time and may hand it over to another host.
//! Everyone in the host's voice channel when the event ends is credited, with up to five
//! extra participants toggled in or out by hand. Every participant receives the same
//! award, computed from the event's duration and its type's point rules.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use serenity::all::{RoleId, UserId};

use crate::server::{
    data::{
        event::EventRepository, event_participant::EventParticipantRepository,
        user_profile::UserProfileRepository,
    },
    error::AppError,
    model::{
        config::{BotConfig, EventTypeConfig},
        event::{CreateEventParam, EndEventParam, EndedEvent, Event, Participant},
    },
    service::{
        audit_log::{emit, AuditEntry, AuditLog},
        permission::has_command_permission,
    },
};

/// Points for an event of `duration` under `rules`.
///
/// Whole hours earn `base_per_hour` each and every full 30 minutes of the remaining
/// partial hour earns `bonus_per_30_min`, capped at `max_points`.
pub fn calculate_points(duration: Duration, rules: &EventTypeConfig) -> i32 {
    let minutes = duration.num_minutes().max(0);
    let hours = i32::try_from(minutes / 60).unwrap_or(i32::MAX);
    let half_hours = ((minutes % 60) / 30) as i32;

    hours
        .saturating_mul(rules.base_per_hour)
        .saturating_add(half_hours.saturating_mul(rules.bonus_per_30_min))
        .min(rules.max_points)
}

/// Formats a duration as `"2 hours 30 minutes"`, or `"0 minutes"` when under a minute.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    let hours = minutes / 60;
    let mins = minutes % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours == 1 { "" } else { "s" }));
    }
    if mins > 0 {
        parts.push(format!("{} minute{}", mins, if mins == 1 { "" } else { "s" }));
    }

    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(" ")
    }
}

/// Removes `participant` if already listed, otherwise appends them.
pub fn toggle_participant(participants: &mut Vec<Participant>, participant: Participant) {
    if let Some(index) = participants
        .iter()
        .position(|p| p.user_id == participant.user_id)
    {
        participants.remove(index);
    } else {
        participants.push(participant);
    }
}

/// Applies each extra participant as a toggle over the voice channel attendees.
pub fn apply_extra_participants(
    mut participants: Vec<Participant>,
    extras: Vec<Participant>,
) -> Vec<Participant> {
    for extra in extras {
        toggle_participant(&mut participants, extra);
    }
    participants
}

/// Checks that a member holding `host_roles` may host an event of `event_type`.
///
/// Types reserved for a department need that department's role, whatever the member's
/// rank. Every other type needs a rank whose permission set grants `start-event`.
///
/// # Returns
/// - `Ok(&EventTypeConfig)` - Point rules of the allowed type
/// - `Err(AppError::BadRequest)` - Unknown type or the member may not host it
pub fn authorize_start<'c>(
    config: &'c BotConfig,
    host_roles: &[RoleId],
    event_type: &str,
) -> Result<&'c EventTypeConfig, AppError> {
    let Some(rules) = config.event_type(event_type) else {
        return Err(AppError::BadRequest(format!(
            "Unknown event type: {}",
            event_type
        )));
    };

    let label = if rules.description.is_empty() {
        event_type
    } else {
        rules.description.as_str()
    };

    match rules.department_role_id {
        Some(department) if !host_roles.contains(&department) => Err(AppError::BadRequest(
            format!(
                "{} events can only be started by members of <@&{}>.",
                label, department
            ),
        )),
        Some(_) => Ok(rules),
        None if has_command_permission(config, host_roles, "start-event") => Ok(rules),
        None => Err(AppError::BadRequest(format!(
            "You need to be NCO+ to start {} events.",
            label
        ))),
    }
}

/// Parameters for ending the host's active event.
#[derive(Debug, Clone)]
pub struct EndEventInput {
    pub host_id: u64,
    pub participants: Vec<Participant>,
    pub notes: Option<String>,
    pub image_link: Option<String>,
}

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
    config: &'a BotConfig,
    audit: &'a dyn AuditLog,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a BotConfig, audit: &'a dyn AuditLog) -> Self {
        Self { db, config, audit }
    }

    /// Starts an event hosted by `host_id`.
    ///
    /// # Arguments
    /// - `host_roles` - Current roles of the host, checked by `authorize_start`
    ///
    /// # Returns
    /// - `Ok(Event)` - The new active event
    /// - `Err(AppError::BadRequest)` - Unknown event type, the host may not run this type,
    ///   or the host already runs an active event
    pub async fn start(
        &self,
        name: &str,
        event_type: &str,
        host_id: u64,
        host_roles: &[RoleId],
        start_time: DateTime<Utc>,
    ) -> Result<Event, AppError> {
        authorize_start(self.config, host_roles, event_type)?;

        let repo = EventRepository::new(self.db);
        if let Some(active) = repo.find_active(host_id).await? {
            return Err(AppError::BadRequest(format!(
                "You already have an active event ({} started <t:{}:R>). End it before starting another.",
                active.event_type,
                active.start_time.timestamp()
            )));
        }

        let event = repo
            .create(CreateEventParam {
                name: name.to_string(),
                event_type: event_type.to_string(),
                host_id,
                start_time,
            })
            .await?;

        tracing::info!(
            "{} started {} event '{}' ({})",
            host_id,
            event_type,
            event.name,
            event.id
        );

        Ok(event)
    }

    /// Hands the host's active event to `new_host_id`, who can then end it.
    ///
    /// # Returns
    /// - `Ok(Event)` - The event under its new host
    /// - `Err(AppError::BadRequest)` - Transfer to self, or the new host already runs an event
    /// - `Err(AppError::NotFound)` - The host has no active event
    pub async fn transfer(&self, host_id: u64, new_host_id: u64) -> Result<Event, AppError> {
        if host_id == new_host_id {
            return Err(AppError::BadRequest(
                "You cannot transfer an event to yourself.".to_string(),
            ));
        }

        let repo = EventRepository::new(self.db);
        let Some(event) = repo.find_active(host_id).await? else {
            return Err(AppError::NotFound(
                "You do not have any active events to transfer.".to_string(),
            ));
        };

        if let Some(existing) = repo.find_active(new_host_id).await? {
            return Err(AppError::BadRequest(format!(
                "<@{}> already has an active event ({} started <t:{}:R>). They must end it first.",
                new_host_id,
                existing.event_type,
                existing.start_time.timestamp()
            )));
        }

        let event = repo.transfer(event.id, new_host_id).await?;

        tracing::info!(
            "Event {} transferred from {} to {}",
            event.id,
            host_id,
            new_host_id
        );

        Ok(event)
    }

    /// Ends the host's active event and credits every participant.
    ///
    /// Crediting and closing run in one transaction: if any write fails nobody is
    /// credited and the event stays active, so it can be ended again.
    ///
    /// # Returns
    /// - `Ok(EndedEvent)` - The closed event with the award per participant
    /// - `Err(AppError::BadRequest)` - Event type no longer configured or no participants
    /// - `Err(AppError::NotFound)` - Host has no active event
    /// - `Err(AppError)` - Database error while crediting or closing
    pub async fn end(&self, input: EndEventInput, now: DateTime<Utc>) -> Result<EndedEvent, AppError> {
        let Some(event) = EventRepository::new(self.db)
            .find_active(input.host_id)
            .await?
        else {
            return Err(AppError::NotFound(
                "You do not have an active event.".to_string(),
            ));
        };

        let Some(rules) = self.config.event_type(&event.event_type) else {
            return Err(AppError::BadRequest(format!(
                "Event type {} is no longer configured",
                event.event_type
            )));
        };

        if input.participants.is_empty() {
            return Err(AppError::BadRequest(
                "No participants found. Make sure there are members in the voice channel."
                    .to_string(),
            ));
        }

        let duration = now - event.start_time;
        let points = calculate_points(duration, rules);
        let param = EndEventParam {
            event_id: event.id,
            end_time: now,
            points_awarded: points,
            notes: input.notes.clone(),
            image_link: input.image_link.clone(),
        };

        let txn = self.db.begin().await?;
        let event = match credit_and_close(&txn, &input.participants, points, param).await {
            Ok(event) => event,
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    tracing::error!("Failed to roll back event {}: {}", event.id, rollback);
                }
                return Err(e);
            }
        };
        txn.commit().await?;

        tracing::info!(
            "Ended {} event {} with {} participants at {} points each",
            event.event_type,
            event.id,
            input.participants.len(),
            points
        );

        emit(
            self.audit,
            AuditEntry::Event {
                host_id: UserId::new(event.host_id),
                name: event.name.clone(),
                event_type: event.event_type.clone(),
                duration: format_duration(duration),
                participants: input.participants.len(),
                points_per_participant: points,
                notes: input.notes,
                image_link: input.image_link,
                timestamp: now,
            },
        )
        .await;

        Ok(EndedEvent {
            event,
            participants: input.participants,
            points_per_participant: points,
            duration,
        })
    }
}

async fn credit_and_close(
    txn: &DatabaseTransaction,
    participants: &[Participant],
    points: i32,
    param: EndEventParam,
) -> Result<Event, AppError> {
    let profile_repo = UserProfileRepository::new(txn);
    let participant_repo = EventParticipantRepository::new(txn);

    for participant in participants {
        profile_repo
            .adjust_points(participant.user_id, &participant.username, points)
            .await?;
        participant_repo
            .upsert(param.event_id, participant.user_id, points)
            .await?;
    }

    EventRepository::new(txn).end(param).await
}
