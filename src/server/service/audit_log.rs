//! Audit trail for rank changes and events.
//!
//! Audit entries are fire-and-forget: a failure to record one is logged locally and
//! never fails the operation that produced it.

use chrono::{DateTime, Utc};
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp, UserId},
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::server::error::{internal::InternalError, AppError};

const PROMOTION_COLOR: u32 = 0x2ecc71;
const DEMOTION_COLOR: u32 = 0xe74c3c;
const EVENT_COLOR: u32 = 0x3498db;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankChangeKind {
    Promotion,
    Demotion,
}

/// A record sent to the audit log.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditEntry {
    RankChange {
        kind: RankChangeKind,
        actor_id: UserId,
        actor_name: String,
        subject_id: UserId,
        subject_name: String,
        from_rank: Option<String>,
        to_rank: String,
        reason: Option<String>,
        timestamp: DateTime<Utc>,
    },
    Event {
        host_id: UserId,
        name: String,
        event_type: String,
        duration: String,
        participants: usize,
        points_per_participant: i32,
        notes: Option<String>,
        image_link: Option<String>,
        timestamp: DateTime<Utc>,
    },
}

impl AuditEntry {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::RankChange { timestamp, .. } | Self::Event { timestamp, .. } => *timestamp,
        }
    }

    /// One line summary used for the local log.
    pub fn summary(&self) -> String {
        match self {
            Self::RankChange {
                kind,
                actor_name,
                subject_name,
                from_rank,
                to_rank,
                ..
            } => {
                let verb = match kind {
                    RankChangeKind::Promotion => "promoted",
                    RankChangeKind::Demotion => "demoted",
                };
                format!(
                    "{} {} {} from {} to {}",
                    actor_name,
                    verb,
                    subject_name,
                    from_rank.as_deref().unwrap_or("N/A"),
                    to_rank
                )
            }
            Self::Event {
                name,
                event_type,
                participants,
                points_per_participant,
                ..
            } => format!(
                "Event '{}' ({}) ended with {} participants earning {} points",
                name, event_type, participants, points_per_participant
            ),
        }
    }
}

/// Sink for audit entries.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AppError>;
}

/// Records `entry`, logging instead of propagating any failure.
pub async fn emit(log: &dyn AuditLog, entry: AuditEntry) {
    if let Err(e) = log.record(&entry).await {
        tracing::error!("Failed to record audit entry '{}': {}", entry.summary(), e);
    }
}

/// Audit log that writes every entry to the tracing log and, when a channel is
/// configured, posts it as an embed.
pub struct DiscordAuditLog {
    http: Arc<Http>,
    channel_id: Option<ChannelId>,
}

impl DiscordAuditLog {
    pub fn new(http: Arc<Http>, channel_id: Option<ChannelId>) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl AuditLog for DiscordAuditLog {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AppError> {
        tracing::info!("Audit: {}", entry.summary());

        let Some(channel_id) = self.channel_id else {
            return Ok(());
        };

        let embed = build_audit_embed(entry)?;
        channel_id
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(())
    }
}

/// Builds the embed posted to the audit channel.
///
/// # Returns
/// - `Ok(CreateEmbed)` - Embed ready for posting
/// - `Err(AppError::InternalErr(InvalidDiscordTimestamp))` - Entry timestamp out of range
pub fn build_audit_embed(entry: &AuditEntry) -> Result<CreateEmbed, AppError> {
    let unix = entry.timestamp().timestamp();
    let timestamp = Timestamp::from_unix_timestamp(unix).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp: unix,
            reason: e.to_string(),
        }
    })?;

    let embed = match entry {
        AuditEntry::RankChange {
            kind,
            actor_id,
            subject_id,
            from_rank,
            to_rank,
            reason,
            ..
        } => {
            let (title, color) = match kind {
                RankChangeKind::Promotion => ("Promotion", PROMOTION_COLOR),
                RankChangeKind::Demotion => ("Demotion", DEMOTION_COLOR),
            };
            CreateEmbed::new()
                .title(title)
                .color(color)
                .field("Member", format!("<@{}>", subject_id), true)
                .field("By", format!("<@{}>", actor_id), true)
                .field(
                    "Rank",
                    format!("{} → {}", from_rank.as_deref().unwrap_or("N/A"), to_rank),
                    false,
                )
                .field(
                    "Reason",
                    reason.as_deref().unwrap_or("No reason provided."),
                    false,
                )
        }
        AuditEntry::Event {
            host_id,
            name,
            event_type,
            duration,
            participants,
            points_per_participant,
            notes,
            image_link,
            ..
        } => {
            let mut embed = CreateEmbed::new()
                .title(format!("Event ended: {}", name))
                .color(EVENT_COLOR)
                .field("Host", format!("<@{}>", host_id), true)
                .field("Type", event_type, true)
                .field("Duration", duration, true)
                .field("Participants", participants.to_string(), true)
                .field("Points each", points_per_participant.to_string(), true);
            if let Some(notes) = notes {
                embed = embed.field("Notes", notes, false);
            }
            if let Some(image_link) = image_link {
                embed = embed.image(image_link);
            }
            embed
        }
    };

    Ok(embed.timestamp(timestamp))
}
