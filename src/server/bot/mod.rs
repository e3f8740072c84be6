//! Discord bot integration: slash commands and guild member events.
//!
//! The bot manages a single guild. Slash commands are registered in that guild on
//! every `ready` event and dispatched through `command::dispatch`; member events keep
//! linked roles, rank nicknames and stored member data in sync.
//!
//! The bot runs in its own tokio task next to the HTTP server. It shares the
//! `AppState` with the OAuth controllers, including the Discord HTTP client used for
//! role and nickname changes.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild availability and the guild cache
//! - `GUILD_MEMBERS` - Member join, leave and update events (privileged intent)
//! - `GUILD_VOICE_STATES` - Voice channel occupancy used when ending an event
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
