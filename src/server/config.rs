use std::{path::PathBuf, str::FromStr};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_BOT_CONFIG_PATH: &str = "config/casf.json";

/// Process configuration read from the environment.
///
/// Rank tables and other guild rules live in the JSON bot config at `bot_config_path`;
/// only secrets, IDs and addresses come from here.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    pub discord_guild_id: u64,
    pub discord_client_id: String,
    pub discord_client_secret: String,

    pub roblox_client_id: String,
    pub roblox_client_secret: String,

    /// Public base URL the OAuth callbacks are reachable at, without trailing slash.
    pub oauth_base_url: String,
    pub oauth_server_port: u16,

    pub bot_config_path: PathBuf,

    pub audit_log_channel_id: Option<u64>,
    pub verified_role_id: Option<u64>,
    pub unverified_role_id: Option<u64>,
    pub unranked_role_id: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required variable present and parseable
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset or empty
    /// - `Err(ConfigError::InvalidEnvVar)` - A numeric variable failed to parse
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let vars = Vars { lookup };

        Ok(Self {
            database_url: vars.required("DATABASE_URL")?,
            discord_bot_token: vars.required("DISCORD_BOT_TOKEN")?,
            discord_guild_id: vars.required_id("DISCORD_GUILD_ID")?,
            discord_client_id: vars.required("DISCORD_CLIENT_ID")?,
            discord_client_secret: vars.required("DISCORD_CLIENT_SECRET")?,
            roblox_client_id: vars.required("ROBLOX_CLIENT_ID")?,
            roblox_client_secret: vars.required("ROBLOX_CLIENT_SECRET")?,
            oauth_base_url: vars
                .required("OAUTH_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            oauth_server_port: vars
                .optional_parsed("OAUTH_SERVER_PORT")?
                .unwrap_or(DEFAULT_SERVER_PORT),
            bot_config_path: vars
                .optional("BOT_CONFIG_PATH")
                .unwrap_or_else(|| DEFAULT_BOT_CONFIG_PATH.to_string())
                .into(),
            audit_log_channel_id: vars.optional_id("AUDIT_LOG_CHANNEL_ID")?,
            verified_role_id: vars.optional_id("VERIFIED_ROLE_ID")?,
            unverified_role_id: vars.optional_id("UNVERIFIED_ROLE_ID")?,
            unranked_role_id: vars.optional_id("UNRANKED_ROLE_ID")?,
        })
    }

    pub fn discord_redirect_url(&self) -> String {
        format!("{}/oauth/discord/callback", self.oauth_base_url)
    }

    pub fn roblox_redirect_url(&self) -> String {
        format!("{}/oauth/callback", self.oauth_base_url)
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn optional_parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>, ConfigError> {
        self.optional(name)
            .map(|value| {
                value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
                    name: name.to_string(),
                    value,
                })
            })
            .transpose()
    }

    /// Discord snowflake; zero is never a valid ID.
    fn optional_id(&self, name: &str) -> Result<Option<u64>, ConfigError> {
        match self.optional_parsed::<u64>(name)? {
            Some(0) => Err(ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: "0".to_string(),
            }),
            id => Ok(id),
        }
    }

    fn required_id(&self, name: &str) -> Result<u64, ConfigError> {
        self.optional_id(name)?
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }
}
