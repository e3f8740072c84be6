use oauth2::{basic::BasicClient, AuthType, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::verification::{
        DISCORD_AUTHORIZE_URL, DISCORD_TOKEN_URL, ROBLOX_AUTHORIZE_URL, ROBLOX_TOKEN_URL,
    },
    state::OAuth2Client,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the schema is up to date
/// before the bot or HTTP server touch it.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for OAuth token exchange and provider user lookups.
///
/// Redirects are disabled so a token endpoint can never bounce the exchange to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// OAuth client for the Discord leg of verification.
pub fn setup_discord_oauth(config: &Config) -> Result<OAuth2Client, AppError> {
    build_oauth_client(
        &config.discord_client_id,
        &config.discord_client_secret,
        DISCORD_AUTHORIZE_URL,
        DISCORD_TOKEN_URL,
        config.discord_redirect_url(),
    )
}

/// OAuth client for the Roblox leg of verification.
pub fn setup_roblox_oauth(config: &Config) -> Result<OAuth2Client, AppError> {
    build_oauth_client(
        &config.roblox_client_id,
        &config.roblox_client_secret,
        ROBLOX_AUTHORIZE_URL,
        ROBLOX_TOKEN_URL,
        config.roblox_redirect_url(),
    )
}

/// Both providers expect the client credentials in the token request body.
fn build_oauth_client(
    client_id: &str,
    client_secret: &str,
    auth_url: &str,
    token_url: &str,
    redirect_url: String,
) -> Result<OAuth2Client, AppError> {
    let invalid = |name: &str, value: &str| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
    };

    let auth_url =
        AuthUrl::new(auth_url.to_string()).map_err(|_| invalid("auth_url", auth_url))?;
    let token_url =
        TokenUrl::new(token_url.to_string()).map_err(|_| invalid("token_url", token_url))?;
    let redirect = RedirectUrl::new(redirect_url.clone())
        .map_err(|_| invalid("OAUTH_BASE_URL", &redirect_url))?;

    Ok(BasicClient::new(ClientId::new(client_id.to_string()))
        .set_client_secret(ClientSecret::new(client_secret.to_string()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect)
        .set_auth_type(AuthType::RequestBody))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oauth2::CsrfToken;
    use std::collections::HashMap;

    #[test]
    fn oauth_clients_redirect_to_their_callbacks() {
        let vars = HashMap::from([
            ("DATABASE_URL", "sqlite::memory:"),
            ("DISCORD_BOT_TOKEN", "token"),
            ("DISCORD_GUILD_ID", "1"),
            ("DISCORD_CLIENT_ID", "discord-client"),
            ("DISCORD_CLIENT_SECRET", "discord-secret"),
            ("ROBLOX_CLIENT_ID", "roblox-client"),
            ("ROBLOX_CLIENT_SECRET", "roblox-secret"),
            ("OAUTH_BASE_URL", "https://casf.example.com"),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();

        let discord = setup_discord_oauth(&config).unwrap();
        let roblox = setup_roblox_oauth(&config).unwrap();

        let (discord_url, _) = discord
            .authorize_url(|| CsrfToken::new("s".to_string()))
            .url();
        let (roblox_url, _) = roblox
            .authorize_url(|| CsrfToken::new("s".to_string()))
            .url();

        assert!(discord_url.as_str().starts_with(DISCORD_AUTHORIZE_URL));
        assert!(discord_url
            .query_pairs()
            .any(|(k, v)| k == "redirect_uri" && v == "https://casf.example.com/oauth/discord/callback"));
        assert!(roblox_url.as_str().starts_with(ROBLOX_AUTHORIZE_URL));
        assert!(roblox_url
            .query_pairs()
            .any(|(k, v)| k == "redirect_uri" && v == "https://casf.example.com/oauth/callback"));
    }

    #[test]
    fn rejects_malformed_base_url() {
        let result = build_oauth_client(
            "id",
            "secret",
            DISCORD_AUTHORIZE_URL,
            DISCORD_TOKEN_URL,
            "not a url/oauth/callback".to_string(),
        );

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }
}
