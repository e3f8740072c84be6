use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Check the `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but could not be parsed.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// Raw value that failed to parse
        value: String,
    },

    /// Bot configuration file failed validation.
    ///
    /// Raised at startup when rank, requirement, permission set or linked role tables
    /// reference each other inconsistently.
    #[error("Invalid bot configuration: {0}")]
    InvalidBotConfig(String),
}
