use serenity::all::RoleId;
use serenity::http::HttpError;
use thiserror::Error;

/// Discord error code returned when the bot lacks permission for an action.
pub const MISSING_PERMISSIONS_CODE: isize = 50013;

/// Discord error code returned when a user is not a member of the guild.
pub const UNKNOWN_MEMBER_CODE: isize = 10007;

/// Errors raised while mutating a member's roles or nickname.
#[derive(Error, Debug)]
pub enum RoleError {
    /// Discord rejected the change with error code 50013.
    ///
    /// Usually the bot's highest role sits below the role being assigned, or the
    /// target member outranks the bot.
    #[error("Missing permissions to modify role {0}")]
    PermissionDenied(RoleId),

    /// Discord rejected the nickname change with error code 50013.
    #[error("Missing permissions to change nickname")]
    NicknamePermissionDenied,

    /// Any other Discord failure.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),
}

impl RoleError {
    /// Classifies a serenity error raised while changing `role_id`.
    ///
    /// # Arguments
    /// - `err` - Error returned by the Discord HTTP client
    /// - `role_id` - Role the failed request targeted
    ///
    /// # Returns
    /// - `RoleError::PermissionDenied` - Discord returned code 50013
    /// - `RoleError::Discord` - Any other failure
    pub fn from_serenity(err: serenity::Error, role_id: RoleId) -> Self {
        if is_missing_permissions(&err) {
            Self::PermissionDenied(role_id)
        } else {
            Self::Discord(Box::new(err))
        }
    }

    /// Whether this error is Discord's missing permissions response.
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_) | Self::NicknamePermissionDenied
        )
    }
}

/// JSON error code of a failed Discord API request, if the error is one.
pub fn discord_error_code(err: &serenity::Error) -> Option<isize> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.error.code)
        }
        _ => None,
    }
}

/// Checks whether a serenity error carries Discord's 50013 error code.
pub fn is_missing_permissions(err: &serenity::Error) -> bool {
    discord_error_code(err) == Some(MISSING_PERMISSIONS_CODE)
}

pub fn is_unknown_member(err: &serenity::Error) -> bool {
    discord_error_code(err) == Some(UNKNOWN_MEMBER_CODE)
}
