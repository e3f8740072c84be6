//! Typed access to resolved slash command options.

use serenity::all::{ResolvedOption, ResolvedValue, User};

use crate::server::error::AppError;

fn find<'a, 'b>(options: &'b [ResolvedOption<'a>], name: &str) -> Option<&'b ResolvedValue<'a>> {
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub fn user<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a User> {
    match find(options, name) {
        Some(ResolvedValue::User(user, _)) => Some(*user),
        _ => None,
    }
}

/// String option value, with blank input treated as absent.
pub fn string<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    match find(options, name) {
        Some(ResolvedValue::String(value)) => {
            let value: &'a str = *value;
            Some(value.trim()).filter(|v| !v.is_empty())
        }
        _ => None,
    }
}

pub fn integer(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    match find(options, name) {
        Some(ResolvedValue::Integer(value)) => Some(*value),
        _ => None,
    }
}

fn missing(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing required option: {}", name))
}

pub fn required_user<'a>(options: &[ResolvedOption<'a>], name: &str) -> Result<&'a User, AppError> {
    user(options, name).ok_or_else(|| missing(name))
}

pub fn required_string<'a>(options: &[ResolvedOption<'a>], name: &str) -> Result<&'a str, AppError> {
    string(options, name).ok_or_else(|| missing(name))
}

pub fn required_integer(options: &[ResolvedOption<'_>], name: &str) -> Result<i64, AppError> {
    integer(options, name).ok_or_else(|| missing(name))
}
