//! Extraction of user IDs from free-text command input.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of users a single mass promotion may target.
pub const MAX_MASS_TARGETS: usize = 50;

static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<@!?(\d+)>").unwrap());
static RAW_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{17,19}").unwrap());

/// Parses user mentions and raw Discord IDs out of `input`.
///
/// Mentions (`<@id>` and `<@!id>`) are collected first, then raw 17 to 19 digit IDs
/// found in the text left over once mentions are stripped. Duplicates are dropped
/// keeping the first occurrence, so the output order follows the input.
///
/// # Arguments
/// - `input` - Free text as typed into the command option
///
/// # Returns
/// - `Vec<u64>` - Unique user IDs in order of first appearance
pub fn parse_user_ids(input: &str) -> Vec<u64> {
    let mut ids: Vec<u64> = Vec::new();

    for capture in MENTION_RE.captures_iter(input) {
        if let Some(id) = capture.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) {
            if id != 0 && !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    let remainder = MENTION_RE.replace_all(input, " ");
    for found in RAW_ID_RE.find_iter(&remainder) {
        if let Ok(id) = found.as_str().parse::<u64>() {
            if id != 0 && !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_mention_forms() {
        let ids = parse_user_ids("<@123456789012345678> <@!223456789012345678>");

        assert_eq!(ids, vec![123456789012345678, 223456789012345678]);
    }

    #[test]
    fn parses_raw_ids_and_skips_short_numbers() {
        let ids = parse_user_ids("123456789012345678, 42 and 1234567890123456789");

        assert_eq!(ids, vec![123456789012345678, 1234567890123456789]);
    }

    #[test]
    fn deduplicates_preserving_first_occurrence() {
        let ids = parse_user_ids(
            "<@223456789012345678> 123456789012345678 <@!223456789012345678> 123456789012345678",
        );

        assert_eq!(ids, vec![223456789012345678, 123456789012345678]);
    }

    #[test]
    fn skips_zero_ids() {
        assert_eq!(
            parse_user_ids("<@0> <@123456789012345678>"),
            vec![123456789012345678]
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_user_ids("no users here").is_empty());
    }
}
