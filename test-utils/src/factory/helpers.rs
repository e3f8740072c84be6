//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Builds a snowflake-shaped Discord ID that is unique within the test run.
///
/// Discord IDs are 17 to 19 digits; the offset keeps generated values in that range so they
/// survive the same parsing real IDs go through.
///
/// # Returns
/// - `String` - 18 digit Discord ID
pub fn next_discord_id() -> String {
    (100_000_000_000_000_000u64 + next_id()).to_string()
}
