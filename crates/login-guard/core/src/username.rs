//! Strict username check
//!
//! Only used when `strict_username` is enabled; otherwise `username`
//! fields fall back to the required-value rule.

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 25;

/// Validates a username: 2-25 characters from `[a-zA-Z0-9_]`, not starting
/// with `_`, without consecutive underscores, and not ending with `_`.
pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return false;
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return false;
    }

    if username.starts_with('_') || username.ends_with('_') {
        return false;
    }

    !username.contains("__")
}
