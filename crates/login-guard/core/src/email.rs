//! Email shape check
//!
//! Deliberately approximate: the pattern accepts a dotted-quad prefix in
//! brackets or one or more dotted labels, followed by a short alphabetic or
//! numeric top-level token. It is not RFC 5322 and is not meant to become one.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anchored email pattern used by the login form.
pub const EMAIL_PATTERN: &str = r"^([a-zA-Z0-9_\-\.]+)@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.)|(([a-zA-Z0-9\-]+\.)+))([a-zA-Z]{1,5}|[0-9]{1,3})(\]?)$";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex")
});

/// Returns true when the trimmed value looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}
