// File: src/rules.rs
// Purpose: Per-field rule table, resolved once from the field kind

use crate::config::RuleSettings;
use crate::email::is_valid_email;
use crate::field::{FieldDescriptor, FieldKind};
use crate::username::is_valid_username;

/// A boolean predicate over a field's current value.
///
/// Lengths are counted in characters of the trimmed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Trimmed value has the accepted email shape
    Email,
    /// Trimmed value has at least this many characters
    MinChars(usize),
    /// Always valid
    Optional,
    /// Trimmed value is non-empty
    Required,
    /// Trimmed value is a well-formed username
    Username,
}

impl Rule {
    /// Select the rule for a field kind.
    pub fn for_kind(kind: FieldKind, settings: &RuleSettings) -> Self {
        match kind {
            FieldKind::Email => Rule::Email,
            FieldKind::Password => Rule::MinChars(settings.min_password_chars),
            FieldKind::FirstName => Rule::MinChars(settings.min_first_name_chars),
            FieldKind::LastName => Rule::Optional,
            FieldKind::Username if settings.strict_username => Rule::Username,
            FieldKind::Username | FieldKind::PasswordConfirm | FieldKind::Other => {
                Rule::Required
            }
        }
    }

    pub fn check(&self, value: &str) -> bool {
        let trimmed = value.trim();
        match self {
            Rule::Email => is_valid_email(trimmed),
            Rule::MinChars(min) => trimmed.chars().count() >= *min,
            Rule::Optional => true,
            Rule::Required => !trimmed.is_empty(),
            Rule::Username => is_valid_username(trimmed),
        }
    }
}

/// Validate a single value against the rule its field resolves to.
pub fn validate_field(field: &FieldDescriptor, value: &str, settings: &RuleSettings) -> bool {
    Rule::for_kind(field.kind, settings).check(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &str, value: &str) -> bool {
        validate_field(&FieldDescriptor::new(name), value, &RuleSettings::default())
    }

    #[test]
    fn test_rule_selection() {
        let settings = RuleSettings::default();
        assert_eq!(Rule::for_kind(FieldKind::Email, &settings), Rule::Email);
        assert_eq!(Rule::for_kind(FieldKind::Password, &settings), Rule::MinChars(8));
        assert_eq!(Rule::for_kind(FieldKind::FirstName, &settings), Rule::MinChars(2));
        assert_eq!(Rule::for_kind(FieldKind::LastName, &settings), Rule::Optional);
        assert_eq!(Rule::for_kind(FieldKind::PasswordConfirm, &settings), Rule::Required);
        assert_eq!(Rule::for_kind(FieldKind::Username, &settings), Rule::Required);
        assert_eq!(Rule::for_kind(FieldKind::Other, &settings), Rule::Required);

        let strict = RuleSettings {
            strict_username: true,
            ..RuleSettings::default()
        };
        assert_eq!(Rule::for_kind(FieldKind::Username, &strict), Rule::Username);
    }

    #[test]
    fn test_email_rule() {
        assert!(check("email", "a@b.co"));
        assert!(check("email", " user@example.com "));
        assert!(!check("email", "a@@b"));
        assert!(!check("email", "not-an-email"));
    }

    #[test]
    fn test_password_boundary() {
        assert!(!check("password1", "1234567"));
        assert!(check("password1", "12345678"));
        // Surrounding whitespace does not count.
        assert!(!check("password1", "  1234567  "));
        assert!(!check("password1", ""));
    }

    #[test]
    fn test_first_name_boundary() {
        assert!(!check("first_name", "J"));
        assert!(check("first_name", "Jo"));
        assert!(!check("first_name", " J "));
        assert!(check("first_name", "Zoë"));
    }

    #[test]
    fn test_last_name_always_valid() {
        assert!(check("last_name", ""));
        assert!(check("last_name", "   "));
        assert!(check("last_name", "x"));
    }

    #[test]
    fn test_default_rule() {
        assert!(check("username", "jo"));
        assert!(check("password2", "anything"));
        assert!(check("", "x"));
        assert!(!check("username", ""));
        assert!(!check("username", " \t\n"));
        assert!(!check("", ""));
    }

    #[test]
    fn test_min_chars_counts_characters() {
        assert!(Rule::MinChars(2).check("éé"));
        assert!(!Rule::MinChars(3).check("éé"));
    }

    #[test]
    fn test_strict_username_rule() {
        assert!(Rule::Username.check(" john_doe "));
        assert!(!Rule::Username.check("_john"));
        assert!(!Rule::Username.check(""));
    }
}
