// File: src/field.rs
// Purpose: Field identity and per-field display state

use serde::{Deserialize, Serialize};

/// Classification of a tracked input, resolved once from its `name` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Password,
    PasswordConfirm,
    FirstName,
    LastName,
    Username,
    Other,
}

impl FieldKind {
    /// Map a form `name` attribute to its kind.
    ///
    /// # Examples
    /// ```
    /// use login_guard_core::FieldKind;
    /// assert_eq!(FieldKind::from_name("email"), FieldKind::Email);
    /// assert_eq!(FieldKind::from_name("password2"), FieldKind::PasswordConfirm);
    /// assert_eq!(FieldKind::from_name("nickname"), FieldKind::Other);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name {
            "email" => FieldKind::Email,
            "password1" => FieldKind::Password,
            "password2" => FieldKind::PasswordConfirm,
            "first_name" => FieldKind::FirstName,
            "last_name" => FieldKind::LastName,
            "username" => FieldKind::Username,
            _ => FieldKind::Other,
        }
    }
}

/// Immutable description of one tracked input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// The `name` attribute; empty for unnamed inputs
    pub name: String,
    /// The element `id`, if any. Used to locate the password pair.
    #[serde(default)]
    pub element_id: Option<String>,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = FieldKind::from_name(&name);
        Self {
            name,
            element_id: None,
            kind,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.element_id.as_deref() == Some(id)
    }
}

/// Display state of a field's error marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Clean,
    Errored,
}

impl FieldState {
    pub fn is_errored(self) -> bool {
        self == FieldState::Errored
    }

    /// Raise the marker after a failed check. Returns true if the state changed.
    pub fn mark_errored(&mut self) -> bool {
        let changed = *self == FieldState::Clean;
        *self = FieldState::Errored;
        changed
    }

    /// Clear the marker on focus. Returns true if the state changed.
    pub fn reset(&mut self) -> bool {
        let changed = *self == FieldState::Errored;
        *self = FieldState::Clean;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(FieldKind::from_name("email"), FieldKind::Email);
        assert_eq!(FieldKind::from_name("password1"), FieldKind::Password);
        assert_eq!(FieldKind::from_name("password2"), FieldKind::PasswordConfirm);
        assert_eq!(FieldKind::from_name("first_name"), FieldKind::FirstName);
        assert_eq!(FieldKind::from_name("last_name"), FieldKind::LastName);
        assert_eq!(FieldKind::from_name("username"), FieldKind::Username);
        assert_eq!(FieldKind::from_name(""), FieldKind::Other);
        assert_eq!(FieldKind::from_name("Email"), FieldKind::Other);
    }

    #[test]
    fn test_descriptor_builder() {
        let field = FieldDescriptor::new("password1").with_id("pass1");
        assert_eq!(field.kind, FieldKind::Password);
        assert!(field.has_id("pass1"));
        assert!(!field.has_id("pass2"));
        assert!(!FieldDescriptor::new("email").has_id("pass1"));
    }

    #[test]
    fn test_state_transitions() {
        let mut state = FieldState::default();
        assert_eq!(state, FieldState::Clean);

        assert!(state.mark_errored());
        assert!(!state.mark_errored());
        assert!(state.is_errored());

        assert!(state.reset());
        assert!(!state.reset());
        assert_eq!(state, FieldState::Clean);
    }
}
