// File: src/gate.rs
// Purpose: Submit gate - runs field rules, toggles error markers, triggers the challenge

use std::collections::HashSet;

use crate::config::GuardConfig;
use crate::error::{GateError, Result};
use crate::field::{FieldDescriptor, FieldState};
use crate::rules::Rule;

/// Host view of the form: reads current values and renders error markers.
pub trait FormView {
    /// Current raw (untrimmed) value of the field at `index`
    fn value(&self, index: usize, field: &FieldDescriptor) -> String;

    /// Show or hide the error marker of the field at `index`
    fn set_errored(&mut self, index: usize, field: &FieldDescriptor, errored: bool);
}

/// One-way notification fired when every check passes.
///
/// The gate does not observe the challenge's result.
pub trait ChallengeTrigger {
    fn trigger_challenge(&mut self);
}

impl<F: FnMut()> ChallengeTrigger for F {
    fn trigger_challenge(&mut self) {
        self()
    }
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitOutcome {
    /// Every rule passed and the password pair matched
    pub passed: bool,
    /// Names of the fields marked errored by this attempt, in field order
    pub failed: Vec<String>,
    /// The password and confirmation values differed
    pub password_mismatch: bool,
    /// The challenge was triggered
    pub triggered: bool,
}

impl SubmitOutcome {
    /// Passed, but the challenge was held back by the re-entry guard
    pub fn absorbed(&self) -> bool {
        self.passed && !self.triggered
    }
}

#[derive(Debug, Clone)]
struct TrackedField {
    descriptor: FieldDescriptor,
    rule: Rule,
    state: FieldState,
}

#[derive(Debug, Clone, Copy)]
struct PasswordPair {
    password: usize,
    confirmation: usize,
}

/// Validation gate over a fixed, ordered list of fields
#[derive(Debug, Clone)]
pub struct ValidationGate {
    fields: Vec<TrackedField>,
    pair: Option<PasswordPair>,
    guard_reentry: bool,
    busy: bool,
}

impl ValidationGate {
    /// Build a gate over `fields` (in document order).
    ///
    /// The password pair is located by `config.password_id` and
    /// `config.confirmation_id`. If neither id is present the confirmation
    /// check is skipped; if only one is present construction fails.
    pub fn new(fields: Vec<FieldDescriptor>, config: &GuardConfig) -> Result<Self> {
        config.validate()?;

        let mut seen = HashSet::new();
        for id in fields.iter().filter_map(|f| f.element_id.as_deref()) {
            if !seen.insert(id) {
                return Err(GateError::DuplicateElementId(id.to_string()));
            }
        }

        let position = |id: &str| fields.iter().position(|f| f.has_id(id));
        let pair = match (position(&config.password_id), position(&config.confirmation_id)) {
            (Some(password), Some(confirmation)) => Some(PasswordPair {
                password,
                confirmation,
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(GateError::UnpairedPassword {
                    present: config.password_id.clone(),
                    missing: config.confirmation_id.clone(),
                })
            }
            (None, Some(_)) => {
                return Err(GateError::UnpairedPassword {
                    present: config.confirmation_id.clone(),
                    missing: config.password_id.clone(),
                })
            }
        };

        let fields = fields
            .into_iter()
            .map(|descriptor| TrackedField {
                rule: Rule::for_kind(descriptor.kind, &config.rules),
                descriptor,
                state: FieldState::Clean,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "Validation gate built over {} fields (password pair: {})",
            fields.len(),
            pair.is_some()
        );

        Ok(Self {
            fields,
            pair,
            guard_reentry: config.guard_reentry,
            busy: false,
        })
    }

    /// Run every rule, update error markers, and trigger the challenge if all pass.
    ///
    /// A failing field never stops the loop; every field is checked and marked.
    pub fn attempt_submit<V, T>(&mut self, view: &mut V, trigger: &mut T) -> SubmitOutcome
    where
        V: FormView + ?Sized,
        T: ChallengeTrigger + ?Sized,
    {
        let mut results: Vec<bool> = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| field.rule.check(&view.value(index, &field.descriptor)))
            .collect();

        let mut password_mismatch = false;
        if let Some(pair) = self.pair {
            let password = view.value(pair.password, &self.fields[pair.password].descriptor);
            let confirmation =
                view.value(pair.confirmation, &self.fields[pair.confirmation].descriptor);
            if password != confirmation {
                password_mismatch = true;
                results[pair.confirmation] = false;
            }
        }

        let mut failed = Vec::new();
        for (index, (field, valid)) in self.fields.iter_mut().zip(results).enumerate() {
            if valid {
                field.state.reset();
                view.set_errored(index, &field.descriptor, false);
            } else {
                tracing::debug!("Field '{}' failed validation", field.descriptor.name);
                field.state.mark_errored();
                view.set_errored(index, &field.descriptor, true);
                failed.push(field.descriptor.name.clone());
            }
        }

        let passed = failed.is_empty();
        let mut triggered = false;
        if passed {
            if self.guard_reentry && self.busy {
                tracing::debug!("Submit absorbed: challenge already in flight");
            } else {
                tracing::info!("All fields valid, triggering challenge");
                self.busy = self.guard_reentry;
                trigger.trigger_challenge();
                triggered = true;
            }
        }

        SubmitOutcome {
            passed,
            failed,
            password_mismatch,
            triggered,
        }
    }

    /// Clear a field's error marker when it gains focus. Rules are not re-run.
    pub fn focus<V: FormView + ?Sized>(&mut self, index: usize, view: &mut V) {
        if let Some(field) = self.fields.get_mut(index) {
            field.state.reset();
            view.set_errored(index, &field.descriptor, false);
        }
    }

    /// Allow the next successful submit to trigger the challenge again.
    pub fn release(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn state(&self, index: usize) -> Option<FieldState> {
        self.fields.get(index).map(|f| f.state)
    }

    pub fn rule(&self, index: usize) -> Option<Rule> {
        self.fields.get(index).map(|f| f.rule)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().map(|f| &f.descriptor)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Index of the field with the given element id
    pub fn index_of_id(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.descriptor.has_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryForm {
        values: HashMap<String, String>,
        errored: HashMap<String, bool>,
    }

    impl FormView for MemoryForm {
        fn value(&self, _index: usize, field: &FieldDescriptor) -> String {
            self.values.get(&field.name).cloned().unwrap_or_default()
        }

        fn set_errored(&mut self, _index: usize, field: &FieldDescriptor, errored: bool) {
            self.errored.insert(field.name.clone(), errored);
        }
    }

    fn single(name: &str) -> ValidationGate {
        ValidationGate::new(vec![FieldDescriptor::new(name)], &GuardConfig::default()).unwrap()
    }

    #[test]
    fn test_unpaired_password_rejected() {
        let fields = vec![FieldDescriptor::new("password1").with_id("pass1")];
        let err = ValidationGate::new(fields, &GuardConfig::default()).unwrap_err();
        assert_eq!(
            err,
            GateError::UnpairedPassword {
                present: "pass1".to_string(),
                missing: "pass2".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let fields = vec![
            FieldDescriptor::new("email").with_id("login"),
            FieldDescriptor::new("username").with_id("login"),
        ];
        let err = ValidationGate::new(fields, &GuardConfig::default()).unwrap_err();
        assert_eq!(err, GateError::DuplicateElementId("login".to_string()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GuardConfig {
            error_class: String::new(),
            ..GuardConfig::default()
        };
        assert!(matches!(
            ValidationGate::new(Vec::new(), &config),
            Err(GateError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_gate_passes() {
        let mut gate = ValidationGate::new(Vec::new(), &GuardConfig::default()).unwrap();
        let mut calls = 0;
        let outcome = gate.attempt_submit(&mut MemoryForm::default(), &mut || calls += 1);
        assert!(outcome.passed);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_failure_marks_and_focus_clears() {
        let mut gate = single("username");
        let mut form = MemoryForm::default();
        let mut calls = 0;

        let outcome = gate.attempt_submit(&mut form, &mut || calls += 1);
        assert!(!outcome.passed);
        assert_eq!(outcome.failed, vec!["username".to_string()]);
        assert_eq!(calls, 0);
        assert_eq!(gate.state(0), Some(FieldState::Errored));
        assert!(form.errored["username"]);

        gate.focus(0, &mut form);
        assert_eq!(gate.state(0), Some(FieldState::Clean));
        assert!(!form.errored["username"]);
    }

    #[test]
    fn test_focus_out_of_range_is_noop() {
        let mut gate = single("username");
        let mut form = MemoryForm::default();
        gate.focus(5, &mut form);
        assert!(form.errored.is_empty());
    }

    #[test]
    fn test_reentry_guard() {
        let config = GuardConfig {
            guard_reentry: true,
            ..GuardConfig::default()
        };
        let mut gate = ValidationGate::new(vec![FieldDescriptor::new("username")], &config).unwrap();
        let mut form = MemoryForm::default();
        form.values.insert("username".into(), "jo".into());
        let mut calls = 0;

        let first = gate.attempt_submit(&mut form, &mut || calls += 1);
        assert!(first.triggered);
        assert!(gate.is_busy());

        let second = gate.attempt_submit(&mut form, &mut || calls += 1);
        assert!(second.passed);
        assert!(second.absorbed());
        assert_eq!(calls, 1);

        gate.release();
        let third = gate.attempt_submit(&mut form, &mut || calls += 1);
        assert!(third.triggered);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_lookup_helpers() {
        let fields = vec![
            FieldDescriptor::new("password1").with_id("pass1"),
            FieldDescriptor::new("password2").with_id("pass2"),
            FieldDescriptor::new("last_name"),
        ];
        let gate = ValidationGate::new(fields, &GuardConfig::default()).unwrap();
        assert_eq!(gate.len(), 3);
        assert_eq!(gate.index_of_id("pass2"), Some(1));
        assert_eq!(gate.index_of_id("missing"), None);
        assert_eq!(gate.rule(2), Some(Rule::Optional));
        assert_eq!(
            gate.fields().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            vec!["password1", "password2", "last_name"]
        );
    }
}
