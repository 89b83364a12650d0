//! Login Guard Core
//!
//! Host-independent validation gate for login and registration forms.
//! The browser binding (`login-guard-wasm`) drives it from DOM events; tests
//! drive it through an in-memory [`FormView`].

pub mod config;
pub mod email;
pub mod error;
pub mod field;
pub mod gate;
pub mod rules;
pub mod username;

pub use config::{GuardConfig, RuleSettings};
pub use email::is_valid_email;
pub use error::GateError;
pub use field::{FieldDescriptor, FieldKind, FieldState};
pub use gate::{ChallengeTrigger, FormView, SubmitOutcome, ValidationGate};
pub use rules::{validate_field, Rule};
pub use username::is_valid_username;
