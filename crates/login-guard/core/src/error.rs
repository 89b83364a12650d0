// File: src/error.rs
// Purpose: Gate construction errors
//
// Failed field checks are UI state, not errors. These only cover a gate that
// cannot be built from the given fields/config.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("password field '{present}' has no matching '{missing}' field")]
    UnpairedPassword { present: String, missing: String },

    #[error("element id '{0}' is used by more than one tracked field")]
    DuplicateElementId(String),

    #[error("invalid guard config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
