use thiserror::Error;

use crate::validate::FieldErrors;
use crate::vault::EditState;

/// Result type for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Errors raised by the vault and its storage
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Cannot {intent} while {state}")]
    InvalidState {
        intent: &'static str,
        state: EditState,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VaultError {
    /// Field errors carried by a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            VaultError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
