//! Error Taxonomy
//!
//! Input errors are always recoverable by correcting the input; collaborator
//! errors surface the upstream message and leave the in-memory draft intact.
//! Nothing here is fatal to the wizard.

use thiserror::Error;

/// Problems with user-supplied input, caught before anything leaves the client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} is required for the {step} step")]
    MissingField {
        step: &'static str,
        field: &'static str,
    },

    #[error("page count must be at least 1")]
    ZeroPages,

    #[error("unknown {what}: '{id}'")]
    UnknownId { what: &'static str, id: String },

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("checkout incomplete: {0}")]
    CheckoutIncomplete(String),
}

/// Failures reported by an external collaborator
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    #[error("sign-in failed: {0}")]
    Auth(String),

    #[error("this email is already registered; sign in instead")]
    AlreadyRegistered,

    #[error("order submission failed: {0}")]
    Intake(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Top-level error for wizard operations
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = InputError::MissingField {
            step: "Checkout",
            field: "email",
        };
        assert_eq!(err.to_string(), "email is required for the Checkout step");

        let err = CollaboratorError::Auth("invalid credentials".into());
        assert_eq!(err.to_string(), "sign-in failed: invalid credentials");
    }
}
