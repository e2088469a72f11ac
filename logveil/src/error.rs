//! Errors surfaced by [`Redactor::redact`](crate::Redactor::redact).
//!
//! Every variant names the type being redacted. None of them carries field
//! values, so an error can be logged without leaking what it was guarding.

use thiserror::Error;

/// Failure while producing a redacted copy.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RedactError {
    /// `Clone` panicked while copying the value before redaction.
    #[error("failed to copy `{type_name}` before redaction: {reason}")]
    Copy {
        type_name: &'static str,
        reason: String,
    },

    /// A secured field still reports populated content after concealment.
    #[error("secured field `{path}` ({type_name}) is still populated after concealment")]
    Mutation {
        path: String,
        type_name: &'static str,
    },

    /// Detection or the walk panicked.
    #[error("redaction of `{type_name}` panicked: {message}")]
    Panic {
        type_name: &'static str,
        message: String,
    },
}

impl RedactError {
    /// Name of the type whose redaction failed.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Copy { type_name, .. }
            | Self::Mutation { type_name, .. }
            | Self::Panic { type_name, .. } => type_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RedactError;

    #[test]
    fn mutation_message_names_path_and_type() {
        let err = RedactError::Mutation {
            path: "accounts[..].password".to_string(),
            type_name: "alloc::string::String",
        };
        let message = err.to_string();
        assert!(message.contains("accounts[..].password"));
        assert!(message.contains("alloc::string::String"));
        assert_eq!(err.type_name(), "alloc::string::String");
    }

    #[test]
    fn copy_message_carries_reason() {
        let err = RedactError::Copy {
            type_name: "app::Session",
            reason: "clone exploded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to copy `app::Session` before redaction: clone exploded"
        );
    }
}
