//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required setting is absent (or unusable). Raised before any network call.
    #[error("Missing {0}")]
    Config(String),

    /// Tracker answered with a non-2xx status. Body is kept verbatim.
    #[error("Server error {status}: {body}")]
    Transport { status: u16, body: String },

    /// No HTTP response at all (connect, DNS, TLS).
    #[error("Server error (no response): {0}")]
    Network(String),

    #[error("Unexpected tracker response: {0}")]
    Decode(String),

    #[error("Prompt failed: {0}")]
    Presentation(String),
}

impl DomainError {
    /// HTTP status carried by the error, if the tracker responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            DomainError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_surfaces_status_and_body_verbatim() {
        let err = DomainError::Transport {
            status: 401,
            body: r#"{"errorMessages":["Unauthorized"]}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"Server error 401: {"errorMessages":["Unauthorized"]}"#
        );
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn config_error_names_the_missing_setting() {
        let err = DomainError::Config("username".into());
        assert_eq!(err.to_string(), "Missing username");
        assert_eq!(err.status(), None);
    }
}
