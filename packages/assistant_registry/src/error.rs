//! Registry configuration errors and selection rejections.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("registry has no assistants")]
    Empty,

    #[error("assistant #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate assistant name: {0}")]
    DuplicateName(String),

    #[error("assistant {name:?} has an invalid url {url:?}: {reason}")]
    InvalidUrl {
        name: String,
        url: String,
        reason: String,
    },
}

impl RegistryError {
    pub fn error_code(&self) -> &str {
        match self {
            Self::Empty => "empty_registry",
            Self::EmptyName { .. } => "empty_name",
            Self::DuplicateName(_) => "duplicate_name",
            Self::InvalidUrl { .. } => "invalid_url",
        }
    }
}

/// A selection request that named no registered assistant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("unknown assistant: {name}")]
    UnknownAssistant { name: String },
}

impl SelectError {
    pub fn error_code(&self) -> &str {
        match self {
            Self::UnknownAssistant { .. } => "unknown_assistant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(RegistryError::Empty.error_code(), "empty_registry");
        assert_eq!(
            RegistryError::DuplicateName("a".into()).error_code(),
            "duplicate_name"
        );
        assert_eq!(
            SelectError::UnknownAssistant { name: "x".into() }.error_code(),
            "unknown_assistant"
        );
    }

    #[test]
    fn messages_name_the_offender() {
        let err = RegistryError::InvalidUrl {
            name: "RFP".into(),
            url: "nope".into(),
            reason: "missing scheme".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("RFP"));
        assert!(msg.contains("missing scheme"));
    }
}
