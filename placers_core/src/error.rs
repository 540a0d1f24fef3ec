use thiserror::Error;

/// Form and action validation failures. These block the action and are shown
/// to the user; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    MissingField(&'static str),

    #[error("Already applied to {company}!")]
    AlreadyApplied { company: String },

    #[error("Profile not found: {0}")]
    UnknownProfile(String),

    #[error("{field} must be a number between 0 and 10, got {value:?}")]
    InvalidScore { field: &'static str, value: String },
}
