use thiserror::Error;

/// Caller-side mistakes. These are logged and degrade to a no-op; they are
/// never raised as faults by the public builders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title and url are required (title is missing)")]
    MissingTitle,
    #[error("title and url are required (url is missing)")]
    MissingUrl,
    #[error("projects must be a non-empty array")]
    EmptyCollection,
    #[error("container not found: {0}")]
    ContainerNotFound(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
