use thiserror::Error;

/// Failure taxonomy for one registration attempt. Every variant ends up as
/// a single `error: <message>` line on stdout.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Malformed, missing, or out-of-range input. Nothing is persisted.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A provided value could not be serialized into the metadata blob.
    #[error("metadata encoding failed: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The store rejected or never received the insert. Opaque, no retry;
    /// the insert is a single row, so no partial record exists.
    #[error("store error: {0:#}")]
    Persistence(anyhow::Error),
}

impl RegisterError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        RegisterError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
