/// Convenience result type used across trackbox.
pub type TrackboxResult<T> = Result<T, TrackboxError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum TrackboxError {
    /// Invalid user-provided data (frame rates, scale factors, ranges).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when parsing or applying structured JSON input.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Corrupt, truncated, or unreadable tracker data streams.
    #[error("tracker data error: {0}")]
    Decode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackboxError {
    /// Build a [`TrackboxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrackboxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`TrackboxError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
