/// Convenience result alias used across the crate.
pub type OrreryResult<T> = Result<T, OrreryError>;

/// Error type for every fallible library operation.
///
/// Most of these never reach the frame driver: data loading, per-scene updates and per-entity
/// hit tests log and degrade instead of propagating.
#[derive(thiserror::Error, Debug)]
pub enum OrreryError {
    /// Invalid input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed or missing presentation data.
    #[error("data error: {0}")]
    Data(String),

    /// Failure while recording or rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, typically IO with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OrreryError {
    /// Build a [`OrreryError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`OrreryError::Data`].
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`OrreryError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`OrreryError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for OrreryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
