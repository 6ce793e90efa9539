/// Convenience result type used across apex-motion.
pub type MotionResult<T> = Result<T, MotionError>;

/// Error taxonomy for boundary operations.
///
/// Core state machines never fail; these errors only come from configuration, scene loading
/// and scripted input that names handles the document does not know.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid argument to a core operation (for example a zero animation duration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid stage or sensor configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed scene or script, or a reference to an unknown element.
    #[error("scene error: {0}")]
    Scene(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`MotionError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
