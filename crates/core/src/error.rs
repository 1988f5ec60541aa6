/// Result alias that carries the custom [`MotifError`] type.
pub type Result<T> = std::result::Result<T, MotifError>;

/// Common error type for the core crate.
///
/// Geometry, rasterization and animation never fail; errors only surface at
/// the edges where configuration enters the engine.
#[derive(Debug, thiserror::Error)]
pub enum MotifError {
    /// Free-form message for failures that have no dedicated variant.
    #[error("{0}")]
    Message(String),
    /// A configuration value is outside the range the engine supports.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialization errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl MotifError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    /// Creates an [`MotifError::InvalidConfig`] error.
    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<&str> for MotifError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for MotifError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_mentions_the_reason() {
        let err = MotifError::invalid_config("bar_count must be even");
        assert_eq!(
            format!("{err}"),
            "invalid configuration: bar_count must be even"
        );
    }

    #[test]
    fn converts_from_strings() {
        let err: MotifError = "boom".into();
        assert!(matches!(err, MotifError::Message(ref m) if m == "boom"));
    }
}
