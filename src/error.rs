//! Error taxonomy for configuration-time failures.
//!
//! Only mistakes in how an animator is set up surface as errors. Everything
//! that can go wrong while producing frames (unreachable IK targets, phase
//! overflow, degenerate bones) is recovered where it happens.

/// Convenience result type used across the crate.
pub type PoseResult<T> = Result<T, PoseError>;

#[derive(thiserror::Error, Debug)]
pub enum PoseError {
    /// A style field carried a value outside its enumerated set.
    #[error("unknown {field} '{value}'")]
    UnknownStyle { field: &'static str, value: String },

    /// The requested motion kind is not one of the supported actions.
    #[error("unknown motion kind '{0}'")]
    UnknownMotionKind(String),

    /// Keyframe set is empty, unordered or otherwise malformed.
    #[error("invalid keyframes: {0}")]
    InvalidKeyframes(String),

    /// A numeric tuning parameter is out of its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed JSON configuration.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl PoseError {
    pub fn unknown_style(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownStyle {
            field,
            value: value.into(),
        }
    }

    pub fn keyframes(msg: impl Into<String>) -> Self {
        Self::InvalidKeyframes(msg.into())
    }

    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = PoseError::unknown_style("weight", "medium");
        assert_eq!(err.to_string(), "unknown weight 'medium'");

        let err = PoseError::UnknownMotionKind("moonwalk".to_string());
        assert!(err.to_string().contains("moonwalk"));
    }

    #[test]
    fn test_json_errors_convert() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: PoseError = parse.unwrap_err().into();
        assert!(matches!(err, PoseError::Config(_)));
    }
}
