//! Per-cue error conditions
//!
//! None of these abort a frame; the controller skips the affected cue and
//! carries on with the rest.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CueError {
    /// No listener in the scene, so distance cannot be measured
    #[error("no audio listener in the scene")]
    NoListener,

    /// A reference the cue needs is not assigned
    #[error("cue '{cue}' has no {what} assigned")]
    MissingAssignment { cue: String, what: &'static str },

    /// The resolved configuration is outside its valid ranges
    #[error("cue '{cue}' has an invalid configuration: {reason}")]
    InvalidConfig { cue: String, reason: String },
}

impl CueError {
    pub fn missing(cue: impl Into<String>, what: &'static str) -> Self {
        Self::MissingAssignment {
            cue: cue.into(),
            what,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_cue() {
        let err = CueError::missing("campfire", "emitter");
        assert_eq!(err.to_string(), "cue 'campfire' has no emitter assigned");

        let err = CueError::InvalidConfig {
            cue: "river".to_string(),
            reason: "min_size must be positive".to_string(),
        };
        assert!(err.to_string().contains("river"));
        assert!(err.to_string().contains("min_size"));
    }
}
