//! Error types for motion-imitation evaluation.

use thiserror::Error;

/// Errors that can occur while building motion data or evaluating an episode.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImitationError {
    /// Motion has no keyframes.
    #[error("motion has no keyframes")]
    NoKeyframes,

    /// Motion has an empty joint registry.
    #[error("motion has no joints")]
    NoJoints,

    /// Duplicate name in a registry.
    #[error("duplicate name in registry: {name}")]
    DuplicateName {
        /// The name that appeared more than once.
        name: String,
    },

    /// Keyframe timestamps must be strictly increasing.
    #[error("keyframe {index} is out of order (timestamps must be strictly increasing)")]
    KeyframeOutOfOrder {
        /// Index of the offending keyframe.
        index: usize,
    },

    /// The first keyframe must sit at time zero.
    #[error("first keyframe at t = {time}, expected t = 0")]
    FirstKeyframeNotAtZero {
        /// Timestamp of the first keyframe.
        time: f64,
    },

    /// A frame's dense arrays disagree with the motion registries.
    #[error("keyframe {index} shape mismatch: {reason}")]
    KeyframeShapeMismatch {
        /// Index of the offending keyframe.
        index: usize,
        /// Description of the disagreement.
        reason: String,
    },

    /// Effector weights must be non-negative and finite.
    #[error("invalid weight for effector {effector}")]
    InvalidWeight {
        /// Name of the effector with the invalid weight.
        effector: String,
    },

    /// The robot does not expose a link required for tracking.
    #[error("robot link not found: {name}")]
    UnknownLink {
        /// Name of the missing link.
        name: String,
    },

    /// A frame contributed no effector tracking terms.
    #[error("no effector contributed a tracking term this frame")]
    NoContributingEffectors,

    /// Current and previous joint-position arrays differ in length.
    #[error("joint count mismatch: expected {expected}, got {actual}")]
    JointCountMismatch {
        /// Expected number of joints.
        expected: usize,
        /// Actual number of joints.
        actual: usize,
    },

    /// A frame's effector-target array disagrees with the effector table.
    #[error("effector count mismatch: expected {expected}, got {actual}")]
    EffectorCountMismatch {
        /// Expected number of effectors.
        expected: usize,
        /// Actual number of effectors.
        actual: usize,
    },

    /// Invalid simulation timestep.
    #[error("invalid timestep: {0} (must be positive and finite)")]
    InvalidTimestep(f64),

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// The robot failed to apply joint targets.
    #[error("actuation failed: {reason}")]
    Actuation {
        /// Description of the failure, as reported by the robot.
        reason: String,
    },

    /// The simulation failed to advance.
    #[error("simulation step failed: {reason}")]
    SimulationStep {
        /// Description of the failure, as reported by the simulation.
        reason: String,
    },
}

impl ImitationError {
    /// Create a duplicate-name error.
    #[must_use]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create a keyframe shape-mismatch error.
    #[must_use]
    pub fn shape_mismatch(index: usize, reason: impl Into<String>) -> Self {
        Self::KeyframeShapeMismatch {
            index,
            reason: reason.into(),
        }
    }

    /// Create an invalid-weight error.
    #[must_use]
    pub fn invalid_weight(effector: impl Into<String>) -> Self {
        Self::InvalidWeight {
            effector: effector.into(),
        }
    }

    /// Create an unknown-link error.
    #[must_use]
    pub fn unknown_link(name: impl Into<String>) -> Self {
        Self::UnknownLink { name: name.into() }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an actuation failure.
    #[must_use]
    pub fn actuation(reason: impl Into<String>) -> Self {
        Self::Actuation {
            reason: reason.into(),
        }
    }

    /// Create a simulation-step failure.
    #[must_use]
    pub fn simulation_step(reason: impl Into<String>) -> Self {
        Self::SimulationStep {
            reason: reason.into(),
        }
    }

    /// Check if this error reports malformed motion or caller data.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::NoKeyframes
                | Self::NoJoints
                | Self::DuplicateName { .. }
                | Self::KeyframeOutOfOrder { .. }
                | Self::FirstKeyframeNotAtZero { .. }
                | Self::KeyframeShapeMismatch { .. }
                | Self::InvalidWeight { .. }
                | Self::NoContributingEffectors
                | Self::JointCountMismatch { .. }
                | Self::EffectorCountMismatch { .. }
        )
    }

    /// Check if this error came from an external collaborator.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Actuation { .. } | Self::SimulationStep { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImitationError::duplicate_name("l_wrist");
        assert!(err.to_string().contains("l_wrist"));

        let err = ImitationError::JointCountMismatch {
            expected: 12,
            actual: 11,
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("11"));

        let err = ImitationError::InvalidTimestep(-0.01);
        assert!(err.to_string().contains("-0.01"));

        let err = ImitationError::actuation("servo bus timeout");
        assert!(err.to_string().contains("servo bus timeout"));
    }

    #[test]
    fn test_error_predicates() {
        assert!(ImitationError::NoContributingEffectors.is_data_error());
        assert!(!ImitationError::NoContributingEffectors.is_external());

        assert!(ImitationError::simulation_step("solver diverged").is_external());
        assert!(!ImitationError::simulation_step("solver diverged").is_data_error());

        assert!(!ImitationError::InvalidTimestep(0.0).is_data_error());
        assert!(!ImitationError::InvalidTimestep(0.0).is_external());
    }
}
