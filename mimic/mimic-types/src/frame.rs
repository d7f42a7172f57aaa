//! Frames and keyframes of a reference motion.

use crate::EffectorTarget;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One point in a reference motion.
///
/// Joint and effector targets are dense arrays indexed by the owning
/// [`Motion`](crate::Motion)'s registries; [`Motion::new`](crate::Motion::new)
/// validates that the lengths agree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Target joint positions, one per registry joint.
    pub joint_targets: Vec<f64>,
    /// Effector targets, one per registry effector.
    pub effector_targets: Vec<EffectorTarget>,
}

impl Frame {
    /// Create a frame from dense joint and effector targets.
    #[must_use]
    pub const fn new(joint_targets: Vec<f64>, effector_targets: Vec<EffectorTarget>) -> Self {
        Self {
            joint_targets,
            effector_targets,
        }
    }

    /// Create a frame with joint targets only (no tracked effectors).
    #[must_use]
    pub const fn joints_only(joint_targets: Vec<f64>) -> Self {
        Self::new(joint_targets, Vec::new())
    }
}

/// A [`Frame`] together with its timestamp in the motion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keyframe {
    /// Time of this frame, seconds from the start of the motion.
    pub time: f64,
    /// The frame data.
    pub frame: Frame,
}

impl Keyframe {
    /// Create a keyframe.
    #[must_use]
    pub const fn new(time: f64, frame: Frame) -> Self {
        Self { time, frame }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_joints_only_has_no_effectors() {
        let frame = Frame::joints_only(vec![0.1, 0.2]);
        assert_eq!(frame.joint_targets.len(), 2);
        assert!(frame.effector_targets.is_empty());
    }
}
