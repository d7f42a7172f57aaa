//! Effector target types: frame references, weights, and per-frame targets.
//!
//! An effector is a robot body part (a hand, a foot) whose pose is tracked
//! against the reference motion. Each effector declares, motion-wide, which
//! coordinate frame its targets are expressed in ([`EffectorReference`]) and
//! how strongly its errors are weighted ([`EffectorWeight`]). Each frame then
//! optionally carries a target location and/or orientation for the effector
//! ([`EffectorTarget`]).

use nalgebra::{Point3, UnitQuaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinate frame a target value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameReference {
    /// The target is already in world coordinates.
    #[default]
    World,
    /// The target is relative to the robot's root link pose.
    RootRelative,
}

/// Frame references for one effector: one tag for location targets, one for
/// orientation targets. Fixed per motion, not per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectorReference {
    /// Frame the location targets are expressed in.
    pub location: FrameReference,
    /// Frame the orientation targets are expressed in.
    pub rotation: FrameReference,
}

impl EffectorReference {
    /// Create a reference pair.
    #[must_use]
    pub const fn new(location: FrameReference, rotation: FrameReference) -> Self {
        Self { location, rotation }
    }

    /// Both components in world coordinates.
    #[must_use]
    pub const fn world() -> Self {
        Self::new(FrameReference::World, FrameReference::World)
    }

    /// Both components relative to the root link.
    #[must_use]
    pub const fn root_relative() -> Self {
        Self::new(FrameReference::RootRelative, FrameReference::RootRelative)
    }
}

/// Per-effector error weights, location and orientation independently.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectorWeight {
    /// Weight applied to this effector's squared location error.
    pub location: f64,
    /// Weight applied to this effector's squared rotation error.
    pub rotation: f64,
}

impl Default for EffectorWeight {
    fn default() -> Self {
        Self {
            location: 1.0,
            rotation: 1.0,
        }
    }
}

impl EffectorWeight {
    /// Create a weight pair.
    #[must_use]
    pub const fn new(location: f64, rotation: f64) -> Self {
        Self { location, rotation }
    }

    /// The same weight for location and rotation.
    #[must_use]
    pub const fn uniform(weight: f64) -> Self {
        Self::new(weight, weight)
    }

    /// Check that both weights are non-negative and finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.location >= 0.0
            && self.location.is_finite()
            && self.rotation >= 0.0
            && self.rotation.is_finite()
    }
}

/// Target pose components for one effector in one frame.
///
/// Either component may be absent; an effector with both components absent
/// does not contribute tracking error that frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectorTarget {
    /// Target location in the effector's declared location frame.
    pub location: Option<Point3<f64>>,
    /// Target orientation in the effector's declared rotation frame.
    pub rotation: Option<UnitQuaternion<f64>>,
}

impl EffectorTarget {
    /// No target this frame.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            location: None,
            rotation: None,
        }
    }

    /// Location target only.
    #[must_use]
    pub const fn location(location: Point3<f64>) -> Self {
        Self {
            location: Some(location),
            rotation: None,
        }
    }

    /// Orientation target only.
    #[must_use]
    pub const fn rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self {
            location: None,
            rotation: Some(rotation),
        }
    }

    /// Both location and orientation targets.
    #[must_use]
    pub const fn full(location: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            location: Some(location),
            rotation: Some(rotation),
        }
    }

    /// Check whether this target carries no components.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.location.is_none() && self.rotation.is_none()
    }
}
