//! Reference motion clips: validated keyframe sequences with effector tables.

use crate::{
    EffectorReference, EffectorWeight, Frame, ImitationError, Keyframe, NameRegistry, Result,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Effector registry paired with dense per-effector frame references and
/// weights.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectorTable {
    registry: NameRegistry,
    references: Vec<EffectorReference>,
    weights: Vec<EffectorWeight>,
}

/// One effector's table row: name, frame references, and weights.
#[derive(Debug, Clone, Copy)]
pub struct EffectorEntry<'a> {
    /// Effector name (also the robot link name).
    pub name: &'a str,
    /// Frame references for this effector's targets.
    pub reference: EffectorReference,
    /// Error weights for this effector.
    pub weight: EffectorWeight,
}

impl EffectorTable {
    /// Build a table from a registry and dense reference/weight arrays.
    ///
    /// # Errors
    ///
    /// Returns [`ImitationError::EffectorCountMismatch`] if the array lengths
    /// disagree with the registry, or [`ImitationError::InvalidWeight`] if a
    /// weight is negative or non-finite.
    pub fn new(
        registry: NameRegistry,
        references: Vec<EffectorReference>,
        weights: Vec<EffectorWeight>,
    ) -> Result<Self> {
        if references.len() != registry.len() {
            return Err(ImitationError::EffectorCountMismatch {
                expected: registry.len(),
                actual: references.len(),
            });
        }
        if weights.len() != registry.len() {
            return Err(ImitationError::EffectorCountMismatch {
                expected: registry.len(),
                actual: weights.len(),
            });
        }
        for (index, weight) in weights.iter().enumerate() {
            if !weight.is_valid() {
                let name = registry.name(index).unwrap_or("<unnamed>");
                return Err(ImitationError::invalid_weight(name));
            }
        }
        Ok(Self {
            registry,
            references,
            weights,
        })
    }

    /// A table with no effectors.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The effector name registry.
    #[must_use]
    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    /// Number of effectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Check whether the table has no effectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Frame references for the effector at an index.
    #[must_use]
    pub fn reference(&self, index: usize) -> Option<EffectorReference> {
        self.references.get(index).copied()
    }

    /// Weights for the effector at an index.
    #[must_use]
    pub fn weight(&self, index: usize) -> Option<EffectorWeight> {
        self.weights.get(index).copied()
    }

    /// Iterate over the table rows in registry order.
    pub fn iter(&self) -> impl Iterator<Item = EffectorEntry<'_>> {
        self.registry
            .names()
            .zip(&self.references)
            .zip(&self.weights)
            .map(|((name, reference), weight)| EffectorEntry {
                name,
                reference: *reference,
                weight: *weight,
            })
    }
}

/// An immutable reference motion clip.
///
/// A motion owns a joint registry, an effector table, and an ordered keyframe
/// sequence. All cross-array agreement is validated once here, so evaluation
/// never re-checks key sets per step. A constructed motion is read-only and
/// safe to share across concurrently running episodes.
///
/// # Example
///
/// ```
/// use mimic_types::{EffectorTable, Frame, Keyframe, Motion, NameRegistry};
///
/// let joints = NameRegistry::from_names(["hip", "knee"]).expect("unique names");
/// let motion = Motion::new(
///     joints,
///     EffectorTable::empty(),
///     vec![
///         Keyframe::new(0.0, Frame::joints_only(vec![0.0, 0.0])),
///         Keyframe::new(0.5, Frame::joints_only(vec![0.3, 0.1])),
///         Keyframe::new(1.0, Frame::joints_only(vec![0.0, 0.0])),
///     ],
/// )
/// .expect("valid motion");
///
/// assert_eq!(motion.duration(), 1.0);
/// // Times wrap modulo the duration, so the clip loops seamlessly.
/// assert_eq!(motion.frame_at(1.25).joint_targets, vec![0.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Motion {
    joints: NameRegistry,
    effectors: EffectorTable,
    keyframes: Vec<Keyframe>,
    duration: f64,
}

impl Motion {
    /// Build and validate a motion.
    ///
    /// # Errors
    ///
    /// - [`ImitationError::NoJoints`] if the joint registry is empty
    /// - [`ImitationError::NoKeyframes`] if fewer than two keyframes are given
    /// - [`ImitationError::FirstKeyframeNotAtZero`] /
    ///   [`ImitationError::KeyframeOutOfOrder`] for bad timestamps
    /// - [`ImitationError::KeyframeShapeMismatch`] if a frame's dense arrays
    ///   disagree with the registries
    pub fn new(
        joints: NameRegistry,
        effectors: EffectorTable,
        keyframes: Vec<Keyframe>,
    ) -> Result<Self> {
        if joints.is_empty() {
            return Err(ImitationError::NoJoints);
        }
        if keyframes.len() < 2 {
            return Err(ImitationError::NoKeyframes);
        }
        let first = keyframes[0].time;
        if first != 0.0 {
            return Err(ImitationError::FirstKeyframeNotAtZero { time: first });
        }
        for (index, pair) in keyframes.windows(2).enumerate() {
            if pair[1].time <= pair[0].time || !pair[1].time.is_finite() {
                return Err(ImitationError::KeyframeOutOfOrder { index: index + 1 });
            }
        }
        for (index, keyframe) in keyframes.iter().enumerate() {
            if keyframe.frame.joint_targets.len() != joints.len() {
                return Err(ImitationError::shape_mismatch(
                    index,
                    format!(
                        "{} joint targets for {} joints",
                        keyframe.frame.joint_targets.len(),
                        joints.len()
                    ),
                ));
            }
            if keyframe.frame.effector_targets.len() != effectors.len() {
                return Err(ImitationError::shape_mismatch(
                    index,
                    format!(
                        "{} effector targets for {} effectors",
                        keyframe.frame.effector_targets.len(),
                        effectors.len()
                    ),
                ));
            }
        }
        let duration = keyframes[keyframes.len() - 1].time;
        Ok(Self {
            joints,
            effectors,
            keyframes,
            duration,
        })
    }

    /// Total duration of the clip in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// The joint name registry.
    #[must_use]
    pub fn joints(&self) -> &NameRegistry {
        &self.joints
    }

    /// The effector table.
    #[must_use]
    pub fn effectors(&self) -> &EffectorTable {
        &self.effectors
    }

    /// The validated keyframes, in time order.
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// The frame active at a point in time.
    ///
    /// Pure lookup: time wraps modulo the clip duration (so the motion loops
    /// seamlessly), then the last keyframe at or before the wrapped time is
    /// selected.
    #[must_use]
    pub fn frame_at(&self, time: f64) -> &Frame {
        let wrapped = time.rem_euclid(self.duration);
        // First keyframe is at t = 0, so the partition point is at least 1.
        let index = self.keyframes.partition_point(|k| k.time <= wrapped);
        &self.keyframes[index.saturating_sub(1)].frame
    }

    /// A lazy, restartable `(timestamp, frame)` sequence stepped at `dt`.
    ///
    /// Timestamps are `k * dt` for `k = 0, 1, 2, ...`, computed by
    /// multiplication so the sequence is deterministic and free of
    /// accumulated rounding. The sequence is unbounded; callers stop it at
    /// their own termination condition.
    ///
    /// # Errors
    ///
    /// Returns [`ImitationError::InvalidTimestep`] if `dt` is not positive
    /// and finite.
    pub fn sample(&self, dt: f64) -> Result<FrameSampler<'_>> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ImitationError::InvalidTimestep(dt));
        }
        Ok(FrameSampler {
            motion: self,
            dt,
            step: 0,
        })
    }
}

/// Deterministic, restartable iterator over `(timestamp, frame)` pairs.
///
/// Created by [`Motion::sample`].
#[derive(Debug, Clone)]
pub struct FrameSampler<'a> {
    motion: &'a Motion,
    dt: f64,
    step: u64,
}

impl FrameSampler<'_> {
    /// Rewind the sampler to the start of the motion.
    pub fn restart(&mut self) {
        self.step = 0;
    }

    /// The step size this sampler was created with.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

impl<'a> Iterator for FrameSampler<'a> {
    type Item = (f64, &'a Frame);

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Self::Item> {
        let time = self.step as f64 * self.dt;
        self.step += 1;
        Some((time, self.motion.frame_at(time)))
    }
}
