//! Reward terms: effector tracking, stabilization, and their aggregate.

use mimic_types::{Frame, ImitationError, Motion, Result, Robot};

use crate::config::RewardConfig;
use crate::target::{resolve_location, resolve_rotation};

/// The two reward terms computed for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardTerms {
    /// Effector pose-tracking reward, `<= 0`.
    pub tracking: f64,
    /// Frame-to-frame stabilization reward, `<= 0`.
    pub stabilization: f64,
}

impl RewardTerms {
    /// Weighted aggregate of the two terms.
    ///
    /// A term with weight exactly zero contributes exactly zero, even when
    /// the term itself saturated to negative infinity (`0 * -inf` would be
    /// NaN under IEEE arithmetic).
    #[must_use]
    pub fn total(&self, config: &RewardConfig) -> f64 {
        weighted(config.we, self.tracking) + weighted(config.ws, self.stabilization)
    }
}

fn weighted(weight: f64, term: f64) -> f64 {
    if weight == 0.0 {
        0.0
    } else {
        weight * term
    }
}

/// Reshape mean squared error into a reward.
///
/// `reshape(x) = 1 - exp(x)` for `x >= 0`: zero at zero error, negative
/// otherwise. For errors large enough that the exponential overflows, IEEE
/// arithmetic yields `1 - inf = -inf`, so the reward saturates to negative
/// infinity deterministically instead of raising.
fn reshape(normalized: f64) -> f64 {
    1.0 - normalized.exp()
}

/// Compute the effector-tracking reward for one frame.
///
/// For every effector with a target this frame, accumulates the weighted
/// squared location distance (`wl * dist^2 * weight.location`) and the
/// weighted squared intrinsic rotation angle (`wr * angle^2 *
/// weight.rotation`) between the resolved target and the effector's current
/// pose, counting each contributing component. The accumulated error is
/// normalized by the contribution count, scaled by `ke`, and reshaped.
///
/// Location and rotation contributions share one counter by design; they are
/// not normalized separately.
///
/// # Errors
///
/// - [`ImitationError::EffectorCountMismatch`] if the frame's target array
///   disagrees with the motion's effector table
/// - [`ImitationError::UnknownLink`] if the robot does not expose the root
///   link or a targeted effector link
/// - [`ImitationError::NoContributingEffectors`] if no effector carried a
///   target this frame
pub fn tracking_reward<R>(
    motion: &Motion,
    robot: &R,
    frame: &Frame,
    config: &RewardConfig,
) -> Result<f64>
where
    R: Robot + ?Sized,
{
    let effectors = motion.effectors();
    if frame.effector_targets.len() != effectors.len() {
        return Err(ImitationError::EffectorCountMismatch {
            expected: effectors.len(),
            actual: frame.effector_targets.len(),
        });
    }

    let root = robot
        .root_pose()
        .ok_or_else(|| ImitationError::unknown_link(robot.root_link()))?;

    let mut accumulated = 0.0;
    let mut contributions = 0u32;
    for (entry, target) in effectors.iter().zip(&frame.effector_targets) {
        if target.is_empty() {
            continue;
        }
        let pose = robot
            .link_pose(entry.name)
            .ok_or_else(|| ImitationError::unknown_link(entry.name))?;

        if let Some(location) = target.location {
            let resolved = resolve_location(entry.reference.location, location, &root);
            accumulated +=
                config.wl * (pose.position - resolved).norm_squared() * entry.weight.location;
            contributions += 1;
        }
        if let Some(rotation) = target.rotation {
            let resolved = resolve_rotation(entry.reference.rotation, rotation, &root);
            // Intrinsic distance: geodesic angle, invariant to quaternion sign
            let angle = pose.rotation.angle_to(&resolved);
            accumulated += config.wr * angle * angle * entry.weight.rotation;
            contributions += 1;
        }
    }

    if contributions == 0 {
        return Err(ImitationError::NoContributingEffectors);
    }

    Ok(reshape(config.ke * accumulated / f64::from(contributions)))
}

/// Compute the stabilization reward for one frame.
///
/// Penalizes the mean squared change of the joint targets since the previous
/// frame, scaled by `ks` and reshaped. With no previous frame there is
/// nothing to compare, and the reward is `0`.
///
/// # Errors
///
/// Returns [`ImitationError::JointCountMismatch`] if the two arrays differ
/// in length; consecutive frames must cover the same joint set.
#[allow(clippy::cast_precision_loss)]
pub fn stabilization_reward(
    current: &[f64],
    previous: Option<&[f64]>,
    config: &RewardConfig,
) -> Result<f64> {
    let Some(previous) = previous else {
        return Ok(0.0);
    };
    if previous.len() != current.len() {
        return Err(ImitationError::JointCountMismatch {
            expected: current.len(),
            actual: previous.len(),
        });
    }
    if current.is_empty() {
        return Ok(0.0);
    }

    let change: f64 = current
        .iter()
        .zip(previous)
        .map(|(c, p)| (c - p) * (c - p))
        .sum();
    Ok(reshape(config.ks * change / current.len() as f64))
}

/// Compute both reward terms for one frame.
///
/// # Errors
///
/// Propagates the failure modes of [`tracking_reward`] and
/// [`stabilization_reward`].
pub fn frame_reward<R>(
    motion: &Motion,
    robot: &R,
    frame: &Frame,
    previous_positions: Option<&[f64]>,
    config: &RewardConfig,
) -> Result<RewardTerms>
where
    R: Robot + ?Sized,
{
    let tracking = tracking_reward(motion, robot, frame, config)?;
    let stabilization = stabilization_reward(&frame.joint_targets, previous_positions, config)?;
    Ok(RewardTerms {
        tracking,
        stabilization,
    })
}

/// Compute the weighted scalar reward for one frame.
///
/// # Errors
///
/// Propagates the failure modes of [`frame_reward`].
pub fn total_reward<R>(
    motion: &Motion,
    robot: &R,
    frame: &Frame,
    previous_positions: Option<&[f64]>,
    config: &RewardConfig,
) -> Result<f64>
where
    R: Robot + ?Sized,
{
    frame_reward(motion, robot, frame, previous_positions, config).map(|terms| terms.total(config))
}
