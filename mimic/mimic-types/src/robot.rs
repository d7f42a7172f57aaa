//! Capability contract for an externally simulated robot.

use crate::{NameRegistry, Pose, Result};

/// An articulated robot living inside an external physics simulation.
///
/// The evaluator reads link poses immediately after each simulation step and
/// commands joints toward the reference motion's targets; it never owns or
/// integrates the robot state itself.
pub trait Robot {
    /// Name of the root link whose pose defines root-relative targets.
    fn root_link(&self) -> &str;

    /// Current world-frame pose of a link, or `None` if the robot does not
    /// know the link.
    fn link_pose(&self, link: &str) -> Option<Pose>;

    /// Command the robot's joints toward target positions.
    ///
    /// `targets` is dense, one entry per `joints` registry name. How the
    /// targets are actuated (PD control, position servo, ...) is the robot's
    /// concern.
    ///
    /// # Errors
    ///
    /// Implementations report actuation failures as
    /// [`ImitationError::Actuation`](crate::ImitationError::Actuation);
    /// failures end the episode.
    fn apply_joint_targets(&mut self, joints: &NameRegistry, targets: &[f64]) -> Result<()>;

    /// Current world-frame pose of the root link.
    fn root_pose(&self) -> Option<Pose> {
        self.link_pose(self.root_link())
    }
}
