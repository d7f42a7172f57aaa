//! Target selection: resolving motion targets into world coordinates.

use mimic_types::{FrameReference, Pose};
use nalgebra::{Point3, UnitQuaternion};

/// Resolve a location target into world coordinates.
///
/// A [`FrameReference::World`] target is returned unchanged; a
/// [`FrameReference::RootRelative`] target is rotated and translated by the
/// robot's current root pose.
///
/// # Example
///
/// ```
/// use mimic_reward::resolve_location;
/// use mimic_types::{FrameReference, Pose};
/// use nalgebra::Point3;
///
/// let target = Point3::new(0.3, 0.0, 0.0);
/// let root = Pose::from_position(Point3::new(0.0, 0.0, 1.0));
///
/// // World targets ignore the root pose entirely.
/// assert_eq!(resolve_location(FrameReference::World, target, &root), target);
///
/// // Root-relative targets ride along with the root.
/// let resolved = resolve_location(FrameReference::RootRelative, target, &root);
/// assert_eq!(resolved, Point3::new(0.3, 0.0, 1.0));
/// ```
#[must_use]
pub fn resolve_location(
    reference: FrameReference,
    target: Point3<f64>,
    root: &Pose,
) -> Point3<f64> {
    match reference {
        FrameReference::World => target,
        FrameReference::RootRelative => root.transform_point(&target),
    }
}

/// Resolve an orientation target into world coordinates.
///
/// A [`FrameReference::World`] target is returned unchanged; a
/// [`FrameReference::RootRelative`] target is composed with the root
/// rotation.
#[must_use]
pub fn resolve_rotation(
    reference: FrameReference,
    target: UnitQuaternion<f64>,
    root: &Pose,
) -> UnitQuaternion<f64> {
    match reference {
        FrameReference::World => target,
        FrameReference::RootRelative => root.transform_rotation(&target),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_world_location_ignores_root() {
        let target = Point3::new(1.0, 2.0, 3.0);
        let root = Pose::from_position_rotation(
            Point3::new(-5.0, 0.0, 2.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.3),
        );
        assert_eq!(resolve_location(FrameReference::World, target, &root), target);
    }

    #[test]
    fn test_world_rotation_ignores_root() {
        let target = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.7);
        let root = Pose::from_position_rotation(
            Point3::new(1.0, 1.0, 1.0),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -0.4),
        );
        assert_eq!(resolve_rotation(FrameReference::World, target, &root), target);
    }

    #[test]
    fn test_root_relative_with_identity_root_is_raw() {
        let root = Pose::identity();

        let location = Point3::new(0.2, -0.1, 0.9);
        assert_eq!(
            resolve_location(FrameReference::RootRelative, location, &root),
            location
        );

        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5);
        let resolved = resolve_rotation(FrameReference::RootRelative, rotation, &root);
        assert_relative_eq!(resolved.angle_to(&rotation), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_root_relative_composition() {
        // Root at (1, 0, 0), rotated 90 degrees around Z: a target 1m ahead
        // of the root lands at (1, 1, 0) in world coordinates.
        let root = Pose::from_position_rotation(
            Point3::new(1.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2),
        );
        let resolved =
            resolve_location(FrameReference::RootRelative, Point3::new(1.0, 0.0, 0.0), &root);
        assert_relative_eq!(resolved.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(resolved.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(resolved.z, 0.0, epsilon = 1e-12);

        let quarter =
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        let resolved = resolve_rotation(FrameReference::RootRelative, quarter, &root);
        let half = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::PI);
        assert_relative_eq!(resolved.angle_to(&half), 0.0, epsilon = 1e-12);
    }
}
