//! Core types for motion-imitation scoring.
//!
//! This crate provides the foundational types for scoring how well a
//! simulated articulated robot imitates a reference motion clip:
//!
//! - [`Motion`] - An immutable, validated reference clip: keyframed joint
//!   targets plus effector targets with per-effector frames and weights
//! - [`Frame`] - One point in the motion (dense joint and effector targets)
//! - [`Pose`] - Position and orientation of a link in world coordinates
//! - [`Robot`] / [`Simulation`] - Capability contracts the evaluator
//!   requires from an external robot and physics simulation
//! - [`ImitationError`] - Error type shared across the mimic crates
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no reward logic, no physics, no
//! stepping. They're the common language between:
//!
//! - Reward computation (mimic-reward)
//! - Episode evaluation (mimic-eval)
//! - External physics engines and robots (behind the [`Robot`] and
//!   [`Simulation`] traits)
//!
//! # Registries and dense storage
//!
//! Joint and effector sets are fixed per motion. Names are interned once in
//! a [`NameRegistry`]; every [`Frame`] then stores dense arrays indexed by
//! the registry id. Key-set agreement is validated once in [`Motion::new`],
//! not on every evaluation step.
//!
//! # Example
//!
//! ```
//! use mimic_types::{EffectorTable, Frame, Keyframe, Motion, NameRegistry};
//!
//! let joints = NameRegistry::from_names(["hip", "knee"]).expect("unique names");
//! let keyframes = vec![
//!     Keyframe::new(0.0, Frame::joints_only(vec![0.0, 0.0])),
//!     Keyframe::new(1.0, Frame::joints_only(vec![0.5, 0.2])),
//! ];
//! let motion = Motion::new(joints, EffectorTable::empty(), keyframes).expect("valid motion");
//!
//! assert_eq!(motion.duration(), 1.0);
//! assert_eq!(motion.frame_at(0.4).joint_targets, vec![0.0, 0.0]);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod effector;
mod error;
mod frame;
mod motion;
mod pose;
mod registry;
mod robot;
mod simulation;

pub use effector::{EffectorReference, EffectorTarget, EffectorWeight, FrameReference};
pub use error::ImitationError;
pub use frame::{Frame, Keyframe};
pub use motion::{EffectorEntry, EffectorTable, FrameSampler, Motion};
pub use pose::Pose;
pub use registry::NameRegistry;
pub use robot::Robot;
pub use simulation::Simulation;

// Re-export math types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Result type for motion-imitation operations.
pub type Result<T> = std::result::Result<T, ImitationError>;
