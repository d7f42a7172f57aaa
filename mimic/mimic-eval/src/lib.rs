//! Episode evaluation for motion imitation.
//!
//! This crate drives the per-frame stepping protocol against an external
//! physics simulation and aggregates frame rewards into one normalized
//! episode score:
//!
//! - [`EpisodeEvaluator`] - The stepping state machine
//!   (`NotStarted -> Running -> Done`)
//! - [`EpisodeState`] / [`StepResult`] - Lifecycle and per-step reporting
//! - [`EpisodeMetrics`] - Reward statistics collected along the way
//!
//! # Stepping Protocol
//!
//! Each step commands the robot's joints toward the current frame's targets,
//! advances the simulation by one timestep, computes the frame reward, and
//! accumulates it. The episode terminates when simulated time exceeds the
//! looped motion duration; the final score is the per-frame average over the
//! expected looped frame count, so episodes of different lengths compare on
//! a common scale.
//!
//! The evaluator is single-threaded and synchronous. Independent episodes
//! may run concurrently, each against its own robot and simulation; the only
//! shared object is the immutable [`Motion`](mimic_types::Motion).
//!
//! # Example
//!
//! ```ignore
//! use mimic_eval::EpisodeEvaluator;
//! use mimic_reward::RewardConfig;
//!
//! let mut evaluator = EpisodeEvaluator::new(&motion, RewardConfig::default()).with_loops(2);
//! let score = evaluator.run(&mut robot, &mut simulation)?;
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod episode;
mod metrics;

pub use episode::{EpisodeEvaluator, EpisodeState, StepResult};
pub use metrics::EpisodeMetrics;

// Re-export the shared error/result types
pub use mimic_types::{ImitationError, Result};
