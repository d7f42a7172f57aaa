//! Reward computation for motion imitation.
//!
//! This crate turns pose-tracking error into the scalar reward an RL
//! optimizer maximizes:
//!
//! # Reward Terms
//!
//! - [`tracking_reward`] - Weighted squared effector pose error (location
//!   distance plus intrinsic rotation angle), reshaped into a bounded reward
//! - [`stabilization_reward`] - Frame-to-frame joint-target change penalty,
//!   discouraging jittery reference playback
//! - [`frame_reward`] / [`total_reward`] - Both terms, and their weighted
//!   aggregate
//!
//! # Target Selection
//!
//! - [`resolve_location`] / [`resolve_rotation`] - Resolve a motion's
//!   declared target into world coordinates given the robot's root pose
//!
//! # Reshaping
//!
//! Both terms reshape mean squared error `x >= 0` into `1 - exp(x)`: zero
//! error maps to reward `0`, any error to a negative reward, and an error
//! large enough to overflow the exponential saturates to exactly negative
//! infinity instead of failing. See [`RewardConfig`] for the six weights
//! that shape the terms.
//!
//! # Example
//!
//! ```
//! use mimic_reward::{stabilization_reward, RewardConfig};
//!
//! let config = RewardConfig::default();
//!
//! // No previous frame: no penalty.
//! let reward = stabilization_reward(&[0.1, 0.2], None, &config).expect("valid shapes");
//! assert_eq!(reward, 0.0);
//!
//! // Identical frames: still no penalty.
//! let reward =
//!     stabilization_reward(&[0.1, 0.2], Some(&[0.1, 0.2]), &config).expect("valid shapes");
//! assert_eq!(reward, 0.0);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod reward;
mod target;

pub use config::RewardConfig;
pub use reward::{
    frame_reward, stabilization_reward, total_reward, tracking_reward, RewardTerms,
};
pub use target::{resolve_location, resolve_rotation};

// Re-export the shared error/result types
pub use mimic_types::{ImitationError, Result};
