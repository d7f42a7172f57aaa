//! Reward weighting configuration.

use mimic_types::{ImitationError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weights shaping the imitation reward.
///
/// The defaults document the intended balance: effector tracking dominates
/// (`we = 1`), stabilization lightly regularizes (`ws = 0.1`), and rotation
/// errors count far less than location errors (`wr = 0.005` versus
/// `wl = 1`).
///
/// # Example
///
/// ```
/// use mimic_reward::RewardConfig;
///
/// let config = RewardConfig::default();
/// assert_eq!(config.we, 1.0);
/// assert_eq!(config.ws, 0.1);
///
/// let sharp = RewardConfig::default().tracking_sharpness(10.0);
/// assert_eq!(sharp.ke, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewardConfig {
    /// Overall weight of the effector-tracking term in the aggregate.
    pub we: f64,
    /// Overall weight of the stabilization term in the aggregate.
    pub ws: f64,
    /// Sharpness of the tracking error-to-reward reshaping.
    pub ke: f64,
    /// Sharpness of the stabilization error-to-reward reshaping.
    pub ks: f64,
    /// Weight applied to every squared location error.
    pub wl: f64,
    /// Weight applied to every squared rotation error.
    pub wr: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            we: 1.0,
            ws: 0.1,
            ke: 1.0,
            ks: 1.0,
            wl: 1.0,
            wr: 0.005,
        }
    }
}

impl RewardConfig {
    /// Set the overall tracking-term weight (`we`).
    #[must_use]
    pub const fn tracking_weight(mut self, we: f64) -> Self {
        self.we = we;
        self
    }

    /// Set the overall stabilization-term weight (`ws`).
    #[must_use]
    pub const fn stabilization_weight(mut self, ws: f64) -> Self {
        self.ws = ws;
        self
    }

    /// Set the tracking reshaping sharpness (`ke`).
    #[must_use]
    pub const fn tracking_sharpness(mut self, ke: f64) -> Self {
        self.ke = ke;
        self
    }

    /// Set the stabilization reshaping sharpness (`ks`).
    #[must_use]
    pub const fn stabilization_sharpness(mut self, ks: f64) -> Self {
        self.ks = ks;
        self
    }

    /// Set the location-error weight (`wl`).
    #[must_use]
    pub const fn location_weight(mut self, wl: f64) -> Self {
        self.wl = wl;
        self
    }

    /// Set the rotation-error weight (`wr`).
    #[must_use]
    pub const fn rotation_weight(mut self, wr: f64) -> Self {
        self.wr = wr;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ImitationError::InvalidConfig`] if any weight is negative
    /// or non-finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("we", self.we),
            ("ws", self.ws),
            ("ke", self.ke),
            ("ks", self.ks),
            ("wl", self.wl),
            ("wr", self.wr),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ImitationError::invalid_config(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let config = RewardConfig::default();
        assert_eq!(config.we, 1.0);
        assert_eq!(config.ws, 0.1);
        assert_eq!(config.ke, 1.0);
        assert_eq!(config.ks, 1.0);
        assert_eq!(config.wl, 1.0);
        assert_eq!(config.wr, 0.005);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = RewardConfig::default()
            .tracking_weight(2.0)
            .stabilization_weight(0.0)
            .rotation_weight(0.01);
        assert_eq!(config.we, 2.0);
        assert_eq!(config.ws, 0.0);
        assert_eq!(config.wr, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_weights() {
        assert!(RewardConfig::default()
            .tracking_weight(-1.0)
            .validate()
            .is_err());
        assert!(RewardConfig::default()
            .stabilization_sharpness(f64::NAN)
            .validate()
            .is_err());
        assert!(RewardConfig::default()
            .location_weight(f64::INFINITY)
            .validate()
            .is_err());
    }
}
