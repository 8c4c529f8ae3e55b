//! Projectile tuning parameters.

use serde::{Deserialize, Serialize};

use crate::kinematics::GRAVITY;

/// Life timers at or below this count as expired.
pub const LIFE_EPSILON: f64 = 1e-6;

/// Projectile physics and effect tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Gravitational constant (scaled by each kind's mass)
    pub gravity: f64,
    /// Distance ahead of the projectile at which collision probes sample
    pub trigger_offset: f64,
    /// Force retained after a bounce (0-1)
    pub restitution: f64,
    /// Upward nudge applied after a floor bounce, in world units
    pub floor_nudge: f64,
    /// Minimum post-bounce force that plays a bounce sound
    pub bounce_sound_min_force: f64,
    /// Grenade spin in degrees per second per unit of force
    pub spin_per_force: f64,
    /// Seconds of simulated flight between preview samples
    pub preview_sample_interval: f64,
    /// Slowest debris particle speed
    pub debris_speed_min: f64,
    /// Fastest debris particle speed
    pub debris_speed_max: f64,
    /// Seed for debris randomization
    pub seed: u64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            trigger_offset: 3.0,
            restitution: 0.6,
            floor_nudge: 1.0,
            bounce_sound_min_force: 20.0,
            spin_per_force: 4.0,
            preview_sample_interval: 0.2,
            debris_speed_min: 30.0,
            debris_speed_max: 160.0,
            seed: 0x6E_AD_E5,
        }
    }
}

impl ProjectileConfig {
    /// Clamp values to sensible ranges.
    pub fn validate(&mut self) {
        self.gravity = self.gravity.max(0.0);
        self.trigger_offset = self.trigger_offset.clamp(0.1, 32.0);
        self.restitution = self.restitution.clamp(0.0, 1.0);
        self.floor_nudge = self.floor_nudge.clamp(0.0, 8.0);
        self.bounce_sound_min_force = self.bounce_sound_min_force.max(0.0);
        self.preview_sample_interval = self.preview_sample_interval.clamp(0.01, 1.0);
        self.debris_speed_min = self.debris_speed_min.max(0.0);
        self.debris_speed_max = self.debris_speed_max.max(self.debris_speed_min);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectileConfig::default();
        assert_eq!(config.gravity, 9.8);
        assert_eq!(config.restitution, 0.6);
        assert_eq!(config.trigger_offset, 3.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ProjectileConfig {
            restitution: 1.5,
            trigger_offset: 0.0,
            debris_speed_min: 50.0,
            debris_speed_max: 10.0,
            ..ProjectileConfig::default()
        };

        config.validate();

        assert_eq!(config.restitution, 1.0);
        assert!((config.trigger_offset - 0.1).abs() < 1e-12);
        assert_eq!(config.debris_speed_max, 50.0);
    }
}
