//! Ballistic kinematics for projectiles.
//!
//! Positions are closed-form functions of the time elapsed since the start of
//! the current ballistic segment, not integrated step by step:
//!
//! ```text
//! x = start.x + force * cos(angle) * t
//! y = start.y - force * sin(angle) * t + 0.5 * G * mass * t^2
//! ```
//!
//! Angles are measured counter-clockwise from +X with +Y pointing down on
//! screen, so an angle of `PI / 2` launches straight up.
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use grenadier_gameplay::kinematics::{position, LaunchVector};
//!
//! let launch = LaunchVector::aim(DVec2::new(100.0, 100.0), DVec2::new(200.0, 100.0), 150.0);
//! assert_eq!(launch.angle, 0.0);
//! assert_eq!(launch.force, 100.0);
//!
//! let p = position(DVec2::new(100.0, 100.0), launch.angle, launch.force, 20.0, 1.0);
//! assert!((p.x - 200.0).abs() < 1e-9);
//! assert!((p.y - 198.0).abs() < 1e-9);
//! ```

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Gravitational constant, scaled per kind by its mass.
pub const GRAVITY: f64 = 9.8;

/// Position at time `t` of a segment launched from `start`.
#[must_use]
pub fn position(start: DVec2, angle: f64, force: f64, mass: f64, t: f64) -> DVec2 {
    position_with_gravity(start, angle, force, mass, GRAVITY, t)
}

/// [`position`] with an explicit gravity constant.
#[must_use]
pub fn position_with_gravity(
    start: DVec2,
    angle: f64,
    force: f64,
    mass: f64,
    gravity: f64,
    t: f64,
) -> DVec2 {
    let launch = launch_velocity(angle, force);
    DVec2::new(
        start.x + launch.x * t,
        start.y + launch.y * t + 0.5 * gravity * mass * t * t,
    )
}

/// Velocity at the start of a segment.
#[must_use]
pub fn launch_velocity(angle: f64, force: f64) -> DVec2 {
    DVec2::new(force * angle.cos(), -force * angle.sin())
}

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to TAU; -0.0 becomes 0.0
    if wrapped >= TAU || wrapped == 0.0 || wrapped.is_nan() {
        0.0
    } else {
        wrapped
    }
}

/// Screen-space direction of a vector as an angle in `[0, 2π)`.
///
/// The zero vector has heading 0.
#[must_use]
pub fn heading_of(vector: DVec2) -> f64 {
    normalize_angle((-vector.y).atan2(vector.x))
}

/// Launch angle and force derived from an aim gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LaunchVector {
    /// Launch angle in radians, always in `[0, 2π)`
    pub angle: f64,
    /// Launch speed, always in `[0, max_force]`
    pub force: f64,
}

impl LaunchVector {
    /// Creates a launch vector, normalizing the angle and clamping force at zero.
    #[must_use]
    pub fn new(angle: f64, force: f64) -> Self {
        Self {
            angle: normalize_angle(angle),
            force: force.max(0.0),
        }
    }

    /// Derives the launch from the aim line `source -> target`.
    ///
    /// A zero-length aim produces a stationary launch (angle 0, force 0).
    #[must_use]
    pub fn aim(source: DVec2, target: DVec2, max_force: f64) -> Self {
        let delta = target - source;
        let length = delta.length();
        if length <= 0.0 || length.is_nan() {
            return Self::default();
        }
        Self {
            angle: heading_of(delta),
            force: length.min(max_force.max(0.0)),
        }
    }

    /// Velocity at launch.
    #[must_use]
    pub fn velocity(&self) -> DVec2 {
        launch_velocity(self.angle, self.force)
    }
}
