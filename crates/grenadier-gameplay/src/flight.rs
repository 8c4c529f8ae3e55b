//! Ballistic flight state and tile collision probing.
//!
//! A [`Flight`] is a chain of ballistic segments. Each tick it advances along
//! the current segment, then samples up to two [`CollisionProbe`]s a small
//! trigger distance ahead of the new position in the direction of travel.
//! Probes that land in solid tiles reflect the velocity; the caller then
//! either starts a new segment from the reflected velocity or detonates.
//! The velocity reflected is the segment's launch velocity; gravity gained
//! since the segment started does not carry into the bounce.
//!
//! Both live projectiles and the trajectory preview step through this module,
//! which keeps the preview faithful to what the projectile will actually do.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::collaborators::TileOracle;
use crate::config::ProjectileConfig;
use crate::kinematics::{heading_of, launch_velocity, position_with_gravity, LaunchVector};

/// Side of the projectile a probe samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeSide {
    /// Moving left
    Left,
    /// Moving right
    Right,
    /// Moving up
    Top,
    /// Moving down
    Bottom,
}

impl ProbeSide {
    /// Whether the probe samples along the X axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// A point sampled ahead of the projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionProbe {
    /// Side being sampled
    pub side: ProbeSide,
    /// Sample point in world space
    pub point: DVec2,
}

/// At most one horizontal and one vertical probe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProbeSet {
    /// Left or right probe
    pub horizontal: Option<CollisionProbe>,
    /// Top or bottom probe
    pub vertical: Option<CollisionProbe>,
}

impl ProbeSet {
    /// Builds the probes for a projectile at `position` that just moved by `movement`.
    #[must_use]
    pub fn around(position: DVec2, movement: DVec2, offset: f64) -> Self {
        let horizontal = if movement.x < 0.0 {
            Some(CollisionProbe {
                side: ProbeSide::Left,
                point: DVec2::new(position.x - offset, position.y),
            })
        } else if movement.x > 0.0 {
            Some(CollisionProbe {
                side: ProbeSide::Right,
                point: DVec2::new(position.x + offset, position.y),
            })
        } else {
            None
        };

        let vertical = if movement.y > 0.0 {
            Some(CollisionProbe {
                side: ProbeSide::Bottom,
                point: DVec2::new(position.x, position.y + offset),
            })
        } else if movement.y < 0.0 {
            Some(CollisionProbe {
                side: ProbeSide::Top,
                point: DVec2::new(position.x, position.y - offset),
            })
        } else {
            None
        };

        Self {
            horizontal,
            vertical,
        }
    }

    /// Probes in evaluation order: horizontal first.
    pub fn iter(&self) -> impl Iterator<Item = &CollisionProbe> {
        self.horizontal.iter().chain(self.vertical.iter())
    }

    /// Whether no probe was produced (the projectile did not move).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

/// Result of probes hitting solid tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Impact {
    /// Sides that hit, in evaluation order
    pub sides: Vec<ProbeSide>,
    /// First probe point found inside a tile
    pub contact: DVec2,
    /// Velocity after reflection
    pub velocity: DVec2,
}

/// Outcome of one integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Displacement during the step
    pub movement: DVec2,
    /// Tile impact, if any probe hit
    pub impact: Option<Impact>,
}

/// Kinematic state of one projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Where the current segment started
    pub start: DVec2,
    /// Current position
    pub position: DVec2,
    /// Position before the last step
    pub previous: DVec2,
    /// Launch angle of the current segment (radians, `[0, 2π)`)
    pub angle: f64,
    /// Launch speed of the current segment
    pub force: f64,
    /// Seconds since the current segment started
    pub elapsed: f64,
}

impl Flight {
    /// Starts a flight at `origin`.
    #[must_use]
    pub fn launch(origin: DVec2, launch: LaunchVector) -> Self {
        Self {
            start: origin,
            position: origin,
            previous: origin,
            angle: launch.angle,
            force: launch.force,
            elapsed: 0.0,
        }
    }

    /// Velocity the current segment was launched with.
    #[must_use]
    pub fn velocity(&self) -> DVec2 {
        launch_velocity(self.angle, self.force)
    }

    /// Moves `dt` seconds along the current segment; returns the displacement.
    pub fn advance(&mut self, dt: f64, mass: f64, gravity: f64) -> DVec2 {
        self.elapsed += dt;
        self.previous = self.position;
        self.position =
            position_with_gravity(self.start, self.angle, self.force, mass, gravity, self.elapsed);
        self.position - self.previous
    }

    /// Advances one tick and resolves tile probes.
    ///
    /// On impact the position may be nudged off the floor, but the segment is
    /// left untouched; call [`Flight::rebound`] to continue with the
    /// reflected velocity.
    pub fn step<O>(&mut self, dt: f64, mass: f64, tiles: &O, config: &ProjectileConfig) -> Step
    where
        O: TileOracle + ?Sized,
    {
        let velocity = self.velocity();
        let movement = self.advance(dt, mass, config.gravity);
        let probes = ProbeSet::around(self.position, movement, config.trigger_offset);
        let impact = self.resolve(&probes, movement, velocity, tiles, config);
        Step { movement, impact }
    }

    /// Reflects `velocity` off every probe that sits in a solid tile.
    fn resolve<O>(
        &mut self,
        probes: &ProbeSet,
        movement: DVec2,
        mut velocity: DVec2,
        tiles: &O,
        config: &ProjectileConfig,
    ) -> Option<Impact>
    where
        O: TileOracle + ?Sized,
    {
        let mut sides = Vec::new();
        let mut contact = None;

        for probe in probes.iter() {
            if !tiles.is_solid(probe.point) {
                continue;
            }
            contact.get_or_insert(probe.point);
            sides.push(probe.side);

            match probe.side {
                ProbeSide::Left => velocity.x = velocity.x.abs(),
                ProbeSide::Right => velocity.x = -velocity.x.abs(),
                ProbeSide::Top => velocity.y = velocity.y.abs(),
                ProbeSide::Bottom => {
                    velocity.y = -velocity.y.abs();
                    self.position.y -= config.floor_nudge;
                },
            }
            // grazing a wall on the way down must not carry the projectile into the floor
            if probe.side.is_horizontal() && movement.y > 0.0 {
                velocity.y = -velocity.y.abs();
            }
        }

        contact.map(|contact| Impact {
            sides,
            contact,
            velocity,
        })
    }

    /// Starts a new segment from the current position.
    pub fn rebound(&mut self, velocity: DVec2, restitution: f64) {
        self.start = self.position;
        self.force *= restitution;
        self.elapsed = 0.0;
        self.angle = heading_of(velocity);
    }
}
