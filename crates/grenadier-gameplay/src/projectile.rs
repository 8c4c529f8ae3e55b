//! Live projectiles.
//!
//! A projectile owns its [`Flight`] exclusively and advances it once per tick:
//!
//! 1. grenades tick their spin and fuse; an expired fuse detonates in place
//! 2. the flight advances and probes the tiles ahead of it
//! 3. on impact, bouncing kinds start a new, weaker segment from the
//!    reflected velocity; other kinds detonate and embed
//! 4. the cosmetic heading follows the movement
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use grenadier_gameplay::prelude::*;
//!
//! let mut tiles = MockTiles::new(16.0);
//! let mut game = RecordingGame::default();
//! let mut effects = RecordingEffects::default();
//! let mut rng = fastrand::Rng::with_seed(7);
//! let config = ProjectileConfig::default();
//!
//! let mut grenade = Projectile::aimed(
//!     ProjectileId::from_raw(1),
//!     ProjectileKind::Grenade,
//!     DVec2::new(100.0, 100.0),
//!     DVec2::new(200.0, 100.0),
//! );
//! let mut world = Collaborators {
//!     tiles: &mut tiles,
//!     game: &mut game,
//!     effects: &mut effects,
//!     rng: &mut rng,
//! };
//! let outcome = grenade.update(1.0 / 60.0, &mut world, &config);
//! assert_eq!(outcome, TickOutcome::Flying);
//! ```

use glam::DVec2;
use grenadier_common::ProjectileId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collaborators::SoundId;
use crate::config::{ProjectileConfig, LIFE_EPSILON};
use crate::detonation::{detonate, Collaborators};
use crate::flight::Flight;
use crate::kind::ProjectileKind;
use crate::kinematics::{heading_of, LaunchVector};

/// Lifecycle of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum FlightState {
    /// In the air (or rolling).
    #[default]
    Flying = 0,
    /// Exploded; awaiting removal.
    Detonated = 1,
    /// Exploded on contact with a tile; awaiting removal.
    Embedded = 2,
}

/// What happened to a projectile during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Still flying, no impact.
    Flying,
    /// Bounced off a tile and started a new segment.
    Bounced {
        /// Force of the new segment
        force: f64,
    },
    /// Fuse ran out; the projectile exploded.
    Detonated {
        /// Blast center
        position: DVec2,
    },
    /// Hit a tile and exploded.
    Embedded {
        /// Blast center
        position: DVec2,
    },
    /// Already finished on an earlier tick.
    Inert,
}

impl TickOutcome {
    /// Whether the owning collection should drop the projectile.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(
            self,
            Self::Detonated { .. } | Self::Embedded { .. } | Self::Inert
        )
    }
}

/// A grenade or rocket in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Identifier within the owning collection
    pub id: ProjectileId,
    /// Kind
    pub kind: ProjectileKind,
    /// Kinematic state
    pub flight: Flight,
    /// Seconds left before the fuse detonates (grenades)
    pub life_timer: Option<f64>,
    /// Sprite rotation in degrees
    pub rotation: f64,
    /// Signed tumble strength; rotation advances `spin * spin_per_force` degrees per second
    pub spin: f64,
    /// Direction of travel in degrees
    pub heading: f64,
    /// Lifecycle state
    pub state: FlightState,
}

impl Projectile {
    /// Creates a projectile launched from `origin`.
    #[must_use]
    pub fn new(
        id: ProjectileId,
        kind: ProjectileKind,
        origin: DVec2,
        launch: LaunchVector,
    ) -> Self {
        let heading = launch.angle.to_degrees();
        Self {
            id,
            kind,
            flight: Flight::launch(origin, launch),
            life_timer: kind.life_span(),
            rotation: if kind.spins() { 0.0 } else { heading },
            spin: 0.0,
            heading,
            state: FlightState::Flying,
        }
    }

    /// Creates a projectile aimed from `source` towards `target`.
    #[must_use]
    pub fn aimed(id: ProjectileId, kind: ProjectileKind, source: DVec2, target: DVec2) -> Self {
        let launch = LaunchVector::aim(source, target, kind.max_force());
        let mut projectile = Self::new(id, kind, source, launch);
        projectile.spin = projectile.spin_for(launch.force, launch.velocity().x);
        projectile
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> DVec2 {
        self.flight.position
    }

    /// Launch speed of the current segment.
    #[must_use]
    pub fn force(&self) -> f64 {
        self.flight.force
    }

    /// Whether the projectile is still flying.
    #[must_use]
    pub const fn is_flying(&self) -> bool {
        matches!(self.state, FlightState::Flying)
    }

    fn spin_for(&self, force: f64, horizontal: f64) -> f64 {
        if !self.kind.spins() {
            return 0.0;
        }
        // counter-clockwise when rolling left
        if horizontal < 0.0 {
            force
        } else {
            -force
        }
    }

    /// Advances the projectile by `dt` seconds.
    pub fn update(
        &mut self,
        dt: f64,
        world: &mut Collaborators<'_>,
        config: &ProjectileConfig,
    ) -> TickOutcome {
        if !self.is_flying() {
            return TickOutcome::Inert;
        }

        if self.kind.spins() {
            self.rotation = wrap_degrees(self.rotation + self.spin * config.spin_per_force * dt);
        }

        if let Some(timer) = self.life_timer.as_mut() {
            *timer -= dt;
            if *timer <= LIFE_EPSILON {
                let position = self.flight.position;
                self.state = FlightState::Detonated;
                detonate(self.kind, position, world, config);
                return TickOutcome::Detonated { position };
            }
        }

        let step = self
            .flight
            .step(dt, self.kind.mass(), &*world.tiles, config);

        let outcome = match step.impact {
            None => TickOutcome::Flying,
            Some(impact) if self.kind.bounces() => {
                self.flight.rebound(impact.velocity, config.restitution);
                let force = self.flight.force;
                self.spin = self.spin_for(force, impact.velocity.x);
                if force >= config.bounce_sound_min_force {
                    world.effects.play_sound(SoundId::GrenadeBounce);
                }
                debug!(
                    "{} {} bounced off {:?}, force now {force:.1}",
                    self.kind, self.id, impact.sides
                );
                TickOutcome::Bounced { force }
            },
            Some(_) => {
                let position = self.flight.position;
                self.state = FlightState::Embedded;
                detonate(self.kind, position, world, config);
                return TickOutcome::Embedded { position };
            },
        };

        if step.movement != DVec2::ZERO {
            self.heading = heading_of(step.movement).to_degrees();
        }
        if !self.kind.spins() {
            self.rotation = self.heading;
        }

        outcome
    }
}

/// Wraps degrees into `[0, 360)`.
fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockTiles, RecordingEffects, RecordingGame};

    const DT: f64 = 1.0 / 60.0;

    struct Harness {
        tiles: MockTiles,
        game: RecordingGame,
        effects: RecordingEffects,
        rng: fastrand::Rng,
        config: ProjectileConfig,
    }

    impl Harness {
        fn new(tiles: MockTiles) -> Self {
            Self {
                tiles,
                game: RecordingGame::default(),
                effects: RecordingEffects::default(),
                rng: fastrand::Rng::with_seed(3),
                config: ProjectileConfig::default(),
            }
        }

        fn tick(&mut self, projectile: &mut Projectile) -> TickOutcome {
            let mut world = Collaborators {
                tiles: &mut self.tiles,
                game: &mut self.game,
                effects: &mut self.effects,
                rng: &mut self.rng,
            };
            projectile.update(DT, &mut world, &self.config)
        }
    }

    fn grenade(source: DVec2, target: DVec2) -> Projectile {
        Projectile::aimed(ProjectileId::from_raw(1), ProjectileKind::Grenade, source, target)
    }

    fn rocket(source: DVec2, target: DVec2) -> Projectile {
        Projectile::aimed(ProjectileId::from_raw(2), ProjectileKind::Rocket, source, target)
    }

    #[test]
    fn test_aimed_projectile() {
        let g = grenade(DVec2::new(100.0, 100.0), DVec2::new(200.0, 100.0));
        assert_eq!(g.flight.angle, 0.0);
        assert_eq!(g.force(), 100.0);
        assert_eq!(g.position(), DVec2::new(100.0, 100.0));
        assert_eq!(g.life_timer, Some(5.0));
        assert!(g.is_flying());

        let r = rocket(DVec2::new(0.0, 0.0), DVec2::new(1000.0, 0.0));
        assert_eq!(r.force(), 300.0);
        assert_eq!(r.life_timer, None);
    }

    #[test]
    fn test_stationary_grenade_falls_straight_down() {
        let mut h = Harness::new(MockTiles::new(16.0));
        let start = DVec2::new(100.0, 100.0);
        let mut g = grenade(start, start);

        for _ in 0..30 {
            assert_eq!(h.tick(&mut g), TickOutcome::Flying);
        }
        let t = 30.0 * DT;
        let expected = start + DVec2::new(0.0, 0.5 * 9.8 * 20.0 * t * t);
        assert!((g.position() - expected).length() < 1e-6);
    }

    #[test]
    fn test_grenade_fuse_detonates_once() {
        let mut h = Harness::new(MockTiles::new(16.0));
        let mut g = grenade(DVec2::new(100.0, 100.0), DVec2::new(150.0, 50.0));

        for tick in 1..300 {
            assert_eq!(h.tick(&mut g), TickOutcome::Flying, "tick {tick}");
        }
        let outcome = h.tick(&mut g);
        assert!(matches!(outcome, TickOutcome::Detonated { .. }));
        assert_eq!(g.state, FlightState::Detonated);

        assert_eq!(h.tick(&mut g), TickOutcome::Inert);
        assert_eq!(h.game.damage_calls.len(), 1);
        assert_eq!(h.game.turn_changes, 1);
        assert_eq!(h.effects.particles.len(), 100);
        assert_eq!(h.tiles.removals().len(), 1);
    }

    #[test]
    fn test_grenade_bounces_off_floor() {
        let mut tiles = MockTiles::new(16.0);
        tiles.set_ground_level(10);
        let mut h = Harness::new(tiles);
        let mut g = grenade(DVec2::new(100.0, 100.0), DVec2::new(200.0, 100.0));

        let mut bounce = None;
        for _ in 0..60 {
            if let TickOutcome::Bounced { force } = h.tick(&mut g) {
                bounce = Some(force);
                break;
            }
        }

        let force = bounce.expect("grenade reaches the floor within a second");
        assert!((force - 60.0).abs() < 1e-9);
        // a flat throw keeps skimming flat
        assert_eq!(g.flight.angle, 0.0);
        assert_eq!(g.flight.elapsed, 0.0);
        assert_eq!(g.flight.start, g.position());
        assert!(g.position().y < 160.0 - 3.0 + 1e-9);
        assert_eq!(h.effects.sounds, vec![SoundId::GrenadeBounce]);
        assert!(g.is_flying());
    }

    #[test]
    fn test_soft_bounce_is_silent() {
        let mut tiles = MockTiles::new(16.0);
        tiles.set_ground_level(10);
        let mut h = Harness::new(tiles);
        let mut g = grenade(DVec2::new(100.0, 100.0), DVec2::new(125.0, 100.0));

        let mut bounce = None;
        for _ in 0..60 {
            if let TickOutcome::Bounced { force } = h.tick(&mut g) {
                bounce = Some(force);
                break;
            }
        }

        let force = bounce.expect("grenade reaches the floor within a second");
        assert!(force < h.config.bounce_sound_min_force);
        assert!((force - 15.0).abs() < 1e-9);
        assert!(h.effects.sounds.is_empty());
    }

    #[test]
    fn test_bounce_restitution_compounds() {
        let mut tiles = MockTiles::new(16.0);
        tiles.set_ground_level(10);
        let mut h = Harness::new(tiles);
        let mut g = grenade(DVec2::new(100.0, 100.0), DVec2::new(220.0, 100.0));
        let max_force = ProjectileKind::Grenade.max_force();

        let mut forces = vec![g.force()];
        for _ in 0..240 {
            if let TickOutcome::Bounced { force } = h.tick(&mut g) {
                forces.push(force);
            }
        }

        assert!(forces.len() >= 3, "expected several bounces, got {forces:?}");
        for pair in forces.windows(2) {
            assert!((pair[1] - 0.6 * pair[0]).abs() < 1e-9);
        }
        for (k, force) in forces.iter().enumerate().skip(1) {
            assert!(*force < max_force * 0.6f64.powi(k as i32));
        }
    }

    #[test]
    fn test_rocket_embeds_on_contact() {
        let mut tiles = MockTiles::new(16.0);
        tiles.set_ground_level(10);
        let mut h = Harness::new(tiles);
        let mut r = rocket(DVec2::new(100.0, 100.0), DVec2::new(200.0, 100.0));

        let mut embedded = 0;
        for _ in 0..120 {
            match h.tick(&mut r) {
                TickOutcome::Embedded { .. } => embedded += 1,
                TickOutcome::Bounced { .. } => panic!("rockets never bounce"),
                _ => {},
            }
        }

        assert_eq!(embedded, 1);
        assert_eq!(r.state, FlightState::Embedded);
        assert_eq!(h.game.damage_calls.len(), 1);
        assert_eq!(h.game.damage_calls[0].1, 3.0);
        assert_eq!(h.tiles.removals()[0].1, 2.0);
        assert_eq!(h.game.turn_changes, 0);
    }

    #[test]
    fn test_rocket_rotation_follows_heading() {
        let mut h = Harness::new(MockTiles::new(16.0));
        let mut r = rocket(DVec2::new(0.0, 0.0), DVec2::new(100.0, -100.0));

        h.tick(&mut r);
        assert_eq!(r.rotation, r.heading);
        // launched up and to the right, still climbing
        assert!(r.heading > 0.0 && r.heading < 90.0);
    }

    #[test]
    fn test_grenade_spins() {
        let mut h = Harness::new(MockTiles::new(16.0));
        let mut g = grenade(DVec2::new(0.0, 0.0), DVec2::new(100.0, 0.0));

        h.tick(&mut g);
        assert!(g.spin != 0.0);
        assert!(g.rotation > 0.0 && g.rotation < 360.0);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(-0.0), 0.0);
    }
}
