//! Interfaces to the systems projectiles talk to.
//!
//! Projectiles never own the tile grid, the players or the effect pipeline.
//! They reach them through these traits:
//! - [`TileOracle`]: read-only tile queries (collision probes, previews)
//! - [`TileWorld`]: tile queries plus terrain destruction
//! - [`GameHooks`]: damage and turn flow
//! - [`EffectSink`]: particles, screen shake and sounds
//!
//! Recording implementations are provided for tests and tools.

use std::collections::HashSet;

use glam::DVec2;
use grenadier_common::{TileCoord, WorldRect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a tile query can report.
///
/// Projectile code treats every error as "no tile here".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileQueryError {
    /// The point is outside the tile grid
    #[error("point ({x}, {y}) is outside the tile grid")]
    OutOfBounds {
        /// World X
        x: f64,
        /// World Y
        y: f64,
    },
}

/// Distance between samples of the default segment walk, in world units.
pub const SEGMENT_SAMPLE_STEP: f64 = 1.0;

/// Bisection rounds used to refine a segment hit.
const SEGMENT_REFINE_ROUNDS: u32 = 12;

/// Read-only view of the tile grid.
pub trait TileOracle {
    /// Checks if the point lies inside a solid tile.
    fn solid_at(&self, point: DVec2) -> Result<bool, TileQueryError>;

    /// Bounds of the playable world, if the grid has any.
    fn bounds(&self) -> Option<WorldRect> {
        None
    }

    /// Fail-open solidity check: query errors count as empty space.
    fn is_solid(&self, point: DVec2) -> bool {
        match self.solid_at(point) {
            Ok(solid) => solid,
            Err(err) => {
                tracing::trace!("tile query failed open: {err}");
                false
            },
        }
    }

    /// First point on `from -> to` that touches a solid tile.
    ///
    /// The default walks the segment in [`SEGMENT_SAMPLE_STEP`] increments and
    /// bisects the first free/solid pair, so the returned point sits on the
    /// tile boundary to well under a world unit.
    fn first_touch_on_segment(&self, from: DVec2, to: DVec2) -> Option<DVec2> {
        if self.is_solid(from) {
            return Some(from);
        }

        let length = from.distance(to);
        let steps = (length / SEGMENT_SAMPLE_STEP).ceil().max(1.0) as u32;
        let mut free = from;

        for i in 1..=steps {
            let sample = from.lerp(to, f64::from(i) / f64::from(steps));
            if self.is_solid(sample) {
                let mut solid = sample;
                for _ in 0..SEGMENT_REFINE_ROUNDS {
                    let mid = free.lerp(solid, 0.5);
                    if self.is_solid(mid) {
                        solid = mid;
                    } else {
                        free = mid;
                    }
                }
                return Some(solid);
            }
            free = sample;
        }
        None
    }
}

/// Tile grid that projectiles may destroy.
pub trait TileWorld: TileOracle {
    /// Removes the tiles within `radius` tiles of `point`.
    fn remove_tiles_around(&mut self, point: DVec2, radius: f64);
}

/// Game-flow callbacks.
pub trait GameHooks {
    /// Damages players within `radius` tiles of `point`.
    fn damage_player(&mut self, point: DVec2, radius: f64, damage: f64);

    /// Signals that the current turn (or active player) should change.
    fn change_turn(&mut self);
}

/// Cosmetic particle categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Explosion debris
    Debris,
}

/// Sounds projectiles can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    /// Grenade hitting a tile hard enough to be heard
    GrenadeBounce,
    /// Grenade explosion
    Explosion,
}

/// Effects pipeline: particles, camera shake, audio.
pub trait EffectSink {
    /// Spawns one cosmetic particle.
    fn spawn_particle(&mut self, kind: ParticleKind, position: DVec2, velocity: DVec2);

    /// Shakes the screen.
    fn shake_screen(&mut self, intensity: f64, duration: f64);

    /// Plays a sound effect.
    fn play_sound(&mut self, sound: SoundId);
}

/// Mock tile grid for testing.
#[derive(Debug, Clone)]
pub struct MockTiles {
    /// Edge length of a tile in world units
    tile_size: f64,
    /// Set of solid tiles
    solid: HashSet<TileCoord>,
    /// Ground level (all rows at y >= this are solid)
    ground_level: Option<i32>,
    /// World bounds; queries outside fail with `OutOfBounds`
    bounds: Option<WorldRect>,
    /// Removal requests received, in order
    removals: Vec<(DVec2, f64)>,
}

impl MockTiles {
    /// Creates an empty grid with the given tile size.
    #[must_use]
    pub fn new(tile_size: f64) -> Self {
        Self {
            tile_size,
            solid: HashSet::new(),
            ground_level: None,
            bounds: None,
            removals: Vec::new(),
        }
    }

    /// Sets a tile as solid.
    pub fn set_solid(&mut self, x: i32, y: i32) {
        self.solid.insert(TileCoord::new(x, y));
    }

    /// Sets a vertical wall of solid tiles in column `x`.
    pub fn set_wall(&mut self, x: i32, rows: std::ops::RangeInclusive<i32>) {
        for y in rows {
            self.set_solid(x, y);
        }
    }

    /// Sets the ground level (all rows at y >= this are solid).
    pub fn set_ground_level(&mut self, y: i32) {
        self.ground_level = Some(y);
    }

    /// Restricts the grid to `bounds`.
    pub fn set_bounds(&mut self, bounds: WorldRect) {
        self.bounds = Some(bounds);
    }

    /// Removal requests received so far.
    #[must_use]
    pub fn removals(&self) -> &[(DVec2, f64)] {
        &self.removals
    }
}

impl TileOracle for MockTiles {
    fn solid_at(&self, point: DVec2) -> Result<bool, TileQueryError> {
        if let Some(bounds) = self.bounds {
            if !bounds.contains(point) {
                return Err(TileQueryError::OutOfBounds {
                    x: point.x,
                    y: point.y,
                });
            }
        }
        let tile = TileCoord::from_world(point, self.tile_size);
        if let Some(ground) = self.ground_level {
            if tile.y >= ground {
                return Ok(true);
            }
        }
        Ok(self.solid.contains(&tile))
    }

    fn bounds(&self) -> Option<WorldRect> {
        self.bounds
    }
}

impl TileWorld for MockTiles {
    fn remove_tiles_around(&mut self, point: DVec2, radius: f64) {
        self.removals.push((point, radius));
        let center = TileCoord::from_world(point, self.tile_size);
        let reach = radius.ceil() as i32;
        let radius_sq = radius * radius;
        self.solid.retain(|tile| {
            let dx = f64::from(tile.x - center.x);
            let dy = f64::from(tile.y - center.y);
            dx.abs() > f64::from(reach)
                || dy.abs() > f64::from(reach)
                || dx * dx + dy * dy > radius_sq
        });
    }
}

/// Game hooks that record every call.
#[derive(Debug, Default, Clone)]
pub struct RecordingGame {
    /// `damage_player` calls as `(point, radius, damage)`
    pub damage_calls: Vec<(DVec2, f64, f64)>,
    /// Number of `change_turn` calls
    pub turn_changes: u32,
}

impl GameHooks for RecordingGame {
    fn damage_player(&mut self, point: DVec2, radius: f64, damage: f64) {
        self.damage_calls.push((point, radius, damage));
    }

    fn change_turn(&mut self) {
        self.turn_changes += 1;
    }
}

/// Effect sink that records every request.
#[derive(Debug, Default, Clone)]
pub struct RecordingEffects {
    /// Spawned particles as `(kind, position, velocity)`
    pub particles: Vec<(ParticleKind, DVec2, DVec2)>,
    /// Screen shakes as `(intensity, duration)`
    pub shakes: Vec<(f64, f64)>,
    /// Sounds played, in order
    pub sounds: Vec<SoundId>,
}

impl EffectSink for RecordingEffects {
    fn spawn_particle(&mut self, kind: ParticleKind, position: DVec2, velocity: DVec2) {
        self.particles.push((kind, position, velocity));
    }

    fn shake_screen(&mut self, intensity: f64, duration: f64) {
        self.shakes.push((intensity, duration));
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.sounds.push(sound);
    }
}
