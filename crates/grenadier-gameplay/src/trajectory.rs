//! Trajectory preview for aiming.
//!
//! The preview replays the live flight model on a private [`Flight`] against a
//! read-only [`TileOracle`], so it can run every frame while the player aims
//! without touching live projectiles or the tile grid.

use glam::DVec2;
use tracing::trace;

use crate::collaborators::TileOracle;
use crate::config::{ProjectileConfig, LIFE_EPSILON};
use crate::flight::Flight;
use crate::kind::ProjectileKind;
use crate::kinematics::LaunchVector;

/// Computes sparse preview paths.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryPreviewer {
    config: ProjectileConfig,
}

impl TrajectoryPreviewer {
    /// Creates a previewer using the given tuning.
    #[must_use]
    pub fn new(config: ProjectileConfig) -> Self {
        Self { config }
    }

    /// Tuning in use.
    #[must_use]
    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    /// Preview over the kind's default horizon.
    #[must_use]
    pub fn preview<O>(
        &self,
        tiles: &O,
        kind: ProjectileKind,
        source: DVec2,
        target: DVec2,
        fps: u32,
    ) -> Vec<DVec2>
    where
        O: TileOracle + ?Sized,
    {
        self.preview_for(tiles, kind, source, target, fps, kind.preview_horizon())
    }

    /// Simulates up to `max_life_seconds` in `1 / fps` steps.
    ///
    /// A point is emitted every `preview_sample_interval` simulated seconds,
    /// plus the tile boundary point of every impact. Kinds that do not bounce
    /// end at their first boundary point. The path also ends once the
    /// simulated point is lost from the oracle's world bounds.
    #[must_use]
    pub fn preview_for<O>(
        &self,
        tiles: &O,
        kind: ProjectileKind,
        source: DVec2,
        target: DVec2,
        fps: u32,
        max_life_seconds: f64,
    ) -> Vec<DVec2>
    where
        O: TileOracle + ?Sized,
    {
        let dt = 1.0 / f64::from(fps.max(1));
        let interval = self.config.preview_sample_interval;
        let launch = LaunchVector::aim(source, target, kind.max_force());
        let mut flight = Flight::launch(source, launch);
        let bounds = tiles.bounds();

        let mut points = Vec::new();
        let mut remaining = max_life_seconds;
        let mut until_sample = interval;

        loop {
            remaining -= dt;
            if remaining <= LIFE_EPSILON {
                break;
            }

            let step = flight.step(dt, kind.mass(), tiles, &self.config);

            if let Some(impact) = step.impact {
                let boundary = tiles
                    .first_touch_on_segment(flight.previous, impact.contact)
                    .unwrap_or(flight.position);
                points.push(boundary);
                if !kind.bounces() {
                    break;
                }
                flight.rebound(impact.velocity, self.config.restitution);
            }

            if bounds.is_some_and(|b| b.is_lost(flight.position)) {
                trace!("{kind} preview left the world after {} points", points.len());
                break;
            }

            until_sample -= dt;
            if until_sample <= LIFE_EPSILON {
                points.push(flight.position);
                until_sample = interval;
            }
        }

        points
    }
}
