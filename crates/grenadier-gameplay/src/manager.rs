//! Projectile collection.
//!
//! Owns every live projectile, steps them once per tick and drops the ones
//! that finished. Finished projectiles are collected during the pass and
//! removed afterwards, so the survivors keep their relative order.
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use grenadier_gameplay::prelude::*;
//!
//! let mut tiles = MockTiles::new(16.0);
//! tiles.set_ground_level(10);
//!
//! let mut system = ProjectileSystem::new(
//!     ProjectileConfig::default(),
//!     RecordingGame::default(),
//!     RecordingEffects::default(),
//! );
//! system.add(ProjectileKind::Rocket, DVec2::new(100.0, 100.0), DVec2::new(200.0, 100.0));
//!
//! let mut events = Vec::new();
//! while !system.is_empty() {
//!     events.extend(system.update(1.0 / 60.0, &mut tiles));
//! }
//! assert!(matches!(events.last(), Some(ProjectileEvent::Embedded { .. })));
//! assert_eq!(system.game().damage_calls.len(), 1);
//! ```

use glam::DVec2;
use grenadier_common::ProjectileId;
use tracing::debug;

use crate::collaborators::{EffectSink, GameHooks, TileOracle, TileWorld};
use crate::config::ProjectileConfig;
use crate::detonation::Collaborators;
use crate::kind::ProjectileKind;
use crate::projectile::{Projectile, TickOutcome};
use crate::render::{ProjectileInstance, RenderSurface};
use crate::trajectory::TrajectoryPreviewer;

/// Notable things that happened during an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileEvent {
    /// A projectile bounced.
    Bounced {
        /// Projectile ID
        id: ProjectileId,
        /// Where it bounced
        position: DVec2,
        /// Force of the new segment
        force: f64,
    },
    /// A fuse ran out.
    Detonated {
        /// Projectile ID
        id: ProjectileId,
        /// Projectile kind
        kind: ProjectileKind,
        /// Blast center
        position: DVec2,
    },
    /// A projectile exploded on contact.
    Embedded {
        /// Projectile ID
        id: ProjectileId,
        /// Projectile kind
        kind: ProjectileKind,
        /// Blast center
        position: DVec2,
    },
    /// A projectile left the world and was dropped without exploding.
    Discarded {
        /// Projectile ID
        id: ProjectileId,
        /// Last known position
        position: DVec2,
    },
}

/// Live projectile collection.
#[derive(Debug)]
pub struct ProjectileSystem<G, E> {
    projectiles: Vec<Projectile>,
    next_id: ProjectileId,
    config: ProjectileConfig,
    previewer: TrajectoryPreviewer,
    rng: fastrand::Rng,
    game: G,
    effects: E,
}

impl<G: GameHooks, E: EffectSink> ProjectileSystem<G, E> {
    /// Creates an empty collection wired to the given collaborators.
    #[must_use]
    pub fn new(config: ProjectileConfig, game: G, effects: E) -> Self {
        Self {
            projectiles: Vec::new(),
            next_id: ProjectileId::from_raw(1),
            rng: fastrand::Rng::with_seed(config.seed),
            previewer: TrajectoryPreviewer::new(config.clone()),
            config,
            game,
            effects,
        }
    }

    /// Launches a projectile from `source` aimed at `target`.
    pub fn add(&mut self, kind: ProjectileKind, source: DVec2, target: DVec2) -> ProjectileId {
        let id = self.next_id;
        self.next_id = id.next();

        let projectile = Projectile::aimed(id, kind, source, target);
        debug!(
            "spawned {kind} {id} at ({:.1}, {:.1}), angle {:.3}, force {:.1}",
            source.x, source.y, projectile.flight.angle, projectile.flight.force
        );
        self.projectiles.push(projectile);
        id
    }

    /// Steps every projectile by `dt` seconds.
    ///
    /// Projectiles that detonate, embed or leave the world are removed before
    /// this returns.
    pub fn update<W: TileWorld>(&mut self, dt: f64, tiles: &mut W) -> Vec<ProjectileEvent> {
        let mut events = Vec::new();
        let mut finished = Vec::new();
        let bounds = tiles.bounds();

        let mut world = Collaborators {
            tiles,
            game: &mut self.game,
            effects: &mut self.effects,
            rng: &mut self.rng,
        };

        for projectile in &mut self.projectiles {
            let id = projectile.id;
            let kind = projectile.kind;

            match projectile.update(dt, &mut world, &self.config) {
                TickOutcome::Flying => {},
                TickOutcome::Bounced { force } => events.push(ProjectileEvent::Bounced {
                    id,
                    position: projectile.position(),
                    force,
                }),
                TickOutcome::Detonated { position } => {
                    events.push(ProjectileEvent::Detonated { id, kind, position });
                },
                TickOutcome::Embedded { position } => {
                    events.push(ProjectileEvent::Embedded { id, kind, position });
                },
                TickOutcome::Inert => {},
            }

            if !projectile.is_flying() {
                finished.push(id);
            } else if bounds.is_some_and(|b| b.is_lost(projectile.position())) {
                debug!("{kind} {id} left the world");
                events.push(ProjectileEvent::Discarded {
                    id,
                    position: projectile.position(),
                });
                finished.push(id);
            }
        }

        if !finished.is_empty() {
            self.projectiles.retain(|p| !finished.contains(&p.id));
        }

        events
    }

    /// Draws every live projectile.
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S, offset: DVec2) {
        for projectile in &self.projectiles {
            surface.draw_projectile(&ProjectileInstance::from_projectile(projectile, offset));
        }
    }

    /// Render instances for every live projectile.
    #[must_use]
    pub fn render_instances(&self, offset: DVec2) -> Vec<ProjectileInstance> {
        let mut instances = Vec::with_capacity(self.projectiles.len());
        self.render(&mut instances, offset);
        instances
    }

    /// Preview of the path a projectile fired now would take.
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
        self.previewer.preview(tiles, kind, source, target, fps)
    }

    /// Get a projectile by ID.
    #[must_use]
    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Live projectiles in launch order.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    /// Number of live projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    /// Whether no projectile is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Number of live projectiles of one kind.
    #[must_use]
    pub fn count_of(&self, kind: ProjectileKind) -> usize {
        self.projectiles.iter().filter(|p| p.kind == kind).count()
    }

    /// Drops every projectile without detonating it.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// Tuning in use.
    #[must_use]
    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    /// Game hooks.
    #[must_use]
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Mutable game hooks.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    /// Effect sink.
    #[must_use]
    pub fn effects(&self) -> &E {
        &self.effects
    }

    /// Mutable effect sink.
    pub fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }
}
