//! Application lifecycle management.
//!
//! Fixed-step loop that previews and fires the configured shots and runs the
//! projectile collection until every shot has resolved.

use anyhow::{Context, Result};
use glam::DVec2;
use tracing::{debug, info, trace, warn};

use grenadier_gameplay::{ProjectileEvent, ProjectileSystem};

use crate::config::EngineConfig;
use crate::hooks::{HeadlessEffects, HeadlessGame};
use crate::tilemap::TileMap;

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Ticks simulated
    pub ticks: u32,
    /// Bounce events
    pub bounces: u32,
    /// Fuse detonations
    pub detonations: u32,
    /// Contact detonations
    pub embedded: u32,
    /// Projectiles dropped after leaving the world
    pub discarded: u32,
    /// Projectiles still flying when the run stopped
    pub live: usize,
    /// Turn number at the end of the run
    pub turn: u32,
    /// Tiles destroyed by blasts
    pub tiles_destroyed: usize,
    /// Debris particles spawned
    pub particles: usize,
}

/// Runs the configured scenario.
pub fn run(config: &EngineConfig) -> Result<()> {
    info!("Configuration loaded:");
    info!("  Tick rate: {} Hz", config.fps);
    info!("  Shots: {}", config.shots.len());

    let map = load_map(config)?;
    info!("Map: {}x{} tiles", map.width(), map.height());

    let (summary, map) = simulate(config, map);

    info!(
        "Finished after {} ticks ({:.2}s)",
        summary.ticks,
        f64::from(summary.ticks) * config.tick_seconds()
    );
    info!(
        "  {} bounces, {} fuse detonations, {} contact detonations, {} discarded",
        summary.bounces, summary.detonations, summary.embedded, summary.discarded
    );
    info!(
        "  {} tiles destroyed, {} debris particles, turn {}",
        summary.tiles_destroyed, summary.particles, summary.turn
    );
    if summary.live > 0 {
        warn!(
            "{} projectiles still flying after {} ticks",
            summary.live, config.max_ticks
        );
    }

    if config.print_map {
        println!("{map}");
    }

    Ok(())
}

/// Loads the configured map, or the built-in one.
fn load_map(config: &EngineConfig) -> Result<TileMap> {
    match &config.map {
        Some(path) => TileMap::from_file(path, config.tile_size)
            .with_context(|| format!("Failed to load map {}", path.display())),
        None => Ok(TileMap::builtin(config.tile_size)?),
    }
}

/// Fires every shot and steps until all have resolved or `max_ticks` pass.
pub fn simulate(config: &EngineConfig, mut map: TileMap) -> (Summary, TileMap) {
    let dt = config.tick_seconds();
    let solid_before = map.solid_count();
    let mut system = ProjectileSystem::new(
        config.projectile.clone(),
        HeadlessGame::default(),
        HeadlessEffects::default(),
    );

    for shot in &config.shots {
        let path = system.preview(&map, shot.kind, shot.source, shot.target, config.fps);
        info!(
            "{} preview: {} points, ends at {}",
            shot.kind,
            path.len(),
            path.last().copied().unwrap_or(shot.source)
        );
        let id = system.add(shot.kind, shot.source, shot.target);
        debug!("Fired {} {id}", shot.kind);
    }

    let mut summary = Summary::default();
    while !system.is_empty() && summary.ticks < config.max_ticks {
        summary.ticks += 1;

        for event in system.update(dt, &mut map) {
            match event {
                ProjectileEvent::Bounced { id, force, .. } => {
                    summary.bounces += 1;
                    trace!("{id} bounced, force {force:.1}");
                },
                ProjectileEvent::Detonated { id, kind, position } => {
                    summary.detonations += 1;
                    info!("{kind} {id} detonated at {position}");
                },
                ProjectileEvent::Embedded { id, kind, position } => {
                    summary.embedded += 1;
                    info!("{kind} {id} hit terrain at {position}");
                },
                ProjectileEvent::Discarded { id, position } => {
                    summary.discarded += 1;
                    info!("{id} left the map at {position}");
                },
            }
        }

        let frame = system.render_instances(DVec2::ZERO);
        trace!("Tick {}: {} sprites", summary.ticks, frame.len());
    }

    summary.live = system.len();
    summary.turn = system.game().turn;
    summary.particles = system.effects().particles;
    summary.tiles_destroyed = solid_before - map.solid_count();

    (summary, map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShotConfig;
    use grenadier_common::TileCoord;
    use grenadier_gameplay::ProjectileKind;

    fn builtin() -> TileMap {
        TileMap::builtin(16.0).expect("built-in map parses")
    }

    #[test]
    fn test_default_scenario_resolves() {
        let config = EngineConfig::default();
        let (summary, _) = simulate(&config, builtin());

        assert_eq!(summary.live, 0);
        assert!(summary.ticks < config.max_ticks);
        assert_eq!(
            summary.detonations + summary.embedded + summary.discarded,
            2
        );
        assert_eq!(summary.detonations, 1);
        assert_eq!(summary.turn, 1);
        assert_eq!(summary.particles, 100);
        assert!(summary.tiles_destroyed > 0);
    }

    #[test]
    fn test_rocket_into_ground() {
        let mut config = EngineConfig::default();
        config.shots = vec![ShotConfig::new(
            ProjectileKind::Rocket,
            DVec2::new(100.0, 170.0),
            DVec2::new(100.0, 200.0),
        )];

        let (summary, map) = simulate(&config, builtin());

        assert_eq!(summary.embedded, 1);
        assert_eq!(summary.turn, 0);
        assert_eq!(summary.particles, 0);
        assert!(summary.ticks <= 30);
        assert!(!map.tile(TileCoord::new(6, 11)));
    }

    #[test]
    fn test_no_shots() {
        let mut config = EngineConfig::default();
        config.shots.clear();

        let (summary, map) = simulate(&config, builtin());
        assert_eq!(summary, Summary::default());
        assert_eq!(map, builtin());
    }

    #[test]
    fn test_tick_limit() {
        let mut config = EngineConfig::default();
        config.max_ticks = 10;

        let (summary, _) = simulate(&config, builtin());
        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.live, 2);
    }

    #[test]
    fn test_missing_map_file_is_an_error() {
        let mut config = EngineConfig::default();
        config.map = Some("/nonexistent/map.txt".into());
        assert!(load_map(&config).is_err());
    }
}
