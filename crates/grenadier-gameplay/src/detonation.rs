//! Detonation side effects.

use std::f64::consts::TAU;

use glam::DVec2;
use tracing::debug;

use crate::collaborators::{EffectSink, GameHooks, ParticleKind, TileWorld};
use crate::config::ProjectileConfig;
use crate::kind::ProjectileKind;

/// Mutable access to everything a projectile can affect.
pub struct Collaborators<'a> {
    /// Destructible tile grid
    pub tiles: &'a mut dyn TileWorld,
    /// Damage and turn flow
    pub game: &'a mut dyn GameHooks,
    /// Particles, shake, sound
    pub effects: &'a mut dyn EffectSink,
    /// Debris randomization
    pub rng: &'a mut fastrand::Rng,
}

impl std::fmt::Debug for Collaborators<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Applies the blast of `kind` at `position`.
pub fn detonate(
    kind: ProjectileKind,
    position: DVec2,
    world: &mut Collaborators<'_>,
    config: &ProjectileConfig,
) {
    let blast = kind.blast();
    debug!(
        "{kind} detonated at ({:.1}, {:.1}), tile radius {}, damage radius {}",
        position.x, position.y, blast.tile_radius, blast.damage_radius
    );

    world.tiles.remove_tiles_around(position, blast.tile_radius);
    world
        .game
        .damage_player(position, blast.damage_radius, kind.damage());

    if blast.ends_turn {
        world.game.change_turn();
    }

    for _ in 0..blast.debris {
        let direction = world.rng.f64() * TAU;
        let speed = config.debris_speed_min
            + world.rng.f64() * (config.debris_speed_max - config.debris_speed_min);
        let velocity = DVec2::new(direction.cos(), direction.sin()) * speed;
        world
            .effects
            .spawn_particle(ParticleKind::Debris, position, velocity);
    }

    if let Some(shake) = blast.shake {
        world.effects.shake_screen(shake.intensity, shake.duration);
    }
    if let Some(sound) = blast.sound {
        world.effects.play_sound(sound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockTiles, RecordingEffects, RecordingGame, SoundId};

    #[test]
    fn test_grenade_blast() {
        let mut tiles = MockTiles::new(16.0);
        let mut game = RecordingGame::default();
        let mut effects = RecordingEffects::default();
        let mut rng = fastrand::Rng::with_seed(1);
        let config = ProjectileConfig::default();
        let at = DVec2::new(64.0, 64.0);

        let mut world = Collaborators {
            tiles: &mut tiles,
            game: &mut game,
            effects: &mut effects,
            rng: &mut rng,
        };
        detonate(ProjectileKind::Grenade, at, &mut world, &config);

        assert_eq!(tiles.removals(), &[(at, 3.0)]);
        assert_eq!(game.damage_calls, vec![(at, 5.0, 50.0)]);
        assert_eq!(game.turn_changes, 1);
        assert_eq!(effects.particles.len(), 100);
        assert_eq!(effects.shakes.len(), 1);
        assert_eq!(effects.sounds, vec![SoundId::Explosion]);

        for (kind, position, velocity) in &effects.particles {
            assert_eq!(*kind, ParticleKind::Debris);
            assert_eq!(*position, at);
            let speed = velocity.length();
            assert!(speed >= config.debris_speed_min - 1e-9);
            assert!(speed <= config.debris_speed_max + 1e-9);
        }
    }

    #[test]
    fn test_rocket_blast() {
        let mut tiles = MockTiles::new(16.0);
        let mut game = RecordingGame::default();
        let mut effects = RecordingEffects::default();
        let mut rng = fastrand::Rng::with_seed(1);
        let at = DVec2::new(10.0, 20.0);

        let mut world = Collaborators {
            tiles: &mut tiles,
            game: &mut game,
            effects: &mut effects,
            rng: &mut rng,
        };
        detonate(ProjectileKind::Rocket, at, &mut world, &ProjectileConfig::default());

        assert_eq!(tiles.removals(), &[(at, 2.0)]);
        assert_eq!(game.damage_calls, vec![(at, 3.0, 30.0)]);
        assert_eq!(game.turn_changes, 0);
        assert!(effects.particles.is_empty());
        assert!(effects.shakes.is_empty());
        assert!(effects.sounds.is_empty());
    }
}
