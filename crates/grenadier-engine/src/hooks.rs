//! Headless game and effect collaborators.
//!
//! There are no players, screen or speakers in the driver; requests are
//! logged and tallied for the run summary.

use glam::DVec2;
use grenadier_gameplay::{EffectSink, GameHooks, ParticleKind, SoundId};
use tracing::{info, trace};

/// Turn flow and damage bookkeeping.
#[derive(Debug, Default)]
pub struct HeadlessGame {
    /// Current turn number
    pub turn: u32,
    /// Damage requests received
    pub damage_requests: u32,
    /// Sum of requested damage
    pub damage_total: f64,
}

impl GameHooks for HeadlessGame {
    fn damage_player(&mut self, point: DVec2, radius: f64, damage: f64) {
        self.damage_requests += 1;
        self.damage_total += damage;
        info!(
            "Damage {damage} within {radius} tiles of ({:.1}, {:.1})",
            point.x, point.y
        );
    }

    fn change_turn(&mut self) {
        self.turn += 1;
        info!("Turn {} begins", self.turn);
    }
}

/// Effect tallies.
#[derive(Debug, Default)]
pub struct HeadlessEffects {
    /// Particles spawned
    pub particles: usize,
    /// Screen shakes requested
    pub shakes: u32,
    /// Sounds played, in order
    pub sounds: Vec<SoundId>,
}

impl EffectSink for HeadlessEffects {
    fn spawn_particle(&mut self, kind: ParticleKind, position: DVec2, velocity: DVec2) {
        self.particles += 1;
        trace!("{kind:?} particle at {position} moving {velocity}");
    }

    fn shake_screen(&mut self, intensity: f64, duration: f64) {
        self.shakes += 1;
        info!("Screen shake {intensity} for {duration}s");
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.sounds.push(sound);
        info!("Sound {sound:?}");
    }
}
