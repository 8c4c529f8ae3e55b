//! Projectile kinds and their per-kind constants.

use serde::{Deserialize, Serialize};

use crate::collaborators::SoundId;

/// Screen shake request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    /// Shake amplitude
    pub intensity: f64,
    /// Duration in seconds
    pub duration: f64,
}

/// What a detonation does to the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blast {
    /// Terrain removal radius, in tiles
    pub tile_radius: f64,
    /// Damage radius, in tiles
    pub damage_radius: f64,
    /// Whether the detonation ends the current turn
    pub ends_turn: bool,
    /// Number of debris particles
    pub debris: u32,
    /// Screen shake, if any
    pub shake: Option<ScreenShake>,
    /// Explosion sound, if any
    pub sound: Option<SoundId>,
}

/// Kind of projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProjectileKind {
    /// Bounces off tiles and explodes when its fuse runs out.
    Grenade = 0,
    /// Explodes on the first tile it touches.
    Rocket = 1,
}

impl ProjectileKind {
    /// Convert from u8.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Grenade),
            1 => Some(Self::Rocket),
            _ => None,
        }
    }

    /// Gravity scaling factor.
    #[must_use]
    pub const fn mass(self) -> f64 {
        match self {
            Self::Grenade => 20.0,
            Self::Rocket => 10.0,
        }
    }

    /// Launch speed cap.
    #[must_use]
    pub const fn max_force(self) -> f64 {
        match self {
            Self::Grenade => 150.0,
            Self::Rocket => 300.0,
        }
    }

    /// Damage dealt by the detonation.
    #[must_use]
    pub const fn damage(self) -> f64 {
        match self {
            Self::Grenade => 50.0,
            Self::Rocket => 30.0,
        }
    }

    /// Whether tile contact bounces instead of detonating.
    #[must_use]
    pub const fn bounces(self) -> bool {
        matches!(self, Self::Grenade)
    }

    /// Fuse length in seconds, for kinds with a life timer.
    #[must_use]
    pub const fn life_span(self) -> Option<f64> {
        match self {
            Self::Grenade => Some(5.0),
            Self::Rocket => None,
        }
    }

    /// Whether the sprite tumbles instead of following its heading.
    #[must_use]
    pub const fn spins(self) -> bool {
        matches!(self, Self::Grenade)
    }

    /// How far ahead, in seconds, the aiming preview simulates.
    #[must_use]
    pub const fn preview_horizon(self) -> f64 {
        match self {
            Self::Grenade => 5.0,
            Self::Rocket => 10.0,
        }
    }

    /// Detonation profile.
    #[must_use]
    pub const fn blast(self) -> Blast {
        match self {
            Self::Grenade => Blast {
                tile_radius: 3.0,
                damage_radius: 5.0,
                ends_turn: true,
                debris: 100,
                shake: Some(ScreenShake {
                    intensity: 8.0,
                    duration: 0.35,
                }),
                sound: Some(SoundId::Explosion),
            },
            Self::Rocket => Blast {
                tile_radius: 2.0,
                damage_radius: 3.0,
                ends_turn: false,
                debris: 0,
                shake: None,
                sound: None,
            },
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grenade => "grenade",
            Self::Rocket => "rocket",
        }
    }
}

impl std::fmt::Display for ProjectileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
