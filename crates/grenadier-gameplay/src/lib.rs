//! # Grenadier Gameplay
//!
//! Projectile gameplay for a destructible tile world.
//!
//! This crate provides:
//! - Closed-form ballistic kinematics
//! - Tile collision probing and bounce reflection
//! - Grenades (fused, bouncing) and rockets (contact detonation)
//! - Detonation side effects through collaborator traits
//! - Trajectory preview for aiming
//! - The live projectile collection and its render hand-off

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod collaborators;
pub mod config;
pub mod detonation;
pub mod flight;
pub mod kind;
pub mod kinematics;
pub mod manager;
pub mod projectile;
pub mod render;
pub mod trajectory;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::collaborators::*;
    pub use crate::config::*;
    pub use crate::detonation::*;
    pub use crate::flight::*;
    pub use crate::kind::*;
    pub use crate::kinematics::*;
    pub use crate::manager::*;
    pub use crate::projectile::*;
    pub use crate::render::*;
    pub use crate::trajectory::*;
    pub use grenadier_common::ProjectileId;
}

pub use prelude::*;
