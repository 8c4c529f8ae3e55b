//! # Grenadier Common
//!
//! Common types shared by the Grenadier crates.
//!
//! This crate provides the foundational types used across subsystems:
//! - Coordinate types (tile coordinates, world rectangles)
//! - ID types (`ProjectileId`)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_tile_coord_conversion() {
        let tile = TileCoord::from_world(DVec2::new(100.0, 200.0), 16.0);
        assert_eq!(tile, TileCoord::new(6, 12));

        let negative = TileCoord::from_world(DVec2::new(-1.0, -17.0), 16.0);
        assert_eq!(negative, TileCoord::new(-1, -2));
    }

    #[test]
    fn test_projectile_id_display() {
        let id = ProjectileId::from_raw(7);
        assert_eq!(id.to_string(), "#7");
        assert!(id.is_valid());
        assert!(!ProjectileId::NULL.is_valid());
    }
}
