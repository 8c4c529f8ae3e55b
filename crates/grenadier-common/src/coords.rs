//! Coordinate types for tile and world positions.
//!
//! World positions are `glam::DVec2` in world units (pixels) with +Y pointing
//! down, matching screen space.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Tile coordinate (identifies a cell in the tile grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts a world position to the tile containing it.
    #[must_use]
    pub fn from_world(point: DVec2, tile_size: f64) -> Self {
        Self {
            x: (point.x / tile_size).floor() as i32,
            y: (point.y / tile_size).floor() as i32,
        }
    }

    /// World position of the tile's center.
    #[must_use]
    pub fn center(self, tile_size: f64) -> DVec2 {
        DVec2::new(
            (f64::from(self.x) + 0.5) * tile_size,
            (f64::from(self.y) + 0.5) * tile_size,
        )
    }

    /// Tile offset by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned world rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    /// Top-left corner
    pub min: DVec2,
    /// Bottom-right corner
    pub max: DVec2,
}

impl WorldRect {
    /// Rectangle spanning `width` x `height` from the origin.
    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self {
            min: DVec2::ZERO,
            max: DVec2::new(width, height),
        }
    }

    /// Checks if a point lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Checks if a point has left the rectangle for good under gravity.
    ///
    /// Points above the top edge are not lost: a ballistic arc comes back down.
    #[must_use]
    pub fn is_lost(&self, point: DVec2) -> bool {
        point.x < self.min.x || point.x > self.max.x || point.y > self.max.y
    }

    /// Width of the rectangle.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
