//! ASCII tile map.
//!
//! Maps are rectangular grids of characters, one row per line:
//! `#` is a solid tile and `.` is empty space. Blank lines are ignored.

use std::fmt;
use std::path::Path;

use glam::DVec2;
use grenadier_common::{GrenadierResult, MapError, TileCoord, WorldRect};
use grenadier_gameplay::{TileOracle, TileQueryError, TileWorld};
use tracing::{debug, info};

/// Map used when no map file is configured.
pub const DEFAULT_MAP: &str = concat!(
    "#......................................#\n",
    "#......................................#\n",
    "#......................................#\n",
    "#......................................#\n",
    "#......................................#\n",
    "#......................................#\n",
    "#......................................#\n",
    "#......................................#\n",
    "#................####..................#\n",
    "#...............######.................#\n",
    "#...............######.................#\n",
    "########################################\n",
    "########################################\n",
    "########################################\n",
    "########################################\n",
);

const SOLID: char = '#';
const EMPTY: char = '.';

/// Destructible tile grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tile_size: f64,
    solid: Vec<bool>,
}

impl TileMap {
    /// Parses an ASCII map.
    pub fn parse(text: &str, tile_size: f64) -> Result<Self, MapError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(MapError::InvalidTileSize(tile_size));
        }

        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map(|row| row.chars().count()).ok_or(MapError::Empty)?;

        let mut solid = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
            for (column, ch) in line.chars().enumerate() {
                match ch {
                    SOLID => solid.push(true),
                    EMPTY => solid.push(false),
                    _ => return Err(MapError::UnknownTile { row, column, ch }),
                }
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            tile_size,
            solid,
        })
    }

    /// Reads and parses a map file.
    pub fn from_file<P: AsRef<Path>>(path: P, tile_size: f64) -> GrenadierResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let map = Self::parse(&text, tile_size)?;
        info!(
            "Loaded {}x{} map from {}",
            map.width,
            map.height,
            path.display()
        );
        Ok(map)
    }

    /// The built-in map.
    pub fn builtin(tile_size: f64) -> Result<Self, MapError> {
        Self::parse(DEFAULT_MAP, tile_size)
    }

    /// Width in tiles.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of solid tiles.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    /// Whether a tile is solid. Tiles outside the grid are not.
    #[must_use]
    pub fn tile(&self, tile: TileCoord) -> bool {
        self.index(tile).is_some_and(|i| self.solid[i])
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        let x = usize::try_from(tile.x).ok()?;
        let y = usize::try_from(tile.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl TileOracle for TileMap {
    fn solid_at(&self, point: DVec2) -> Result<bool, TileQueryError> {
        let tile = TileCoord::from_world(point, self.tile_size);
        self.index(tile)
            .map(|i| self.solid[i])
            .ok_or(TileQueryError::OutOfBounds {
                x: point.x,
                y: point.y,
            })
    }

    fn bounds(&self) -> Option<WorldRect> {
        Some(WorldRect::from_size(
            self.width as f64 * self.tile_size,
            self.height as f64 * self.tile_size,
        ))
    }
}

impl TileWorld for TileMap {
    fn remove_tiles_around(&mut self, point: DVec2, radius: f64) {
        let center = TileCoord::from_world(point, self.tile_size);
        let reach = radius.ceil() as i32;
        let radius_sq = radius * radius;
        let mut removed = 0;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if f64::from(dx * dx + dy * dy) > radius_sq {
                    continue;
                }
                if let Some(i) = self.index(center.offset(dx, dy)) {
                    if self.solid[i] {
                        self.solid[i] = false;
                        removed += 1;
                    }
                }
            }
        }

        debug!(
            "Removed {removed} tiles around ({}, {}), radius {radius}",
            center.x, center.y
        );
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.solid.chunks(self.width) {
            for &solid in row {
                write!(f, "{}", if solid { SOLID } else { EMPTY })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builtin() {
        let map = TileMap::builtin(16.0).expect("built-in map parses");
        assert_eq!(map.width(), 40);
        assert_eq!(map.height(), 15);
        assert!(map.tile(TileCoord::new(0, 0)));
        assert!(!map.tile(TileCoord::new(1, 0)));
        assert!(map.tile(TileCoord::new(20, 11)));
        assert_eq!(
            map.bounds(),
            Some(WorldRect::from_size(640.0, 240.0))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(TileMap::parse("", 16.0), Err(MapError::Empty));
        assert_eq!(TileMap::parse("\n\n", 16.0), Err(MapError::Empty));
        assert_eq!(
            TileMap::parse("...\n..\n", 16.0),
            Err(MapError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            TileMap::parse("..\n.x\n", 16.0),
            Err(MapError::UnknownTile {
                row: 1,
                column: 1,
                ch: 'x'
            })
        );
        assert!(matches!(
            TileMap::parse("..", 0.0),
            Err(MapError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn test_solid_at() {
        let map = TileMap::parse("..\n.#\n", 10.0).expect("map parses");
        assert_eq!(map.solid_at(DVec2::new(15.0, 15.0)), Ok(true));
        assert_eq!(map.solid_at(DVec2::new(5.0, 15.0)), Ok(false));
        assert!(matches!(
            map.solid_at(DVec2::new(25.0, 5.0)),
            Err(TileQueryError::OutOfBounds { .. })
        ));
        assert!(map.solid_at(DVec2::new(-0.5, 5.0)).is_err());
        assert!(!map.is_solid(DVec2::new(25.0, 5.0)));
    }

    #[test]
    fn test_remove_tiles_around() {
        let mut map = TileMap::parse(&"#####\n".repeat(5), 10.0).expect("map parses");
        map.remove_tiles_around(DVec2::new(25.0, 25.0), 1.0);

        // plus-shaped hole
        assert_eq!(map.solid_count(), 25 - 5);
        assert!(!map.tile(TileCoord::new(2, 2)));
        assert!(!map.tile(TileCoord::new(2, 1)));
        assert!(map.tile(TileCoord::new(1, 1)));
    }

    #[test]
    fn test_remove_at_edge() {
        let mut map = TileMap::parse("##\n##\n", 10.0).expect("map parses");
        map.remove_tiles_around(DVec2::new(1.0, 1.0), 3.0);
        assert_eq!(map.solid_count(), 0);
    }

    #[test]
    fn test_display_round_trip() {
        let map = TileMap::builtin(16.0).expect("built-in map parses");
        assert_eq!(map.to_string(), DEFAULT_MAP);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("map.txt");
        std::fs::write(&path, "#.\n.#\n").expect("Failed to write map");

        let map = TileMap::from_file(&path, 8.0).expect("map loads");
        assert_eq!(map.solid_count(), 2);
        assert!(TileMap::from_file(dir.path().join("missing.txt"), 8.0).is_err());
    }
}
