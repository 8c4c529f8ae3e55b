//! Engine configuration.
//!
//! Provides the simulation rate, tile map selection, the scripted shots and
//! the projectile tuning. Configuration is read from a TOML file; fields the
//! file leaves out keep their defaults.

use glam::DVec2;
use grenadier_common::{GrenadierError, GrenadierResult};
use grenadier_gameplay::{ProjectileConfig, ProjectileKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "grenadier.toml";

/// One scripted shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotConfig {
    /// What to fire
    pub kind: ProjectileKind,
    /// Launch point in world units
    pub source: DVec2,
    /// Aim point in world units
    pub target: DVec2,
}

impl ShotConfig {
    /// Creates a shot.
    #[must_use]
    pub fn new(kind: ProjectileKind, source: DVec2, target: DVec2) -> Self {
        Self {
            kind,
            source,
            target,
        }
    }
}

/// Engine configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Simulation ===
    /// Simulation ticks per second
    pub fps: u32,
    /// Tick limit before the run is abandoned
    pub max_ticks: u32,

    // === Map ===
    /// ASCII map file (None = built-in map)
    pub map: Option<PathBuf>,
    /// Tile edge length in world units
    pub tile_size: f64,
    /// Print the map after the run
    pub print_map: bool,

    // === Shots ===
    /// Shots fired at the start of the run, in order
    pub shots: Vec<ShotConfig>,

    // === Projectiles ===
    /// Projectile tuning
    pub projectile: ProjectileConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            max_ticks: 1800, // 30 seconds

            map: None,
            tile_size: 16.0,
            print_map: true,

            shots: vec![
                ShotConfig::new(
                    ProjectileKind::Grenade,
                    DVec2::new(120.0, 150.0),
                    DVec2::new(200.0, 110.0),
                ),
                ShotConfig::new(
                    ProjectileKind::Rocket,
                    DVec2::new(500.0, 150.0),
                    DVec2::new(400.0, 120.0),
                ),
            ],

            projectile: ProjectileConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        Self::from_file(path).unwrap_or_else(|e| {
            warn!("{e}, using defaults");
            Self::default()
        })
    }

    /// Read and parse a configuration file.
    ///
    /// Unlike [`EngineConfig::load_from`], a missing or malformed file is an
    /// error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GrenadierResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)
            .map_err(|e| GrenadierError::Config(format!("{}: {e}", path.display())))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default configuration file path.
    ///
    /// A file in the working directory wins over the per-user one.
    fn config_path() -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return local;
        }
        match dirs_config_path() {
            Some(config_dir) => config_dir.join("grenadier").join(CONFIG_FILE),
            None => local,
        }
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.fps = self.fps.clamp(10, 240);
        self.max_ticks = self.max_ticks.max(1);

        if !self.tile_size.is_finite() || self.tile_size < 1.0 {
            self.tile_size = 16.0;
        }

        self.projectile.validate();
    }

    /// Seconds per simulation tick.
    #[must_use]
    pub fn tick_seconds(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }
}

/// Get platform-specific config directory.
fn dirs_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"))
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.fps, 60);
        assert_eq!(config.shots.len(), 2);
        assert!(config.map.is_none());
        assert_eq!(config.projectile, ProjectileConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();
        config.fps = 0;
        config.max_ticks = 0;
        config.tile_size = f64::NAN;

        config.validate();

        assert_eq!(config.fps, 10);
        assert_eq!(config.max_ticks, 1);
        assert_eq!(config.tile_size, 16.0);
    }

    #[test]
    fn test_config_file_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("grenadier.toml");

        let mut config = EngineConfig::default();
        config.fps = 120;
        config.map = Some(PathBuf::from("maps/cave.txt"));
        config.shots = vec![ShotConfig::new(
            ProjectileKind::Rocket,
            DVec2::new(10.0, 20.0),
            DVec2::new(30.0, 5.0),
        )];
        config.projectile.restitution = 0.5;

        let contents = toml::to_string_pretty(&config).expect("Failed to serialize config");
        fs::write(&config_path, contents).expect("Failed to write config");

        let loaded = EngineConfig::from_file(&config_path).expect("Failed to load config");
        assert_eq!(loaded.fps, 120);
        assert_eq!(loaded.map, Some(PathBuf::from("maps/cave.txt")));
        assert_eq!(loaded.shots, config.shots);
        assert_eq!(loaded.projectile.restitution, 0.5);
    }

    #[test]
    fn test_config_partial_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("grenadier.toml");
        fs::write(
            &config_path,
            "fps = 30\n\n[[shots]]\nkind = \"Grenade\"\nsource = [1.0, 2.0]\ntarget = [3.0, 4.0]\n",
        )
        .expect("Failed to write config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded.fps, 30);
        assert_eq!(loaded.max_ticks, 1800);
        assert_eq!(loaded.shots.len(), 1);
        assert_eq!(loaded.shots[0].kind, ProjectileKind::Grenade);
        assert_eq!(loaded.shots[0].target, DVec2::new(3.0, 4.0));
    }

    #[test]
    fn test_config_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("grenadier.toml");
        fs::write(&config_path, "fps = \"fast\"").expect("Failed to write config");

        let config = EngineConfig::load_from(&config_path);
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/grenadier.toml");
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn test_from_file_rejects_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("grenadier.toml");
        fs::write(&config_path, "fps = \"fast\"").expect("Failed to write config");

        match EngineConfig::from_file(&config_path) {
            Err(GrenadierError::Config(message)) => {
                assert!(message.contains("grenadier.toml"));
            },
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_file_missing_file() {
        assert!(matches!(
            EngineConfig::from_file("/nonexistent/path/grenadier.toml"),
            Err(GrenadierError::Io(_))
        ));
    }
}
