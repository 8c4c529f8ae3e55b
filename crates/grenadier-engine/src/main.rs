//! # Grenadier
//!
//! Headless driver for the Grenadier projectile systems.
//!
//! Loads a tile map and a list of shots, previews and fires them, then steps
//! the projectile collection at a fixed rate until every shot has resolved.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;
mod hooks;
mod tilemap;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::EngineConfig;

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("grenadier=info".parse()?))
        .init();

    info!("Grenadier starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // An explicit config path must load
    let mut config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::load(),
    };
    config.validate();

    app::run(&config)?;

    info!("Grenadier shutdown complete");
    Ok(())
}
