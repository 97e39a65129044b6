//! Configuration system for Lantern.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, startup validation, hot-reload detection,
//! and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AssetsConfig, BiomeThreshold, CameraConfig, Config, DebugConfig, TerrainSection,
    WindowConfig, WorldConfig, default_config_dir,
};
pub use error::ConfigError;
