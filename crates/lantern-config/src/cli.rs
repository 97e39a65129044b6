//! Command-line argument parsing for Lantern.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Lantern command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "lantern", about = "Infinite isometric tile world")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render distance in chunks.
    #[arg(long)]
    pub render_distance: Option<u32>,

    /// Chunk edge length in tiles.
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// Starting zoom factor.
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    /// Write the final frame to this PNG file.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = Some(seed);
        }
        if let Some(rd) = args.render_distance {
            self.world.render_distance = rd;
        }
        if let Some(size) = args.chunk_size {
            self.world.chunk_size = size;
        }
        if let Some(zoom) = args.zoom {
            self.camera.zoom = zoom;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(42),
            render_distance: Some(1),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, Some(42));
        assert_eq!(config.world.render_distance, 1);
        // Non-overridden fields retain defaults
        assert_eq!(config.world.chunk_size, 8);
        assert_eq!(config.camera.zoom, 1.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "lantern",
            "--seed",
            "9",
            "--chunk-size",
            "16",
            "--frames",
            "10",
        ]);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.chunk_size, Some(16));
        assert_eq!(args.frames, 10);
        assert!(args.output.is_none());
    }
}
