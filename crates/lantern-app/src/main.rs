//! The `lantern` binary.

use std::process::ExitCode;

use clap::Parser;
use lantern_app::{AppError, PlatformDirs, Session, build_textures};
use lantern_config::{CliArgs, Config};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "lantern failed");
            eprintln!("lantern: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = PlatformDirs::resolve(args.config.as_deref());
    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;

    lantern_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    tracing::info!(
        config_dir = %dirs.config_dir.display(),
        frames = args.frames,
        "starting lantern"
    );

    let textures = build_textures(&config)?;
    let mut session = Session::new(&config, textures)?;
    let summary = session.run(args.frames);
    tracing::info!(snapshot = %summary.to_json(), "final state");

    if let Some(path) = &args.output {
        session.save_frame(path)?;
    }
    Ok(())
}
