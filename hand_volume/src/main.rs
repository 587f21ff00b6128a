//! hand_volume: interactive entry point.

use anyhow::{Context, Result};
use clap::Parser;
use hand_volume::app::run;
use hand_volume::config::Cli;
use hold_menu::timing::HOLD_THRESHOLD;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log.as_deref()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(2);
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Hand Volume: Gesture Menu & Volume Control          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Mode: camera {}  (MediaPipe detector: {})", cli.camera, cli.detector.display());
    #[cfg(not(feature = "camera"))]
    println!("  Mode: Keyboard simulation  (use --features camera for a webcam)");
    println!("  Hold a gesture for {} s to commit it.  Q quits.", HOLD_THRESHOLD.as_secs());
    println!();

    if let Err(e) = start(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn start(cli: Cli) -> Result<()> {
    let cfg = cli.into_config();
    run(cfg).context("hand volume controller stopped")
}

fn init_logging(filter: Option<&str>) -> Result<()> {
    let env_filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid --log filter `{}`", directives))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
    Ok(())
}
