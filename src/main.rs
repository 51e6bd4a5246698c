//! Entry point for the **fvwm3-status** daemon.
//!
//! Opens the status pipe, discovers monitors, then runs ingestion on a
//! background thread while the main thread writes composed lines to
//! standard output.  Startup faults and input/output failures are logged
//! and the process exits with status 1.

use fvwm3_status::config::Config;
use fvwm3_status::diagnostics::{DiagnosticsServer, Stats};
use fvwm3_status::fifo::reader::{FifoError, FifoSource};
use fvwm3_status::pipeline::{self, PipelineError};
use fvwm3_status::registry::{discover, DiscoveryError};
use fvwm3_status::status::StatusLine;
use fvwm3_status::xrandr::monitors::XrandrMonitors;
use log::{error, info};
use std::sync::Arc;

/// Faults that stop the daemon with a non-zero status.
#[derive(Debug, thiserror::Error)]
enum DaemonError {
    #[error(transparent)]
    Pipe(#[from] FifoError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError<FifoError>),
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/fvwm3-status`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("fvwm3-status")
}

/// Load `config.json` if present, then apply environment overrides.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    let mut config = match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    };
    config.apply_env(|name| std::env::var(name).ok());
    config
}

//  Main

fn main() {
    env_logger::init();

    if let Err(e) = run(load_config()) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), DaemonError> {
    let source = FifoSource::open(&config.pipe)?;
    let stats = Arc::new(Stats::default());

    if config.diagnostics.enabled {
        spawn_diagnostics(&config, stats.clone());
    }

    let monitors = discover(&XrandrMonitors::new())?;
    let status = StatusLine::new(monitors, config.theme.clone());

    pipeline::run(source, status, std::io::stdout().lock(), stats)?;
    info!("input closed, exiting");
    Ok(())
}

//  Helpers

fn spawn_diagnostics(config: &Config, stats: Arc<Stats>) {
    match DiagnosticsServer::bind(config.diagnostics.listen, stats) {
        Ok(server) => {
            std::thread::spawn(move || server.run());
        }
        Err(e) => error!("diagnostics disabled: {}", e),
    }
}
