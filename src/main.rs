//! EfmIO daemon entry point
//!
//! Reads the onboard sensors and reports them over the measurement link as
//! fixed 52-byte frames, one per conversion of the analog channel.

use efm_io::app::AcquisitionApp;
use efm_io::{AppConfig, Result};
use std::env;
use std::path::Path;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `efm-io <path>` (positional)
/// - `efm-io --config <path>` (flag-based)
/// - `efm-io -c <path>` (short flag)
///
/// Defaults to `/etc/efmio.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    // Look for --config or -c flag
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    // Fall back to first positional argument (if it doesn't start with -)
    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    // Default path
    "/etc/efmio.toml".to_string()
}

fn main() -> Result<()> {
    let config_path = parse_config_path();

    // Missing config falls back to sim defaults so the daemon can run
    // hardware-free out of the box
    let config = if Path::new(&config_path).exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::sim_defaults()
    };

    // RUST_LOG still takes precedence over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("EfmIO v{} starting...", env!("CARGO_PKG_VERSION"));
    log::info!("Using config: {}", config_path);

    let mut app = AcquisitionApp::new(&config)?;
    app.run()
}
