// src/log.rs
//
// File logging. Everything goes to `.store/debug.log` with elapsed-time stamps;
// the terminal only ever sees progress lines and the final error report.

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt::time::uptime};

use crate::config::consts::LOG_FILE;

/// Install the global subscriber. Call once, from the binary.
///
/// `level` is an `EnvFilter` directive (e.g. `"info"`, `"imdb_scrape=debug"`);
/// `RUST_LOG` wins when set.
pub fn init(level: &str, store_dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(store_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(store_dir.join(LOG_FILE))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(uptime())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| format!("logger already installed: {e}"))?;

    Ok(())
}

/// Map `-v` repetitions to a filter directive.
pub fn level_for(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => s!(configured),
        1 => s!("debug"),
        _ => s!("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        assert_eq!(level_for(0, "warn"), "warn");
        assert_eq!(level_for(1, "warn"), "debug");
        assert_eq!(level_for(4, "warn"), "trace");
    }
}
