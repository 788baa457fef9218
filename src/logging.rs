//! Debug log set-up.
//!
//! The terminal belongs to the UI, so logs go to
//! `~/.colorman/debug/colorman.log` and only when `COLORMAN_DEBUG=1` or
//! `debug_log` is set in settings. `COLORMAN_LOG` takes an `EnvFilter`
//! directive (default `info`).

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const DEBUG_ENV: &str = "COLORMAN_DEBUG";
pub const FILTER_ENV: &str = "COLORMAN_LOG";

pub fn debug_requested(settings_flag: bool) -> bool {
    settings_flag || std::env::var(DEBUG_ENV).map(|v| v == "1").unwrap_or(false)
}

/// Install the global subscriber writing to `dir/colorman.log`.
pub fn init(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("colorman.log"))?;

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(io::Error::other)
}
