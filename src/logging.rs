// Logging setup
//
// All diagnostics go through the `log` facade; this wires env_logger up as
// the backend. Applications with their own logger simply never call it.

use crate::config::Config;
use env_logger::{Builder, Target};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize env_logger once.
///
/// `RUST_LOG` takes precedence over `debug.log_filter`. With
/// `debug.log_to_file` set, records go to `debug.log_file` instead of
/// stderr. Later calls are ignored, as is a logger that some other crate
/// already installed.
pub fn init_logging(config: &Config) {
    INIT.call_once(|| {
        let (mut builder, file_error) = configure(config);

        if builder.try_init().is_err() {
            return;
        }
        log::debug!("logging initialized");

        if let Some(e) = file_error {
            log::warn!("Could not open log file {}: {}. Logging to stderr.", config.debug.log_file, e);
        }
    });
}

/// Build the env_logger configuration without installing it. A log file
/// that cannot be opened leaves the target on stderr and is handed back.
fn configure(config: &Config) -> (Builder, Option<io::Error>) {
    let mut builder = Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filter) => builder.parse_filters(&filter),
        Err(_) => builder.parse_filters(&config.debug.log_filter),
    };

    if !config.debug.log_to_file {
        return (builder, None);
    }

    match open_log_file(&config.debug.log_file) {
        Ok(file) => {
            builder.write_style(env_logger::WriteStyle::Never);
            builder.target(Target::Pipe(Box::new(file)));
            (builder, None)
        }
        Err(e) => (builder, Some(e)),
    }
}

/// Create/clear the log file and write its header.
fn open_log_file(path: &str) -> io::Result<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    writeln!(file, "=== gl-helpers log ===")?;
    writeln!(file, "Started: {:?}", std::time::SystemTime::now())?;
    writeln!(file)?;
    Ok(file)
}
