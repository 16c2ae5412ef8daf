//! Logging setup
//!
//! The library only emits `tracing` events. Applications that want to see
//! them can install a subscriber here, driven by the `debug` setting.

use crate::config::Settings;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
fn default_directive(settings: &Settings) -> &'static str {
    if settings.debug {
        "caselink=debug"
    } else {
        "warn"
    }
}

/// Install a formatting subscriber on stderr.
///
/// `RUST_LOG` wins over the `debug` setting. Returns false if a global
/// subscriber was already installed.
pub fn init(settings: &Settings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .is_ok()
}
