//! Log subscriber setup shared by both binaries
//!
//! `RUST_LOG` wins when it is set and parses. Otherwise the level comes from
//! the `--verbose` / `--debug` flags (warn by default).

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is not set
pub fn default_level(verbose: bool, debug: bool) -> &'static str {
    if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    }
}

/// Filter from a `RUST_LOG` value, falling back to `default_level`
pub fn log_filter(rust_log: Option<&str>, default_level: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

/// Install the stderr subscriber
pub fn init(default_level: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), default_level))
        .with_writer(std::io::stderr)
        .init();
}
