//! Tracing subscriber setup shared by the CLI and the desktop app.
//!
//! Filter priority: `SPT_LAUNCHER_LOG`, then `RUST_LOG`, then the verbosity
//! default (`warn`, or `debug` for this crate when verbose). Logs go to stderr.

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SPT_LAUNCHER_LOG";

pub fn init(verbose: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(fmt_layer.without_time().compact())
        .try_init();
}

fn build_filter(verbose: bool) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if verbose {
        EnvFilter::new("warn,spt_launcher_lib=debug,spt_detect=debug")
    } else {
        EnvFilter::new("warn")
    }
}
