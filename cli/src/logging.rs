//! Logging setup for the REPL.
//!
//! Logs go to stderr so they don't interleave with command output. Set
//! `DEBUG_LOGGING=1` to enable debug output for swingmeter crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter_directive = if debug_logging {
        "info,swingmeter_core=debug,swingmeter_cli=debug"
    } else {
        "info"
    };

    let filter = EnvFilter::new(filter_directive);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(debug_logging, "logging initialized");
}
