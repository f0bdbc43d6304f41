use std::sync::OnceLock;

use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Route `log` and `tracing` output for the builder to stdout.
///
/// Filtering follows `RUST_LOG` and falls back to `info`. Only the first call
/// installs anything. An already registered logger or subscriber is left in
/// place.
pub fn init_tracing() {
    INSTALLED.get_or_init(install);
}

fn install() {
    let _ = LogTracer::init();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let output = fmt::layer()
        .compact()
        .with_ansi(false)
        .with_timer(SystemTime);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init();
}
