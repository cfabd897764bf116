//! Subscriber initialization for the daemon and tests.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber: `VIGIL_LOG` (or `RUST_LOG`) env filter,
/// compact output, optional JSON for log shippers.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env("VIGIL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt().with_env_filter(filter).with_target(false);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    // A second init (tests) is fine; keep the first subscriber.
    let _ = result;
}
