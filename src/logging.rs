use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// Logs go to stderr so that command output on stdout stays clean for
/// piping. `RUST_LOG` takes precedence over the default directive.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let default_directive = if verbose {
            "fintrack=debug"
        } else {
            "fintrack=warn"
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
