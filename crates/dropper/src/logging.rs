// ABOUTME: tracing subscriber setup for the dropper binary.
// ABOUTME: Logs go to stderr so the archived document on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` for
/// this crate when `verbose` is on. Calling this twice is harmless.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,dropper=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
