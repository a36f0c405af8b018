//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,quiz=debug,ezquiz=debug,tower_http=info,axum=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//! - Play mode logs to stderr at `warn` by default so stdout stays readable.

use tracing_subscriber::EnvFilter;

const SERVER_FILTER: &str = "info,quiz=debug,ezquiz=debug,tower_http=info,axum=info";
const PLAY_FILTER: &str = "warn";

pub fn init_tracing(interactive: bool) {
    let default = if interactive { PLAY_FILTER } else { SERVER_FILTER };
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(!interactive)
        .with_line_number(!interactive);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => {
            builder.json().init();
        }
        _ => {
            builder.init();
        }
    }
}
