//! Tracing setup shared by Storeroom binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "storeroom_admin=info,storeroom_cli=info";

/// Set to `1` or `true` to log JSON lines instead of text.
pub const JSON_LOG_VAR: &str = "STOREROOM_LOG_JSON";

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. Defaults to
/// [`DEFAULT_FILTER`] if `RUST_LOG` is not set.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let json = json_enabled(std::env::var(JSON_LOG_VAR).ok().as_deref());
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn json_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
}
