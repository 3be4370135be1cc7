pub mod config;
pub mod error;
pub mod provider;
pub mod llm;
pub mod translate;
pub mod state;
pub mod routes;
pub mod client;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "translator_relay=debug,tower_http=debug";

/// Install the global tracing subscriber.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
