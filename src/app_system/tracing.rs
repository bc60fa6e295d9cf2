use tracing_subscriber::EnvFilter;

/// Marketplace spans at `info`, everything else (tokio internals included)
/// only from `warn` up.
pub const DEFAULT_LOG_FILTER: &str = "marketplace=info,warn";

/// Configure tracing once at application startup for the entire process.
///
/// `RUST_LOG` replaces [`DEFAULT_LOG_FILTER`] when it is set, non-blank and
/// parses:
/// ```bash
/// RUST_LOG=marketplace=debug cargo run
/// RUST_LOG=marketplace::actors=debug,marketplace=info cargo run
/// ```
pub fn setup_tracing() {
    let directives = log_directives(std::env::var("RUST_LOG").ok());
    let env_filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}

fn log_directives(rust_log: Option<String>) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => DEFAULT_LOG_FILTER.to_string(),
    }
}
