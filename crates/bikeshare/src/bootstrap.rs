use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to an [`EnvFilter`] directive.
///
/// Accepts the upper-case names offered on the command line as well as plain
/// tracing level names, in any case. Unknown names map to `"info"`.
pub fn normalise_level(log_level: &str) -> &'static str {
    match log_level.trim().to_uppercase().as_str() {
        "TRACE" => "trace",
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Log lines go to stderr so they never interleave with report text on
/// stdout.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = build_filter(log_level);

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::new(normalise_level(log_level))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
