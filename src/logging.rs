//! Logging and tracing setup for Credential Gate.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used by the HTTP server when RUST_LOG is unset or invalid.
const SERVER_FILTER: &str = "credential_gate=info,tower_http=info";

/// Filter used by the terminal form; only problems reach the terminal.
const FORM_FILTER: &str = "credential_gate=warn";

/// JSON subscriber for the HTTP server, with source locations.
pub fn init() {
    tracing_subscriber::registry()
        .with(filter_from(std::env::var("RUST_LOG").ok().as_deref(), SERVER_FILTER))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Compact subscriber for the terminal form.
///
/// Writes to stderr so prompts and results on stdout stay clean.
pub fn init_form() {
    tracing_subscriber::registry()
        .with(filter_from(std::env::var("RUST_LOG").ok().as_deref(), FORM_FILTER))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Parse a RUST_LOG value, falling back when it is absent or malformed.
fn filter_from(directives: Option<&str>, fallback: &str) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}
