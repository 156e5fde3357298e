//! Logging and tracing setup.
//!
//! The provider logs through `tracing`. Output goes to **stderr** because the
//! host owns stdout.
//!
//! # Quick Start
//!
//! ```ignore
//! use coolify_provider::{init_logging, CoolifyProvider};
//!
//! init_logging();
//! tracing::info!("Starting Coolify provider");
//! let provider = CoolifyProvider::new();
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls log levels (e.g., `info`, `debug`, `coolify_provider=debug`)
//!
//! ```bash
//! # Show request-level debug logs for the provider only
//! RUST_LOG=coolify_provider=debug terraform apply
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Maximum number of body bytes written to a log line.
pub const MAX_LOG_BODY_LENGTH: usize = 200;

fn filter_or(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Initialize the default logging subscriber.
///
/// Reads `RUST_LOG`, defaulting to `info`.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default("info");
}

/// Initialize logging with a custom default level used when `RUST_LOG` is unset.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(filter_or(default_level))
        .with(stderr_layer())
        .init();
}

/// Try to initialize logging, returning false if already initialized.
///
/// Useful in tests, where several cases may race to install a subscriber.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(filter_or("info"))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}

/// Shorten a remote response body for a log line and strip control characters.
pub fn truncate_body(body: &str) -> String {
    let cleaned: String = body
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect();
    if cleaned.len() <= MAX_LOG_BODY_LENGTH {
        return cleaned;
    }
    let mut cut = MAX_LOG_BODY_LENGTH;
    while !cleaned.is_char_boundary(cut) {
        cut -= 1;
    }
    format!(
        "{}... [truncated, {} bytes total]",
        &cleaned[..cut],
        cleaned.len()
    )
}

#[cfg(test)]
mod tests {
    // The global subscriber can only be set once per process, so only the
    // pure helpers are covered here.

    use super::*;

    #[test]
    fn test_env_filter_parsing() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("coolify_provider=debug").is_ok());
        assert!(EnvFilter::try_new("warn,coolify_provider=trace").is_ok());
    }

    #[test]
    fn test_truncate_body_short() {
        assert_eq!(truncate_body("{\"message\":\"Not found.\"}"), "{\"message\":\"Not found.\"}");
        assert_eq!(truncate_body("line1\nline2"), "line1line2");
    }

    #[test]
    fn test_truncate_body_long() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("[truncated, 300 bytes total]"));
        assert!(out.len() < body.len() + 40);
    }

    #[test]
    fn test_try_init_is_idempotent() {
        let _ = try_init_logging();
        assert!(!try_init_logging());
    }
}
