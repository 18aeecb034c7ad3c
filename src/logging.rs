//! Logging setup for the terminal client and dev node
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `NODEWALLET_LOG` | filter directives, e.g. `nodewallet=debug,tower_http=info` |
//! | `RUST_LOG` | used when `NODEWALLET_LOG` is unset or invalid |
//! | `NODEWALLET_LOG_JSON=1` | one JSON object per line |
//!
//! Everything goes to stderr so command output on stdout stays parseable.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILTER_VAR: &str = "NODEWALLET_LOG";
pub const LOG_JSON_VAR: &str = "NODEWALLET_LOG_JSON";

const DEFAULT_FILTER: &str = "info";

/// `NODEWALLET_LOG`, then `RUST_LOG`, then `info`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_logging() {
    let use_json = std::env::var(LOG_JSON_VAR)
        .map(|value| value == "1")
        .unwrap_or(false);

    if use_json {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter())
            .json()
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter())
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_precedence() {
        std::env::remove_var("RUST_LOG");

        std::env::set_var(LOG_FILTER_VAR, "nodewallet=debug");
        assert_eq!(env_filter().to_string(), "nodewallet=debug");

        // Unparseable directives fall through to RUST_LOG
        std::env::set_var(LOG_FILTER_VAR, "nodewallet=loud");
        std::env::set_var("RUST_LOG", "warn");
        assert_eq!(env_filter().to_string(), "warn");

        std::env::remove_var(LOG_FILTER_VAR);
        std::env::remove_var("RUST_LOG");
        assert_eq!(env_filter().to_string(), DEFAULT_FILTER);
    }
}
