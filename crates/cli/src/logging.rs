//! Logging setup
//!
//! Logs go to stderr so rendered tables on stdout stay clean.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events are shown without `RUST_LOG`
const LOG_TARGETS: [&str; 3] = [
    "queue_toggle",
    "queue_toggle_core",
    "queue_toggle_infra_platform",
];

/// Filter used when `RUST_LOG` is unset.
///
/// Quiet by default (warnings only) so command output stays readable;
/// `-v` raises it to info, `-vv` to debug.
fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing.
///
/// # Environment Variables
///
/// - `RUST_LOG`: overrides the filter derived from `verbosity`
/// - `QUEUE_TOGGLE_LOG_FORMAT`: `json` for structured output, anything else for pretty
pub fn init(verbosity: u8) -> Result<()> {
    let log_format =
        std::env::var("QUEUE_TOGGLE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(verbosity)))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install tracing subscriber")?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install tracing subscriber")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_directives_name_every_crate() {
        assert_eq!(
            default_directives(0),
            "queue_toggle=warn,queue_toggle_core=warn,queue_toggle_infra_platform=warn"
        );
        assert!(default_directives(1).split(',').all(|d| d.ends_with("=info")));
        assert!(default_directives(5).split(',').all(|d| d.ends_with("=debug")));
    }

    #[test]
    fn test_default_directives_parse() {
        for verbosity in 0..3 {
            assert!(EnvFilter::try_new(default_directives(verbosity)).is_ok());
        }
    }
}
