//! Diagnostics for `cz` itself, kept apart from what the user is told.
//!
//! Prompts, the composed message, git's output and the success or failure
//! line all go through [`crate::io::report::Reporter`] and are printed no
//! matter how logging is set up. Tracing events here describe the workflow
//! (staging check, backup reads and writes, git timeouts) and only show up
//! when `RUST_LOG` asks for them:
//!
//! ```bash
//! RUST_LOG=convcommit=debug cz commit --retry --dry-run
//! RUST_LOG=convcommit::io::process=debug cz commit
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when `RUST_LOG` is unset or unparsable. Timeouts and failed
/// commits log at `warn`, so they stay visible.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the stderr subscriber. Call once, before any command runs.
pub fn init() {
    let ansi = std::env::var_os("NO_COLOR").is_none();
    tracing_subscriber::registry()
        .with(filter_from(std::env::var("RUST_LOG").ok().as_deref()))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_target(true)
                .compact(),
        )
        .init();
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> String {
        EnvFilter::new(DEFAULT_DIRECTIVE).to_string()
    }

    #[test]
    fn missing_or_bad_directives_fall_back_to_warn() {
        assert_eq!(filter_from(None).to_string(), fallback());
        assert_eq!(filter_from(Some("convcommit=loud")).to_string(), fallback());
    }

    #[test]
    fn crate_directive_is_kept() {
        let filter = filter_from(Some("convcommit=debug")).to_string();
        assert_ne!(filter, fallback());
        assert!(filter.contains("convcommit"));
    }
}
