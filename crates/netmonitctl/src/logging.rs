//! Log subscriber for netmonitctl.
//!
//! Events go to stderr so stdout only carries answers. `--verbose` forces
//! debug; otherwise `RUST_LOG` applies, defaulting to warn.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "debug";

/// Filter directive for the given flag and `RUST_LOG` value
pub fn directive(verbose: bool, rust_log: Option<&str>) -> String {
    if verbose {
        return VERBOSE_DIRECTIVE.to_string();
    }
    match rust_log.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

/// Install the global subscriber; a second call is a no-op
pub fn init(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::try_new(directive(verbose, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_precedence() {
        assert_eq!(directive(true, Some("info")), "debug");
        assert_eq!(directive(false, Some("netmonit_core=trace")), "netmonit_core=trace");
        assert_eq!(directive(false, Some("  ")), "warn");
        assert_eq!(directive(false, None), "warn");
    }
}
