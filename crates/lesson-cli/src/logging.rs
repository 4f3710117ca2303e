use tracing_subscriber::EnvFilter;

pub(crate) const LOG_ENV: &str = "LESSON_LOG";

/// `$LESSON_LOG` first, then the configured filter.
pub(crate) fn resolve_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(configured))
}

/// Installs the stderr subscriber. Stdout carries the agent protocol, so
/// nothing is logged there. Later calls in the same process are no-ops.
pub(crate) fn init_logging(configured: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod logging_tests {
    use super::*;

    #[test]
    fn configured_filter_applies_without_env_override() {
        if std::env::var_os(LOG_ENV).is_some() {
            return;
        }
        assert_eq!(
            resolve_filter("lesson_runtime=debug").to_string(),
            "lesson_runtime=debug"
        );
    }

    #[test]
    fn init_logging_twice_is_harmless() {
        init_logging("warn");
        init_logging("debug");
    }
}
