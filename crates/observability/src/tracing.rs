//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ObservabilityConfig};

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). An invalid
/// filter string falls back to `info` and is reported once the subscriber is up.
pub fn init(config: &ObservabilityConfig) {
    let (filter, rejected) = resolve_filter(&config.filter);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let _ = match config.format {
        LogFormat::Json => builder.json().with_target(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    if let Some(err) = rejected {
        ::tracing::warn!(
            filter = %config.filter,
            error = %format!("{err:#}"),
            "invalid log filter; using 'info'"
        );
    }
}

/// The filter to install, plus the parse error when `directives` was rejected.
fn resolve_filter(directives: &str) -> (EnvFilter, Option<anyhow::Error>) {
    match build_filter(directives) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    }
}

fn build_filter(directives: &str) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::try_new(directives)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_directives() {
        assert!(build_filter("estatecms_auth=loud").is_err());
        assert!(build_filter("estatecms_auth=trace,info").is_ok());
    }

    #[test]
    fn malformed_filter_falls_back_to_info_and_keeps_the_error() {
        let (_, rejected) = resolve_filter("estatecms_auth=loud");
        assert!(rejected.is_some());

        let (_, rejected) = resolve_filter("estatecms_access=debug");
        assert!(rejected.is_none());
    }

    #[test]
    fn init_with_malformed_filter_does_not_panic() {
        let config = ObservabilityConfig {
            filter: "estatecms_auth=loud".to_string(),
            ..ObservabilityConfig::default()
        };
        init(&config);
    }

    #[test]
    fn init_twice_is_harmless() {
        let config = ObservabilityConfig::default();
        init(&config);
        init(&config);
    }
}
