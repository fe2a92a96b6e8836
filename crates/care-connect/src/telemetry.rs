use crate::config::TelemetryConfig;
use std::fmt;
use tracing::info;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Name stamped on startup events and filter errors.
pub const SERVICE_NAME: &str = "care-connect";

/// Transport crates stay at `warn` unless `RUST_LOG` says otherwise.
const QUIET_DEPENDENCIES: &str = "hyper=warn,h2=warn";

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => write!(
                f,
                "{SERVICE_NAME} cannot use log filter '{value}' (check APP_LOG_LEVEL or RUST_LOG)"
            ),
            TelemetryError::Subscriber(err) => {
                write!(f, "{SERVICE_NAME} log subscriber already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// `RUST_LOG` wins verbatim; otherwise the configured level plus the dependency quieting.
pub(crate) fn build_filter(
    rust_log: Option<&str>,
    log_level: &str,
) -> Result<EnvFilter, TelemetryError> {
    let directives = match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.to_string(),
        None => format!("{},{QUIET_DEPENDENCIES}", log_level.trim()),
    };
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
        value: directives,
        source,
    })
}

/// Install the global fmt subscriber for the scoring service and the CLI.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_filter = build_filter(rust_log.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)?;

    info!(
        service = SERVICE_NAME,
        level = %config.log_level,
        "telemetry initialised"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_is_combined_with_dependency_quieting() {
        let filter = build_filter(None, "debug").expect("valid filter");
        let rendered = filter.to_string();
        assert!(rendered.contains("debug"));
        assert!(rendered.contains("hyper=warn"));
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        let filter = build_filter(Some("care_connect=trace"), "info").expect("valid filter");
        assert!(filter.to_string().contains("care_connect=trace"));
        assert!(!filter.to_string().contains("hyper"));
    }

    #[test]
    fn invalid_levels_name_the_service() {
        let error = build_filter(None, "care_connect=loud").expect_err("invalid level");
        let message = error.to_string();
        assert!(message.starts_with("care-connect cannot use log filter"));
        assert!(message.contains("care_connect=loud"));
    }
}
