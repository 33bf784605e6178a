//! ## groundctl-telemetry::logging
//! **Structured logging with tracing and OpenTelemetry attributes**
//!
//! Logs are written to stderr; stdout belongs to the interactive menus.
//! Every remote write is recorded as an audit event carrying the resource
//! ids and the edited field.

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Install the global subscriber. `RUST_LOG` wins over `default_level`.
    /// A second call is a no-op.
    pub fn init(default_level: &str) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        if fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .is_err()
        {
            tracing::debug!("tracing subscriber already installed");
        }
    }

    pub fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!("audit_event", event_type = event_type, otel.kind = "INTERNAL");
        let _entered = span.enter();

        let fields: Vec<String> = metadata
            .iter()
            .map(|kv| format!("{}={}", kv.key.as_str(), kv.value.as_str()))
            .collect();
        tracing::info!(fields = %fields.join(" "), "{event_type}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_audit_event() {
        EventLogger::log_event(
            "config_updated",
            vec![
                KeyValue::new("config_id", "u-1"),
                KeyValue::new("field", "uplink EIRP"),
            ],
        );
        assert!(logs_contain("config_updated"));
        assert!(logs_contain("config_id=u-1"));
    }
}
