//! Remote client settings.
//!
//! Retries happen inside the SDK transport; the tool itself never retries.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct ClientConfig {
    /// Total attempts per call, first try included.
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// SDK retry strategy (standard or adaptive).
    #[validate(custom(function = validation::validate_retry_mode))]
    #[serde(default = "default_retry_mode")]
    pub retry_mode: String,

    /// Endpoint override, e.g. for a local stub service.
    #[validate(url)]
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_max_attempts() -> u32 {
    4
}

fn default_retry_mode() -> String {
    "standard".into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_mode: default_retry_mode(),
            endpoint_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        ClientConfig::default()
            .validate()
            .expect("Default client config should be valid");
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = ClientConfig {
            max_attempts: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn endpoint_must_be_url() {
        let config = ClientConfig {
            endpoint_url: Some("not a url".into()),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
