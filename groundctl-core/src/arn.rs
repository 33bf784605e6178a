//! ## groundctl-core::arn
//! Decoder for composite config identifiers.
//!
//! Config ARNs end in `.../<config-type>/<config-id>`; everything before the
//! first `/` (the `arn:partition:service:region:account:config` part) is
//! carried through untouched. Anything that does not split into exactly
//! three non-empty segments is rejected instead of being indexed blindly.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::ConfigType;

/// Errors raised while decoding a resource path.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("malformed resource path: {0}")]
    MalformedPath(String),
    #[error("unknown config type: {0}")]
    UnknownConfigType(String),
}

/// Typed `(config type, config id)` pair decoded from a resource path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigRef {
    pub config_type: ConfigType,
    pub config_id: String,
}

impl ConfigRef {
    pub fn new(config_type: ConfigType, config_id: impl Into<String>) -> Self {
        Self {
            config_type,
            config_id: config_id.into(),
        }
    }
}

impl fmt::Display for ConfigRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.config_type, self.config_id)
    }
}

impl FromStr for ConfigRef {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let mut segments = path.split('/');
        let (Some(prefix), Some(config_type), Some(config_id), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(PathError::MalformedPath(path.to_string()));
        };

        if prefix.is_empty() || config_type.is_empty() || config_id.is_empty() {
            return Err(PathError::MalformedPath(path.to_string()));
        }

        Ok(ConfigRef {
            config_type: config_type.parse()?,
            config_id: config_id.to_string(),
        })
    }
}

/// Decodes a config ARN into its type and id.
pub fn parse_config_ref(path: &str) -> Result<ConfigRef, PathError> {
    path.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_short_path() {
        let r = parse_config_ref("a/antenna-uplink/xyz123").unwrap();
        assert_eq!(r.config_type, ConfigType::AntennaUplink);
        assert_eq!(r.config_type.as_str(), "antenna-uplink");
        assert_eq!(r.config_id, "xyz123");
    }

    #[test]
    fn decodes_full_arn() {
        let r = parse_config_ref(
            "arn:aws:groundstation:us-east-2:123456789012:config/tracking/9940bf3b-9e1f-4f1c",
        )
        .unwrap();
        assert_eq!(r, ConfigRef::new(ConfigType::Tracking, "9940bf3b-9e1f-4f1c"));
        assert_eq!(r.to_string(), "tracking/9940bf3b-9e1f-4f1c");
    }

    #[test]
    fn rejects_wrong_segment_count() {
        for path in ["", "config", "a/tracking", "a/tracking/id/extra"] {
            assert_eq!(
                parse_config_ref(path),
                Err(PathError::MalformedPath(path.to_string())),
                "{path}"
            );
        }
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(matches!(
            parse_config_ref("a/tracking/"),
            Err(PathError::MalformedPath(_))
        ));
        assert!(matches!(
            parse_config_ref("/tracking/id"),
            Err(PathError::MalformedPath(_))
        ));
    }

    #[test]
    fn rejects_unknown_type() {
        assert_eq!(
            parse_config_ref("a/antenna-sideways/id"),
            Err(PathError::UnknownConfigType("antenna-sideways".into()))
        );
    }
}
