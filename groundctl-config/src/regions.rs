//! Regions offered by the region selector.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct RegionChoice {
    /// Human name, e.g. `Ohio`.
    #[validate(length(min = 1))]
    pub label: String,

    /// AWS region code, e.g. `us-east-2`.
    #[validate(custom(function = validation::validate_region_code))]
    pub code: String,
}

impl RegionChoice {
    pub fn new(label: &str, code: &str) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for RegionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.code)
    }
}

/// Regions where Ground Station antennas are offered.
pub fn default_regions() -> Vec<RegionChoice> {
    vec![
        RegionChoice::new("N. Virginia", "us-east-1"),
        RegionChoice::new("Ohio", "us-east-2"),
        RegionChoice::new("Oregon", "us-west-2"),
        RegionChoice::new("Cape Town", "af-south-1"),
        RegionChoice::new("Seoul", "ap-northeast-2"),
        RegionChoice::new("Sydney", "ap-southeast-2"),
        RegionChoice::new("Frankfurt", "eu-central-1"),
        RegionChoice::new("Ireland", "eu-west-1"),
        RegionChoice::new("Stockholm", "eu-north-1"),
        RegionChoice::new("Bahrain", "me-south-1"),
        RegionChoice::new("Sao Paulo", "sa-east-1"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eleven_valid_defaults() {
        let regions = default_regions();
        assert_eq!(regions.len(), 11);
        for region in &regions {
            region.validate().expect("default region should validate");
        }
        assert_eq!(regions[0].to_string(), "N. Virginia (us-east-1)");
    }
}
