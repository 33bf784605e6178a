//! Operator input validation.
//!
//! Every free-text prompt is bound to exactly one [`InputKind`]. Numeric kinds
//! accept a canonical decimal integer (no sign, no leading zeros, no
//! whitespace) and then check it against the licensed range for the field.

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Contact pre/post pass and minimum viable contact duration, seconds.
pub const DURATION_SECONDS: RangeInclusive<u32> = 1..=300;
/// Uplink target EIRP, dBW.
pub const UPLINK_EIRP_DBW: RangeInclusive<u32> = 20..=50;
/// Uplink center frequency, MHz.
pub const UPLINK_FREQUENCY_MHZ: RangeInclusive<u32> = 2025..=2120;
/// Downlink center frequency bands, MHz (S-band and X-band).
pub const DOWNLINK_FREQUENCY_BANDS_MHZ: [RangeInclusive<u32>; 2] = [2200..=2300, 7750..=8400];
/// Downlink bandwidth, kHz.
pub const DOWNLINK_BANDWIDTH_KHZ: RangeInclusive<u32> = 10..=40_000;

static CANONICAL_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]{0,8}$").expect("static regex"));

static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\-\s]+$").expect("static regex"));

/// Rejections, worded for the operator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a valid duration value in seconds [1-300]")]
    Duration,
    #[error("Please enter a valid name. Allowed characters: a-z, A-Z, 0-9, -, and space")]
    Name,
    #[error("Please enter a valid EIRP dBW value [20-50]")]
    UplinkEirp,
    #[error("This uplink center frequency is not supported. Valid values are between 2025 to 2120 MHz, for which you are licenced.")]
    UplinkFrequency,
    #[error("This downlink center frequency is not supported. Valid values are between 2200 to 2300 MHz and 7750 to 8400 MHz, for which you are licenced.")]
    DownlinkFrequency,
    #[error("This downlink bandwidth is not supported. Valid values are between 10 and 40000 kHz, for which you are licenced.")]
    DownlinkBandwidth,
}

/// The field a free-text prompt collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Duration,
    Name,
    UplinkEirp,
    UplinkFrequency,
    DownlinkFrequency,
    DownlinkBandwidth,
}

impl InputKind {
    /// Accept or reject raw operator text for this field.
    pub fn check(self, input: &str) -> Result<(), InputError> {
        match self {
            InputKind::Duration => parse_duration(input).map(drop),
            InputKind::Name => validate_name(input).map(drop),
            InputKind::UplinkEirp => parse_uplink_eirp(input).map(drop),
            InputKind::UplinkFrequency => parse_uplink_frequency(input).map(drop),
            InputKind::DownlinkFrequency => parse_downlink_frequency(input).map(drop),
            InputKind::DownlinkBandwidth => parse_downlink_bandwidth(input).map(drop),
        }
    }
}

fn parse_integer(input: &str) -> Option<u32> {
    if !CANONICAL_INTEGER.is_match(input) {
        return None;
    }
    input.parse().ok()
}

fn parse_in(input: &str, ranges: &[RangeInclusive<u32>], err: InputError) -> Result<u32, InputError> {
    parse_integer(input)
        .filter(|n| ranges.iter().any(|r| r.contains(n)))
        .ok_or(err)
}

pub fn parse_duration(input: &str) -> Result<u32, InputError> {
    parse_in(input, &[DURATION_SECONDS], InputError::Duration)
}

/// Letters, digits, hyphens and whitespace.
///
/// Empty input is rejected: a mission profile cannot be renamed to nothing,
/// and the service refuses a blank name on update anyway.
pub fn validate_name(input: &str) -> Result<&str, InputError> {
    if NAME.is_match(input) {
        Ok(input)
    } else {
        Err(InputError::Name)
    }
}

pub fn parse_uplink_eirp(input: &str) -> Result<u32, InputError> {
    parse_in(input, &[UPLINK_EIRP_DBW], InputError::UplinkEirp)
}

pub fn parse_uplink_frequency(input: &str) -> Result<u32, InputError> {
    parse_in(input, &[UPLINK_FREQUENCY_MHZ], InputError::UplinkFrequency)
}

pub fn parse_downlink_frequency(input: &str) -> Result<u32, InputError> {
    parse_in(input, &DOWNLINK_FREQUENCY_BANDS_MHZ, InputError::DownlinkFrequency)
}

pub fn parse_downlink_bandwidth(input: &str) -> Result<u32, InputError> {
    parse_in(input, &[DOWNLINK_BANDWIDTH_KHZ], InputError::DownlinkBandwidth)
}
