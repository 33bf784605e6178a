//! Whole-object update builders.
//!
//! The remote API has no partial-patch semantics: any field left out of an
//! update is reset to its default. Updates therefore start from an immutable
//! snapshot of the current resource, clone it, and replace exactly one field.

use thiserror::Error;

use crate::model::{
    Config, ConfigData, ConfigType, Criticality, Eirp, Frequency, FrequencyBandwidth,
    MissionProfile,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot apply {edit} to a {actual} config")]
pub struct EditError {
    pub edit: &'static str,
    pub actual: ConfigType,
}

/// A single-field change to a mission profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEdit {
    Name(String),
    MinimumViableContactDuration(u32),
    ContactPrePassDuration(u32),
    ContactPostPassDuration(u32),
}

impl ProfileEdit {
    /// Short operator-facing name of the edited field.
    pub fn field(&self) -> &'static str {
        match self {
            ProfileEdit::Name(_) => "name",
            ProfileEdit::MinimumViableContactDuration(_) => "minimum contact",
            ProfileEdit::ContactPrePassDuration(_) => "prepass",
            ProfileEdit::ContactPostPassDuration(_) => "postpass",
        }
    }
}

/// A single-field change to a config. Unit strings are forced: frequencies
/// are written in MHz, bandwidth in kHz and EIRP in dBW.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigEdit {
    Autotrack(Criticality),
    UplinkEirp(f64),
    UplinkCenterFrequency(f64),
    DownlinkCenterFrequency(f64),
    DownlinkBandwidth(f64),
}

impl ConfigEdit {
    pub fn field(&self) -> &'static str {
        match self {
            ConfigEdit::Autotrack(_) => "autotrack",
            ConfigEdit::UplinkEirp(_) => "uplink EIRP",
            ConfigEdit::UplinkCenterFrequency(_) => "uplink center frequency",
            ConfigEdit::DownlinkCenterFrequency(_) => "downlink center frequency",
            ConfigEdit::DownlinkBandwidth(_) => "downlink bandwidth",
        }
    }

    /// Config type this edit applies to.
    pub fn target(&self) -> ConfigType {
        match self {
            ConfigEdit::Autotrack(_) => ConfigType::Tracking,
            ConfigEdit::UplinkEirp(_) | ConfigEdit::UplinkCenterFrequency(_) => {
                ConfigType::AntennaUplink
            }
            ConfigEdit::DownlinkCenterFrequency(_) | ConfigEdit::DownlinkBandwidth(_) => {
                ConfigType::AntennaDownlink
            }
        }
    }
}

/// Builds a replacement mission profile from a snapshot.
#[derive(Debug)]
pub struct ProfileUpdate<'a> {
    snapshot: &'a MissionProfile,
}

impl<'a> ProfileUpdate<'a> {
    pub fn from_snapshot(snapshot: &'a MissionProfile) -> Self {
        Self { snapshot }
    }

    pub fn apply(self, edit: ProfileEdit) -> MissionProfile {
        let mut next = self.snapshot.clone();
        match edit {
            ProfileEdit::Name(name) => next.name = name,
            ProfileEdit::MinimumViableContactDuration(s) => {
                next.minimum_viable_contact_duration_seconds = s
            }
            ProfileEdit::ContactPrePassDuration(s) => next.contact_pre_pass_duration_seconds = s,
            ProfileEdit::ContactPostPassDuration(s) => next.contact_post_pass_duration_seconds = s,
        }
        next
    }
}

/// Builds a replacement config from a snapshot.
#[derive(Debug)]
pub struct ConfigUpdate<'a> {
    snapshot: &'a Config,
}

impl<'a> ConfigUpdate<'a> {
    pub fn from_snapshot(snapshot: &'a Config) -> Self {
        Self { snapshot }
    }

    pub fn apply(self, edit: ConfigEdit) -> Result<Config, EditError> {
        let mut next = self.snapshot.clone();
        match (&mut next.config_data, edit) {
            (ConfigData::Tracking(tracking), ConfigEdit::Autotrack(mode)) => {
                tracking.autotrack = mode;
            }
            (ConfigData::AntennaUplink(uplink), ConfigEdit::UplinkEirp(dbw)) => {
                uplink.target_eirp = Eirp::dbw(dbw);
            }
            (ConfigData::AntennaUplink(uplink), ConfigEdit::UplinkCenterFrequency(mhz)) => {
                uplink.spectrum_config.center_frequency = Frequency::mhz(mhz);
            }
            (ConfigData::AntennaDownlink(downlink), ConfigEdit::DownlinkCenterFrequency(mhz)) => {
                downlink.spectrum_config.center_frequency = Frequency::mhz(mhz);
            }
            (ConfigData::AntennaDownlink(downlink), ConfigEdit::DownlinkBandwidth(khz)) => {
                downlink.spectrum_config.bandwidth = FrequencyBandwidth::khz(khz);
            }
            (data, edit) => {
                return Err(EditError {
                    edit: edit.field(),
                    actual: data.config_type(),
                })
            }
        }
        Ok(next)
    }
}
