//! ## groundctl-engine::edit
//! Update flows for a selected mission profile.
//!
//! Each flow re-reads the current resource, asks for one validated value,
//! builds the full replacement from that snapshot and submits it once.
//! Rejected submissions are printed for the operator and recorded as
//! `update_failed` audit events; the session then returns to the top menu.

use std::io::Write;

use opentelemetry::KeyValue;
use tracing::{info, warn};

use groundctl_core::model::{
    AntennaDownlinkConfig, AntennaUplinkConfig, Config, ConfigData, ConfigType, Criticality,
    MissionProfile,
};
use groundctl_core::validate::{
    parse_downlink_bandwidth, parse_downlink_frequency, parse_duration, parse_uplink_eirp,
    parse_uplink_frequency, validate_name,
};
use groundctl_core::{
    parse_config_ref, ConfigEdit, ConfigRef, ConfigUpdate, GroundStation, InputKind, PathError,
    ProfileEdit, ProfileUpdate,
};
use groundctl_telemetry::EventLogger;

use crate::menu::Next;
use crate::prompt::Prompter;
use crate::EngineError;

const WARNING: &str =
    "Updating a mission profile will not update the execution parameters for existing future contacts.";
const OTHER_HINT: &str = "Updating other parameters is best done by redeploying the CloudFormation template for your AWS Ground Station configuration.";
const NO_UPLINK: &str =
    "There is no antenna uplink config in this mission profile. Exiting to main menu.";
const NO_DOWNLINK: &str =
    "There is no antenna digIf downlink config in this mission profile. Exiting to main menu.";

/// Entries of the update menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditChoice {
    Name,
    UplinkPower,
    UplinkCenterFrequency,
    DownlinkCenterFrequency,
    DownlinkBandwidth,
    MinimumContactDuration,
    PrePassDuration,
    PostPassDuration,
    Tracking,
    Other,
    Quit,
}

impl EditChoice {
    pub const ALL: [EditChoice; 11] = [
        EditChoice::Name,
        EditChoice::UplinkPower,
        EditChoice::UplinkCenterFrequency,
        EditChoice::DownlinkCenterFrequency,
        EditChoice::DownlinkBandwidth,
        EditChoice::MinimumContactDuration,
        EditChoice::PrePassDuration,
        EditChoice::PostPassDuration,
        EditChoice::Tracking,
        EditChoice::Other,
        EditChoice::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditChoice::Name => "Mission profile name",
            EditChoice::UplinkPower => "Uplink power",
            EditChoice::UplinkCenterFrequency => "Uplink center frequency",
            EditChoice::DownlinkCenterFrequency => "DigIF Downlink center frequency",
            EditChoice::DownlinkBandwidth => "DigIF Downlink bandwidth",
            EditChoice::MinimumContactDuration => "Minimum viable contact duration",
            EditChoice::PrePassDuration => "Contact prepass duration",
            EditChoice::PostPassDuration => "Contact postpass duration",
            EditChoice::Tracking => "Antenna tracking",
            EditChoice::Other => "Other",
            EditChoice::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum DurationField {
    MinimumContact,
    PrePass,
    PostPass,
}

impl DurationField {
    fn current(self, profile: &MissionProfile) -> u32 {
        match self {
            DurationField::MinimumContact => profile.minimum_viable_contact_duration_seconds,
            DurationField::PrePass => profile.contact_pre_pass_duration_seconds,
            DurationField::PostPass => profile.contact_post_pass_duration_seconds,
        }
    }

    fn edit(self, seconds: u32) -> ProfileEdit {
        match self {
            DurationField::MinimumContact => ProfileEdit::MinimumViableContactDuration(seconds),
            DurationField::PrePass => ProfileEdit::ContactPrePassDuration(seconds),
            DurationField::PostPass => ProfileEdit::ContactPostPassDuration(seconds),
        }
    }
}

/// Drives one edit of the mission profile `profile_id`.
pub(crate) struct EditFlow<'a, P, W> {
    gs: &'a dyn GroundStation,
    profile_id: &'a str,
    prompter: &'a mut P,
    out: &'a mut W,
}

impl<'a, P: Prompter, W: Write> EditFlow<'a, P, W> {
    pub(crate) fn new(
        gs: &'a dyn GroundStation,
        profile_id: &'a str,
        prompter: &'a mut P,
        out: &'a mut W,
    ) -> Self {
        Self {
            gs,
            profile_id,
            prompter,
            out,
        }
    }

    pub(crate) async fn run(mut self) -> Result<Next, EngineError> {
        writeln!(self.out, "{WARNING}")?;

        let labels: Vec<String> = EditChoice::ALL.iter().map(|c| c.label().to_string()).collect();
        let index = self
            .prompter
            .select("What would you like to update?", &labels)?;

        match EditChoice::ALL[index] {
            EditChoice::Name => self.rename().await?,
            EditChoice::MinimumContactDuration => self.duration(DurationField::MinimumContact).await?,
            EditChoice::PrePassDuration => self.duration(DurationField::PrePass).await?,
            EditChoice::PostPassDuration => self.duration(DurationField::PostPass).await?,
            EditChoice::Tracking => self.tracking().await?,
            EditChoice::UplinkPower => self.uplink_power().await?,
            EditChoice::UplinkCenterFrequency => self.uplink_frequency().await?,
            EditChoice::DownlinkCenterFrequency => self.downlink_frequency().await?,
            EditChoice::DownlinkBandwidth => self.downlink_bandwidth().await?,
            EditChoice::Other => {
                writeln!(self.out, "{OTHER_HINT}")?;
                writeln!(self.out, "Exiting to main menu.")?;
            }
            EditChoice::Quit => return Ok(Next::Quit),
        }
        Ok(Next::TopMenu)
    }

    async fn rename(&mut self) -> Result<(), EngineError> {
        let profile = self.gs.get_mission_profile(self.profile_id).await?;
        let prompt = format!(
            "Current mission profile name: {}\n  Enter a new name:",
            profile.name
        );
        let answer = self.prompter.input(&prompt, InputKind::Name)?;
        let name = validate_name(&answer)?.to_string();

        let next = ProfileUpdate::from_snapshot(&profile).apply(ProfileEdit::Name(name.clone()));
        let message = format!("Update complete. The mission profile name has been changed to: {name}");
        submit_profile(self.gs, &next, "name", &message, self.out).await
    }

    async fn duration(&mut self, which: DurationField) -> Result<(), EngineError> {
        let profile = self.gs.get_mission_profile(self.profile_id).await?;
        let field = which.edit(0).field();
        let current = which.current(&profile);

        let prompt = format!(
            "The current value of {field} duration is {current}s.\n  Enter the new value in seconds:"
        );
        let answer = self.prompter.input(&prompt, InputKind::Duration)?;
        let seconds = parse_duration(&answer)?;

        let next = ProfileUpdate::from_snapshot(&profile).apply(which.edit(seconds));
        let message = format!("Update complete. The {field} duration has been set to: {seconds}s.");
        submit_profile(self.gs, &next, field, &message, self.out).await
    }

    async fn tracking(&mut self) -> Result<(), EngineError> {
        let profile = self.gs.get_mission_profile(self.profile_id).await?;
        let config_ref = parse_config_ref(&profile.tracking_config_arn)?;
        let config = self
            .gs
            .get_config(&config_ref.config_id, ConfigType::Tracking)
            .await?;
        let current = match &config.config_data {
            ConfigData::Tracking(tracking) => tracking.autotrack,
            other => {
                return Err(EngineError::UnexpectedConfig {
                    expected: ConfigType::Tracking,
                    actual: other.config_type(),
                })
            }
        };

        let prompt = format!("Currently autotrack is: {current}. What new value would you like?");
        let modes: Vec<String> = Criticality::ALL.iter().map(ToString::to_string).collect();
        let mode = Criticality::ALL[self.prompter.select(&prompt, &modes)?];

        let message = format!("Update complete. The antenna tracking config has been set to: {mode}");
        submit_config(self.gs, &config, ConfigEdit::Autotrack(mode), &message, self.out).await
    }

    async fn uplink_power(&mut self) -> Result<(), EngineError> {
        let Some((config, uplink)) = self.uplink().await? else {
            writeln!(self.out, "{NO_UPLINK}")?;
            return Ok(());
        };

        let prompt = format!(
            "The current EIRP is {}{}.\n  Enter the desired EIRP. Valid values: 20-50 dBW",
            uplink.target_eirp.value, uplink.target_eirp.units
        );
        let answer = self.prompter.input(&prompt, InputKind::UplinkEirp)?;
        let dbw = parse_uplink_eirp(&answer)?;

        let message = format!("Update complete. The uplink EIRP has been set to: {dbw}dBW.");
        let edit = ConfigEdit::UplinkEirp(f64::from(dbw));
        submit_config(self.gs, &config, edit, &message, self.out).await
    }

    async fn uplink_frequency(&mut self) -> Result<(), EngineError> {
        let Some((config, uplink)) = self.uplink().await? else {
            writeln!(self.out, "{NO_UPLINK}")?;
            return Ok(());
        };

        let current = uplink.spectrum_config.center_frequency;
        let prompt = format!(
            "The current uplink center frequency is {} {}\n  Enter the desired uplink center frequency in MHz. You must be licenced for this frequency.",
            current.value, current.units
        );
        let answer = self.prompter.input(&prompt, InputKind::UplinkFrequency)?;
        let mhz = parse_uplink_frequency(&answer)?;

        let message = format!("Update complete. The uplink center frequency has been set to: {mhz} MHz.");
        let edit = ConfigEdit::UplinkCenterFrequency(f64::from(mhz));
        submit_config(self.gs, &config, edit, &message, self.out).await
    }

    async fn downlink_frequency(&mut self) -> Result<(), EngineError> {
        let Some((config, downlink)) = self.downlink().await? else {
            writeln!(self.out, "{NO_DOWNLINK}")?;
            return Ok(());
        };

        let current = downlink.spectrum_config.center_frequency;
        let prompt = format!(
            "The current downlink center frequency is {} {}\n  Enter the desired downlink center frequency in MHz. You must be licenced for this frequency.",
            current.value, current.units
        );
        let answer = self.prompter.input(&prompt, InputKind::DownlinkFrequency)?;
        let mhz = parse_downlink_frequency(&answer)?;

        let message =
            format!("Update complete. The downlink center frequency has been set to: {mhz} MHz.");
        let edit = ConfigEdit::DownlinkCenterFrequency(f64::from(mhz));
        submit_config(self.gs, &config, edit, &message, self.out).await
    }

    async fn downlink_bandwidth(&mut self) -> Result<(), EngineError> {
        let Some((config, downlink)) = self.downlink().await? else {
            writeln!(self.out, "{NO_DOWNLINK}")?;
            return Ok(());
        };

        let current = downlink.spectrum_config.bandwidth;
        let prompt = format!(
            "The current downlink bandwidth is {} {}\n  Enter the desired downlink bandwidth in kHz. You must be licenced for this bandwidth.",
            current.value, current.units
        );
        let answer = self.prompter.input(&prompt, InputKind::DownlinkBandwidth)?;
        let khz = parse_downlink_bandwidth(&answer)?;

        let message = format!("Update complete. The downlink bandwidth has been set to: {khz} kHz.");
        let edit = ConfigEdit::DownlinkBandwidth(f64::from(khz));
        submit_config(self.gs, &config, edit, &message, self.out).await
    }

    async fn uplink(&self) -> Result<Option<(Config, AntennaUplinkConfig)>, EngineError> {
        let Some(config) = self.edge_config(ConfigType::AntennaUplink).await? else {
            return Ok(None);
        };
        match &config.config_data {
            ConfigData::AntennaUplink(uplink) => {
                let uplink = uplink.clone();
                Ok(Some((config, uplink)))
            }
            other => Err(EngineError::UnexpectedConfig {
                expected: ConfigType::AntennaUplink,
                actual: other.config_type(),
            }),
        }
    }

    async fn downlink(&self) -> Result<Option<(Config, AntennaDownlinkConfig)>, EngineError> {
        let Some(config) = self.edge_config(ConfigType::AntennaDownlink).await? else {
            return Ok(None);
        };
        match &config.config_data {
            ConfigData::AntennaDownlink(downlink) => {
                let downlink = downlink.clone();
                Ok(Some((config, downlink)))
            }
            other => Err(EngineError::UnexpectedConfig {
                expected: ConfigType::AntennaDownlink,
                actual: other.config_type(),
            }),
        }
    }

    /// Current state of the first edge config of type `wanted`.
    async fn edge_config(&self, wanted: ConfigType) -> Result<Option<Config>, EngineError> {
        let profile = self.gs.get_mission_profile(self.profile_id).await?;
        let Some(config_ref) = find_edge_config(&profile, wanted)? else {
            return Ok(None);
        };
        let config = self
            .gs
            .get_config(&config_ref.config_id, config_ref.config_type)
            .await?;
        Ok(Some(config))
    }
}

/// First config of type `wanted` on the profile's dataflow edges.
pub fn find_edge_config(
    profile: &MissionProfile,
    wanted: ConfigType,
) -> Result<Option<ConfigRef>, PathError> {
    for arn in profile.edge_config_arns() {
        let config_ref = parse_config_ref(arn)?;
        if config_ref.config_type == wanted {
            return Ok(Some(config_ref));
        }
    }
    Ok(None)
}

async fn submit_profile<W: Write>(
    gs: &dyn GroundStation,
    next: &MissionProfile,
    field: &'static str,
    message: &str,
    out: &mut W,
) -> Result<(), EngineError> {
    let resource = KeyValue::new("mission_profile_id", next.mission_profile_id.clone());
    match gs.update_mission_profile(next).await {
        Ok(()) => {
            info!(id = %next.mission_profile_id, field, "mission profile updated");
            EventLogger::log_event(
                "mission_profile_updated",
                vec![resource, KeyValue::new("field", field)],
            );
            writeln!(out, "{message}")?;
        }
        Err(e) => {
            warn!(id = %next.mission_profile_id, field, error = %e, "mission profile update rejected");
            EventLogger::log_event(
                "update_failed",
                vec![
                    resource,
                    KeyValue::new("field", field),
                    KeyValue::new("error", e.to_string()),
                ],
            );
            writeln!(out, "{e}")?;
        }
    }
    Ok(())
}

async fn submit_config<W: Write>(
    gs: &dyn GroundStation,
    snapshot: &Config,
    edit: ConfigEdit,
    message: &str,
    out: &mut W,
) -> Result<(), EngineError> {
    let field = edit.field();
    let next = ConfigUpdate::from_snapshot(snapshot).apply(edit)?;
    let resource = KeyValue::new("config_id", next.config_id.clone());

    match gs.update_config(&next).await {
        Ok(()) => {
            info!(id = %next.config_id, field, "config updated");
            EventLogger::log_event(
                "config_updated",
                vec![
                    resource,
                    KeyValue::new("config_type", next.config_type().as_str()),
                    KeyValue::new("field", field),
                ],
            );
            writeln!(out, "{message}")?;
        }
        Err(e) => {
            warn!(id = %next.config_id, field, error = %e, "config update rejected");
            EventLogger::log_event(
                "update_failed",
                vec![
                    resource,
                    KeyValue::new("field", field),
                    KeyValue::new("error", e.to_string()),
                ],
            );
            writeln!(out, "{e}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundctl_core::model::DataflowEdge;

    fn profile(edges: Vec<DataflowEdge>) -> MissionProfile {
        MissionProfile {
            mission_profile_id: "mp-1".into(),
            name: "aqua".into(),
            minimum_viable_contact_duration_seconds: 60,
            contact_pre_pass_duration_seconds: 60,
            contact_post_pass_duration_seconds: 60,
            tracking_config_arn: "arn:aws:groundstation:us-east-2:1:config/tracking/t-1".into(),
            dataflow_edges: edges,
            streams_kms_key: None,
            streams_kms_role: None,
            telemetry_sink_config_arn: None,
        }
    }

    #[test]
    fn edit_menu_lists_eleven_entries_in_order() {
        let labels: Vec<_> = EditChoice::ALL.iter().map(EditChoice::label).collect();
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[0], "Mission profile name");
        assert_eq!(labels[8], "Antenna tracking");
        assert_eq!(labels[10], "Quit");
    }

    #[test]
    fn finds_first_edge_config_of_type() {
        let p = profile(vec![
            DataflowEdge::new("a/dataflow-endpoint/e-1", "a/antenna-uplink/u-1"),
            DataflowEdge::new("a/antenna-uplink/u-2", "a/dataflow-endpoint/e-2"),
        ]);
        let found = find_edge_config(&p, ConfigType::AntennaUplink).unwrap();
        assert_eq!(found, Some(ConfigRef::new(ConfigType::AntennaUplink, "u-1")));
        assert_eq!(find_edge_config(&p, ConfigType::AntennaDownlink).unwrap(), None);
    }

    #[test]
    fn malformed_edge_path_is_reported() {
        let p = profile(vec![DataflowEdge::new("garbage", "a/antenna-uplink/u-1")]);
        assert!(matches!(
            find_edge_config(&p, ConfigType::AntennaUplink),
            Err(PathError::MalformedPath(_))
        ));
    }
}
