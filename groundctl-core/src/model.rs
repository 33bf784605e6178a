//! ## groundctl-core::model
//! Typed view of the Ground Station resources the tool reads and writes.
//!
//! Field names serialize in the camelCase shape the remote API uses, so a
//! pretty-printed value reads the same as the payload the service returned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arn::PathError;

/// Row of the mission profile list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionProfileSummary {
    pub id: String,
    pub name: String,
}

/// A named scheduling configuration for satellite contacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionProfile {
    pub mission_profile_id: String,
    pub name: String,
    pub minimum_viable_contact_duration_seconds: u32,
    pub contact_pre_pass_duration_seconds: u32,
    pub contact_post_pass_duration_seconds: u32,
    pub tracking_config_arn: String,
    pub dataflow_edges: Vec<DataflowEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streams_kms_key: Option<KmsKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streams_kms_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry_sink_config_arn: Option<String>,
}

impl MissionProfile {
    /// Every config ARN referenced by the dataflow edges, source first.
    pub fn edge_config_arns(&self) -> impl Iterator<Item = &str> {
        self.dataflow_edges
            .iter()
            .flat_map(|edge| [edge.source.as_str(), edge.destination.as_str()])
    }
}

/// KMS key used to encrypt contact data streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KmsKey {
    KmsKeyArn(String),
    KmsAliasArn(String),
    KmsAliasName(String),
}

/// A data path between two configs within a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataflowEdge {
    pub source: String,
    pub destination: String,
}

impl DataflowEdge {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Config capability type as it appears in resource paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigType {
    Tracking,
    AntennaUplink,
    AntennaDownlink,
    AntennaDownlinkDemodDecode,
    DataflowEndpoint,
    UplinkEcho,
    S3Recording,
    TelemetrySink,
}

impl ConfigType {
    pub const ALL: [ConfigType; 8] = [
        ConfigType::Tracking,
        ConfigType::AntennaUplink,
        ConfigType::AntennaDownlink,
        ConfigType::AntennaDownlinkDemodDecode,
        ConfigType::DataflowEndpoint,
        ConfigType::UplinkEcho,
        ConfigType::S3Recording,
        ConfigType::TelemetrySink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigType::Tracking => "tracking",
            ConfigType::AntennaUplink => "antenna-uplink",
            ConfigType::AntennaDownlink => "antenna-downlink",
            ConfigType::AntennaDownlinkDemodDecode => "antenna-downlink-demod-decode",
            ConfigType::DataflowEndpoint => "dataflow-endpoint",
            ConfigType::UplinkEcho => "uplink-echo",
            ConfigType::S3Recording => "s3-recording",
            ConfigType::TelemetrySink => "telemetry-sink",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigType {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PathError::UnknownConfigType(s.to_string()))
    }
}

/// Row of the config list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub config_id: String,
    pub config_type: ConfigType,
    pub name: String,
}

/// A typed sub-resource referenced by a mission profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub config_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_arn: Option<String>,
    pub name: String,
    pub config_data: ConfigData,
}

impl Config {
    pub fn config_type(&self) -> ConfigType {
        self.config_data.config_type()
    }
}

/// Type-specific config payload, externally tagged with the API's member names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigData {
    #[serde(rename = "trackingConfig")]
    Tracking(TrackingConfig),
    #[serde(rename = "antennaUplinkConfig")]
    AntennaUplink(AntennaUplinkConfig),
    #[serde(rename = "antennaDownlinkConfig")]
    AntennaDownlink(AntennaDownlinkConfig),
    #[serde(rename = "antennaDownlinkDemodDecodeConfig")]
    AntennaDownlinkDemodDecode(DemodDecodeConfig),
    #[serde(rename = "dataflowEndpointConfig")]
    DataflowEndpoint(DataflowEndpointConfig),
    #[serde(rename = "uplinkEchoConfig")]
    UplinkEcho(UplinkEchoConfig),
    #[serde(rename = "s3RecordingConfig")]
    S3Recording(S3RecordingConfig),
    #[serde(rename = "telemetrySinkConfig")]
    TelemetrySink(TelemetrySinkConfig),
}

impl ConfigData {
    pub fn config_type(&self) -> ConfigType {
        match self {
            ConfigData::Tracking(_) => ConfigType::Tracking,
            ConfigData::AntennaUplink(_) => ConfigType::AntennaUplink,
            ConfigData::AntennaDownlink(_) => ConfigType::AntennaDownlink,
            ConfigData::AntennaDownlinkDemodDecode(_) => ConfigType::AntennaDownlinkDemodDecode,
            ConfigData::DataflowEndpoint(_) => ConfigType::DataflowEndpoint,
            ConfigData::UplinkEcho(_) => ConfigType::UplinkEcho,
            ConfigData::S3Recording(_) => ConfigType::S3Recording,
            ConfigData::TelemetrySink(_) => ConfigType::TelemetrySink,
        }
    }
}

/// Antenna tracking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Criticality {
    Preferred,
    Removed,
    Required,
}

impl Criticality {
    /// Order offered to the operator.
    pub const ALL: [Criticality; 3] = [
        Criticality::Preferred,
        Criticality::Removed,
        Criticality::Required,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::Preferred => "PREFERRED",
            Criticality::Removed => "REMOVED",
            Criticality::Required => "REQUIRED",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub autotrack: Criticality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyUnits {
    #[serde(rename = "GHz")]
    Ghz,
    #[serde(rename = "MHz")]
    Mhz,
    #[serde(rename = "kHz")]
    Khz,
}

impl FrequencyUnits {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyUnits::Ghz => "GHz",
            FrequencyUnits::Mhz => "MHz",
            FrequencyUnits::Khz => "kHz",
        }
    }
}

impl fmt::Display for FrequencyUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub units: FrequencyUnits,
    pub value: f64,
}

impl Frequency {
    pub fn mhz(value: f64) -> Self {
        Self {
            units: FrequencyUnits::Mhz,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBandwidth {
    pub units: FrequencyUnits,
    pub value: f64,
}

impl FrequencyBandwidth {
    pub fn khz(value: f64) -> Self {
        Self {
            units: FrequencyUnits::Khz,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EirpUnits {
    #[serde(rename = "dBW")]
    Dbw,
}

impl fmt::Display for EirpUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EirpUnits::Dbw => f.write_str("dBW"),
        }
    }
}

/// Effective isotropic radiated power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eirp {
    pub units: EirpUnits,
    pub value: f64,
}

impl Eirp {
    pub fn dbw(value: f64) -> Self {
        Self {
            units: EirpUnits::Dbw,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polarization {
    LeftHand,
    RightHand,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkSpectrumConfig {
    pub center_frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarization: Option<Polarization>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumConfig {
    pub center_frequency: Frequency,
    pub bandwidth: FrequencyBandwidth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarization: Option<Polarization>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntennaUplinkConfig {
    pub spectrum_config: UplinkSpectrumConfig,
    pub target_eirp: Eirp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmit_disabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntennaDownlinkConfig {
    pub spectrum_config: SpectrumConfig,
}

/// Free-form JSON document carried as text by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnvalidatedJson {
    #[serde(rename = "unvalidatedJSON")]
    pub unvalidated_json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemodDecodeConfig {
    pub spectrum_config: SpectrumConfig,
    pub demodulation_config: UnvalidatedJson,
    pub decode_config: UnvalidatedJson,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataflowEndpointConfig {
    pub dataflow_endpoint_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataflow_endpoint_region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkEchoConfig {
    pub enabled: bool,
    pub antenna_uplink_config_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3RecordingConfig {
    pub bucket_arn: String,
    pub role_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Where contact telemetry is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySinkConfig {
    pub telemetry_sink_type: TelemetrySinkType,
    pub telemetry_sink_data: TelemetrySinkData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TelemetrySinkType {
    KinesisDataStream,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetrySinkData {
    #[serde(rename = "kinesisDataStreamData")]
    KinesisDataStream(KinesisDataStreamData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinesisDataStreamData {
    pub kinesis_role_arn: String,
    pub kinesis_data_stream_arn: String,
}

/// Group of dataflow endpoints a contact streams through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataflowEndpointGroup {
    pub id: String,
    pub endpoints: Vec<EndpointDetails>,
}

impl DataflowEndpointGroup {
    pub fn has_endpoint_named(&self, name: &str) -> bool {
        self.endpoints.iter().any(|e| e.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDetails {
    pub name: String,
    pub address: Option<SocketAddress>,
    pub status: Option<String>,
    pub security_group_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketAddress {
    pub name: String,
    pub port: u16,
}

impl fmt::Display for SocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_type_round_trips_through_path_names() {
        for t in ConfigType::ALL {
            assert_eq!(t.as_str().parse::<ConfigType>().unwrap(), t);
        }
        assert!("antenna".parse::<ConfigType>().is_err());
    }

    #[test]
    fn config_data_serializes_with_api_member_name() {
        let data = ConfigData::AntennaUplink(AntennaUplinkConfig {
            spectrum_config: UplinkSpectrumConfig {
                center_frequency: Frequency::mhz(2100.0),
                polarization: Some(Polarization::RightHand),
            },
            target_eirp: Eirp::dbw(30.0),
            transmit_disabled: Some(false),
        });
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json["antennaUplinkConfig"]["spectrumConfig"]["centerFrequency"]["units"],
            "MHz"
        );
        assert_eq!(json["antennaUplinkConfig"]["targetEirp"]["units"], "dBW");
        assert_eq!(
            json["antennaUplinkConfig"]["spectrumConfig"]["polarization"],
            "RIGHT_HAND"
        );
    }

    #[test]
    fn edge_config_arns_lists_source_then_destination() {
        let profile = MissionProfile {
            mission_profile_id: "mp-1".into(),
            name: "demo".into(),
            minimum_viable_contact_duration_seconds: 60,
            contact_pre_pass_duration_seconds: 120,
            contact_post_pass_duration_seconds: 120,
            tracking_config_arn: "arn:config/tracking/t-1".into(),
            dataflow_edges: vec![
                DataflowEdge::new("arn:config/antenna-downlink/d-1", "arn:config/dataflow-endpoint/e-1"),
                DataflowEdge::new("arn:config/dataflow-endpoint/e-2", "arn:config/antenna-uplink/u-1"),
            ],
            streams_kms_key: None,
            streams_kms_role: None,
            telemetry_sink_config_arn: None,
        };
        let arns: Vec<_> = profile.edge_config_arns().collect();
        assert_eq!(
            arns,
            vec![
                "arn:config/antenna-downlink/d-1",
                "arn:config/dataflow-endpoint/e-1",
                "arn:config/dataflow-endpoint/e-2",
                "arn:config/antenna-uplink/u-1",
            ]
        );
    }

    #[test]
    fn stream_settings_are_omitted_when_unset() {
        let json = serde_json::json!({
            "missionProfileId": "mp-1",
            "name": "demo",
            "minimumViableContactDurationSeconds": 60,
            "contactPrePassDurationSeconds": 120,
            "contactPostPassDurationSeconds": 120,
            "trackingConfigArn": "arn:config/tracking/t-1",
            "dataflowEdges": [],
        });
        let profile: MissionProfile = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(profile.streams_kms_key, None);
        assert_eq!(serde_json::to_value(&profile).unwrap(), json);

        let keyed = MissionProfile {
            streams_kms_key: Some(KmsKey::KmsAliasName("alias/contacts".into())),
            ..profile
        };
        let json = serde_json::to_value(&keyed).unwrap();
        assert_eq!(json["streamsKmsKey"]["kmsAliasName"], "alias/contacts");
    }

    #[test]
    fn telemetry_sink_config_uses_api_member_names() {
        let data = ConfigData::TelemetrySink(TelemetrySinkConfig {
            telemetry_sink_type: TelemetrySinkType::KinesisDataStream,
            telemetry_sink_data: TelemetrySinkData::KinesisDataStream(KinesisDataStreamData {
                kinesis_role_arn: "arn:aws:iam::123:role/sink".into(),
                kinesis_data_stream_arn: "arn:aws:kinesis:us-east-2:123:stream/contacts".into(),
            }),
        });
        assert_eq!(data.config_type(), ConfigType::TelemetrySink);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json["telemetrySinkConfig"]["telemetrySinkType"],
            "KINESIS_DATA_STREAM"
        );
        assert_eq!(
            json["telemetrySinkConfig"]["telemetrySinkData"]["kinesisDataStreamData"]["kinesisRoleArn"],
            "arn:aws:iam::123:role/sink"
        );
        assert_eq!("telemetry-sink".parse::<ConfigType>().unwrap(), ConfigType::TelemetrySink);
    }
}
