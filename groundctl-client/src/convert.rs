//! Mapping between SDK shapes and the groundctl model.
//!
//! Enums are matched on their wire strings so an unknown value from a newer
//! service surfaces as `UnexpectedResponse` instead of being guessed.

use aws_sdk_groundstation::operation::get_config::GetConfigOutput;
use aws_sdk_groundstation::operation::get_dataflow_endpoint_group::GetDataflowEndpointGroupOutput;
use aws_sdk_groundstation::operation::get_mission_profile::GetMissionProfileOutput;
use aws_sdk_groundstation::types as sdk;

use groundctl_core::client::ops;
use groundctl_core::model::*;
use groundctl_core::ClientError;

fn unexpected(operation: &'static str, message: impl Into<String>) -> ClientError {
    ClientError::UnexpectedResponse {
        operation,
        message: message.into(),
    }
}

fn invalid(operation: &'static str, err: impl std::fmt::Display) -> ClientError {
    ClientError::InvalidRequest {
        operation,
        message: err.to_string(),
    }
}

fn required<'a, T: ?Sized>(
    operation: &'static str,
    field: &str,
    value: Option<&'a T>,
) -> Result<&'a T, ClientError> {
    value.ok_or_else(|| unexpected(operation, format!("missing {field}")))
}

fn seconds(operation: &'static str, field: &str, value: Option<i32>) -> Result<u32, ClientError> {
    let value = value.ok_or_else(|| unexpected(operation, format!("missing {field}")))?;
    u32::try_from(value).map_err(|_| unexpected(operation, format!("negative {field}: {value}")))
}

pub(crate) fn to_seconds(operation: &'static str, value: u32) -> Result<i32, ClientError> {
    i32::try_from(value).map_err(|e| invalid(operation, e))
}

pub(crate) fn capability(config_type: ConfigType) -> sdk::ConfigCapabilityType {
    sdk::ConfigCapabilityType::from(config_type.as_str())
}

pub(crate) fn config_type(
    operation: &'static str,
    capability: &sdk::ConfigCapabilityType,
) -> Result<ConfigType, ClientError> {
    capability
        .as_str()
        .parse()
        .map_err(|_| unexpected(operation, format!("config type {}", capability.as_str())))
}

pub(crate) fn mission_profile(out: &GetMissionProfileOutput) -> Result<MissionProfile, ClientError> {
    const OP: &str = ops::GET_MISSION_PROFILE;

    let dataflow_edges = out
        .dataflow_edges()
        .iter()
        .map(|edge| match edge.as_slice() {
            [source, destination] => Ok(DataflowEdge::new(source, destination)),
            other => Err(unexpected(
                OP,
                format!("dataflow edge with {} configs", other.len()),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MissionProfile {
        mission_profile_id: required(OP, "missionProfileId", out.mission_profile_id())?.to_string(),
        name: required(OP, "name", out.name())?.to_string(),
        minimum_viable_contact_duration_seconds: seconds(
            OP,
            "minimumViableContactDurationSeconds",
            out.minimum_viable_contact_duration_seconds(),
        )?,
        contact_pre_pass_duration_seconds: seconds(
            OP,
            "contactPrePassDurationSeconds",
            out.contact_pre_pass_duration_seconds(),
        )?,
        contact_post_pass_duration_seconds: seconds(
            OP,
            "contactPostPassDurationSeconds",
            out.contact_post_pass_duration_seconds(),
        )?,
        tracking_config_arn: required(OP, "trackingConfigArn", out.tracking_config_arn())?
            .to_string(),
        dataflow_edges,
        streams_kms_key: out.streams_kms_key().map(|k| kms_key(OP, k)).transpose()?,
        streams_kms_role: out.streams_kms_role().map(str::to_string),
        telemetry_sink_config_arn: out.telemetry_sink_config_arn().map(str::to_string),
    })
}

fn kms_key(operation: &'static str, key: &sdk::KmsKey) -> Result<KmsKey, ClientError> {
    match key {
        sdk::KmsKey::KmsKeyArn(arn) => Ok(KmsKey::KmsKeyArn(arn.clone())),
        sdk::KmsKey::KmsAliasArn(arn) => Ok(KmsKey::KmsAliasArn(arn.clone())),
        sdk::KmsKey::KmsAliasName(name) => Ok(KmsKey::KmsAliasName(name.clone())),
        _ => Err(unexpected(operation, "unsupported streams KMS key variant")),
    }
}

pub(crate) fn kms_key_to_sdk(key: &KmsKey) -> sdk::KmsKey {
    match key {
        KmsKey::KmsKeyArn(arn) => sdk::KmsKey::KmsKeyArn(arn.clone()),
        KmsKey::KmsAliasArn(arn) => sdk::KmsKey::KmsAliasArn(arn.clone()),
        KmsKey::KmsAliasName(name) => sdk::KmsKey::KmsAliasName(name.clone()),
    }
}

pub(crate) fn edges_to_sdk(edges: &[DataflowEdge]) -> Vec<Vec<String>> {
    edges
        .iter()
        .map(|e| vec![e.source.clone(), e.destination.clone()])
        .collect()
}

pub(crate) fn config(out: &GetConfigOutput) -> Result<Config, ClientError> {
    const OP: &str = ops::GET_CONFIG;
    let data = required(OP, "configData", out.config_data())?;

    Ok(Config {
        config_id: out.config_id().to_string(),
        config_arn: Some(out.config_arn().to_string()),
        name: out.name().to_string(),
        config_data: config_data(data)?,
    })
}

fn frequency_units(operation: &'static str, units: &str) -> Result<FrequencyUnits, ClientError> {
    match units {
        "GHz" => Ok(FrequencyUnits::Ghz),
        "MHz" => Ok(FrequencyUnits::Mhz),
        "kHz" => Ok(FrequencyUnits::Khz),
        other => Err(unexpected(operation, format!("frequency units {other}"))),
    }
}

fn polarization(operation: &'static str, p: &sdk::Polarization) -> Result<Polarization, ClientError> {
    match p.as_str() {
        "LEFT_HAND" => Ok(Polarization::LeftHand),
        "RIGHT_HAND" => Ok(Polarization::RightHand),
        "NONE" => Ok(Polarization::None),
        other => Err(unexpected(operation, format!("polarization {other}"))),
    }
}

fn criticality(operation: &'static str, c: &sdk::Criticality) -> Result<Criticality, ClientError> {
    match c.as_str() {
        "PREFERRED" => Ok(Criticality::Preferred),
        "REMOVED" => Ok(Criticality::Removed),
        "REQUIRED" => Ok(Criticality::Required),
        other => Err(unexpected(operation, format!("autotrack {other}"))),
    }
}

fn frequency(operation: &'static str, f: &sdk::Frequency) -> Result<Frequency, ClientError> {
    Ok(Frequency {
        units: frequency_units(operation, f.units().as_str())?,
        value: f.value(),
    })
}

fn bandwidth(
    operation: &'static str,
    b: &sdk::FrequencyBandwidth,
) -> Result<FrequencyBandwidth, ClientError> {
    Ok(FrequencyBandwidth {
        units: frequency_units(operation, b.units().as_str())?,
        value: b.value(),
    })
}

fn spectrum(operation: &'static str, s: &sdk::SpectrumConfig) -> Result<SpectrumConfig, ClientError> {
    Ok(SpectrumConfig {
        center_frequency: frequency(
            operation,
            required(operation, "centerFrequency", s.center_frequency())?,
        )?,
        bandwidth: bandwidth(operation, required(operation, "bandwidth", s.bandwidth())?)?,
        polarization: s
            .polarization()
            .map(|p| polarization(operation, p))
            .transpose()?,
    })
}

fn config_data(data: &sdk::ConfigTypeData) -> Result<ConfigData, ClientError> {
    const OP: &str = ops::GET_CONFIG;

    let converted = match data {
        sdk::ConfigTypeData::TrackingConfig(t) => ConfigData::Tracking(TrackingConfig {
            autotrack: criticality(OP, t.autotrack())?,
        }),
        sdk::ConfigTypeData::AntennaUplinkConfig(u) => {
            let s = required(OP, "spectrumConfig", u.spectrum_config())?;
            let eirp = required(OP, "targetEirp", u.target_eirp())?;
            if eirp.units().as_str() != "dBW" {
                return Err(unexpected(OP, format!("EIRP units {}", eirp.units().as_str())));
            }
            ConfigData::AntennaUplink(AntennaUplinkConfig {
                spectrum_config: UplinkSpectrumConfig {
                    center_frequency: frequency(
                        OP,
                        required(OP, "centerFrequency", s.center_frequency())?,
                    )?,
                    polarization: s.polarization().map(|p| polarization(OP, p)).transpose()?,
                },
                target_eirp: Eirp::dbw(eirp.value()),
                transmit_disabled: u.transmit_disabled(),
            })
        }
        sdk::ConfigTypeData::AntennaDownlinkConfig(d) => {
            ConfigData::AntennaDownlink(AntennaDownlinkConfig {
                spectrum_config: spectrum(OP, required(OP, "spectrumConfig", d.spectrum_config())?)?,
            })
        }
        sdk::ConfigTypeData::AntennaDownlinkDemodDecodeConfig(d) => {
            ConfigData::AntennaDownlinkDemodDecode(DemodDecodeConfig {
                spectrum_config: spectrum(OP, required(OP, "spectrumConfig", d.spectrum_config())?)?,
                demodulation_config: UnvalidatedJson {
                    unvalidated_json: required(OP, "demodulationConfig", d.demodulation_config())?
                        .unvalidated_json()
                        .to_string(),
                },
                decode_config: UnvalidatedJson {
                    unvalidated_json: required(OP, "decodeConfig", d.decode_config())?
                        .unvalidated_json()
                        .to_string(),
                },
            })
        }
        sdk::ConfigTypeData::DataflowEndpointConfig(e) => {
            ConfigData::DataflowEndpoint(DataflowEndpointConfig {
                dataflow_endpoint_name: e.dataflow_endpoint_name().to_string(),
                dataflow_endpoint_region: e.dataflow_endpoint_region().map(str::to_string),
            })
        }
        sdk::ConfigTypeData::UplinkEchoConfig(e) => ConfigData::UplinkEcho(UplinkEchoConfig {
            enabled: e.enabled(),
            antenna_uplink_config_arn: e.antenna_uplink_config_arn().to_string(),
        }),
        sdk::ConfigTypeData::S3RecordingConfig(r) => ConfigData::S3Recording(S3RecordingConfig {
            bucket_arn: r.bucket_arn().to_string(),
            role_arn: r.role_arn().to_string(),
            prefix: r.prefix().map(str::to_string),
        }),
        sdk::ConfigTypeData::TelemetrySinkConfig(t) => {
            let telemetry_sink_type = match t.telemetry_sink_type().as_str() {
                "KINESIS_DATA_STREAM" => TelemetrySinkType::KinesisDataStream,
                other => return Err(unexpected(OP, format!("telemetry sink type {other}"))),
            };
            let telemetry_sink_data = match required(OP, "telemetrySinkData", t.telemetry_sink_data())? {
                sdk::TelemetrySinkData::KinesisDataStreamData(k) => {
                    TelemetrySinkData::KinesisDataStream(KinesisDataStreamData {
                        kinesis_role_arn: k.kinesis_role_arn().to_string(),
                        kinesis_data_stream_arn: k.kinesis_data_stream_arn().to_string(),
                    })
                }
                _ => return Err(unexpected(OP, "unsupported telemetry sink data variant")),
            };
            ConfigData::TelemetrySink(TelemetrySinkConfig {
                telemetry_sink_type,
                telemetry_sink_data,
            })
        }
        _ => return Err(unexpected(OP, "unsupported config data variant")),
    };
    Ok(converted)
}

fn frequency_to_sdk(f: &Frequency) -> Result<sdk::Frequency, ClientError> {
    sdk::Frequency::builder()
        .units(sdk::FrequencyUnits::from(f.units.as_str()))
        .value(f.value)
        .build()
        .map_err(|e| invalid(ops::UPDATE_CONFIG, e))
}

fn bandwidth_to_sdk(b: &FrequencyBandwidth) -> Result<sdk::FrequencyBandwidth, ClientError> {
    sdk::FrequencyBandwidth::builder()
        .units(sdk::BandwidthUnits::from(b.units.as_str()))
        .value(b.value)
        .build()
        .map_err(|e| invalid(ops::UPDATE_CONFIG, e))
}

fn polarization_to_sdk(p: Polarization) -> sdk::Polarization {
    sdk::Polarization::from(match p {
        Polarization::LeftHand => "LEFT_HAND",
        Polarization::RightHand => "RIGHT_HAND",
        Polarization::None => "NONE",
    })
}

fn spectrum_to_sdk(s: &SpectrumConfig) -> Result<sdk::SpectrumConfig, ClientError> {
    Ok(sdk::SpectrumConfig::builder()
        .center_frequency(frequency_to_sdk(&s.center_frequency)?)
        .bandwidth(bandwidth_to_sdk(&s.bandwidth)?)
        .set_polarization(s.polarization.map(polarization_to_sdk))
        .build())
}

fn unvalidated<T>(
    json: &UnvalidatedJson,
    build: impl FnOnce(String) -> Result<T, aws_sdk_groundstation::error::BuildError>,
) -> Result<T, ClientError> {
    build(json.unvalidated_json.clone()).map_err(|e| invalid(ops::UPDATE_CONFIG, e))
}

/// Full replacement payload for `UpdateConfig`.
pub(crate) fn config_data_to_sdk(data: &ConfigData) -> Result<sdk::ConfigTypeData, ClientError> {
    const OP: &str = ops::UPDATE_CONFIG;

    let converted = match data {
        ConfigData::Tracking(t) => sdk::ConfigTypeData::TrackingConfig(
            sdk::TrackingConfig::builder()
                .autotrack(sdk::Criticality::from(t.autotrack.as_str()))
                .build()
                .map_err(|e| invalid(OP, e))?,
        ),
        ConfigData::AntennaUplink(u) => sdk::ConfigTypeData::AntennaUplinkConfig(
            sdk::AntennaUplinkConfig::builder()
                .spectrum_config(
                    sdk::UplinkSpectrumConfig::builder()
                        .center_frequency(frequency_to_sdk(&u.spectrum_config.center_frequency)?)
                        .set_polarization(u.spectrum_config.polarization.map(polarization_to_sdk))
                        .build(),
                )
                .target_eirp(
                    sdk::Eirp::builder()
                        .units(sdk::EirpUnits::from("dBW"))
                        .value(u.target_eirp.value)
                        .build()
                        .map_err(|e| invalid(OP, e))?,
                )
                .set_transmit_disabled(u.transmit_disabled)
                .build(),
        ),
        ConfigData::AntennaDownlink(d) => sdk::ConfigTypeData::AntennaDownlinkConfig(
            sdk::AntennaDownlinkConfig::builder()
                .spectrum_config(spectrum_to_sdk(&d.spectrum_config)?)
                .build(),
        ),
        ConfigData::AntennaDownlinkDemodDecode(d) => {
            sdk::ConfigTypeData::AntennaDownlinkDemodDecodeConfig(
                sdk::AntennaDownlinkDemodDecodeConfig::builder()
                    .spectrum_config(spectrum_to_sdk(&d.spectrum_config)?)
                    .demodulation_config(unvalidated(&d.demodulation_config, |json| {
                        sdk::DemodulationConfig::builder().unvalidated_json(json).build()
                    })?)
                    .decode_config(unvalidated(&d.decode_config, |json| {
                        sdk::DecodeConfig::builder().unvalidated_json(json).build()
                    })?)
                    .build(),
            )
        }
        ConfigData::DataflowEndpoint(e) => sdk::ConfigTypeData::DataflowEndpointConfig(
            sdk::DataflowEndpointConfig::builder()
                .dataflow_endpoint_name(&e.dataflow_endpoint_name)
                .set_dataflow_endpoint_region(e.dataflow_endpoint_region.clone())
                .build()
                .map_err(|e| invalid(OP, e))?,
        ),
        ConfigData::UplinkEcho(e) => sdk::ConfigTypeData::UplinkEchoConfig(
            sdk::UplinkEchoConfig::builder()
                .enabled(e.enabled)
                .antenna_uplink_config_arn(&e.antenna_uplink_config_arn)
                .build()
                .map_err(|e| invalid(OP, e))?,
        ),
        ConfigData::S3Recording(r) => sdk::ConfigTypeData::S3RecordingConfig(
            sdk::S3RecordingConfig::builder()
                .bucket_arn(&r.bucket_arn)
                .role_arn(&r.role_arn)
                .set_prefix(r.prefix.clone())
                .build()
                .map_err(|e| invalid(OP, e))?,
        ),
        ConfigData::TelemetrySink(t) => {
            let TelemetrySinkData::KinesisDataStream(k) = &t.telemetry_sink_data;
            let sink_type = match t.telemetry_sink_type {
                TelemetrySinkType::KinesisDataStream => "KINESIS_DATA_STREAM",
            };
            sdk::ConfigTypeData::TelemetrySinkConfig(
                sdk::TelemetrySinkConfig::builder()
                    .telemetry_sink_type(sdk::TelemetrySinkType::from(sink_type))
                    .telemetry_sink_data(sdk::TelemetrySinkData::KinesisDataStreamData(
                        sdk::KinesisDataStreamData::builder()
                            .kinesis_role_arn(&k.kinesis_role_arn)
                            .kinesis_data_stream_arn(&k.kinesis_data_stream_arn)
                            .build()
                            .map_err(|e| invalid(OP, e))?,
                    ))
                    .build()
                    .map_err(|e| invalid(OP, e))?,
            )
        }
    };
    Ok(converted)
}

pub(crate) fn endpoint_group(
    id: &str,
    out: &GetDataflowEndpointGroupOutput,
) -> Result<DataflowEndpointGroup, ClientError> {
    const OP: &str = ops::GET_DATAFLOW_ENDPOINT_GROUP;

    let endpoints = out
        .endpoints_details()
        .iter()
        .map(|details| {
            let security_group_ids = details
                .security_details()
                .map(|s| s.security_group_ids().to_vec())
                .unwrap_or_default();

            if let Some(endpoint) = details.endpoint() {
                let address = endpoint
                    .address()
                    .map(|a| {
                        u16::try_from(a.port())
                            .map(|port| SocketAddress {
                                name: a.name().to_string(),
                                port,
                            })
                            .map_err(|_| unexpected(OP, format!("port {}", a.port())))
                    })
                    .transpose()?;
                Ok(EndpointDetails {
                    name: required(OP, "endpoint.name", endpoint.name())?.to_string(),
                    address,
                    status: endpoint.status().map(|s| s.as_str().to_string()),
                    security_group_ids,
                })
            } else if let Some(agent) = details.aws_ground_station_agent_endpoint() {
                Ok(EndpointDetails {
                    name: agent.name().to_string(),
                    address: None,
                    status: None,
                    security_group_ids,
                })
            } else {
                Err(unexpected(OP, "endpoint details without an endpoint"))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DataflowEndpointGroup {
        id: out.dataflow_endpoint_group_id().unwrap_or(id).to_string(),
        endpoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_names_match_path_segments() {
        for t in ConfigType::ALL {
            let cap = capability(t);
            assert_eq!(cap.as_str(), t.as_str());
            assert_eq!(config_type("test", &cap).unwrap(), t);
        }
    }

    #[test]
    fn unknown_capability_is_unexpected() {
        let cap = sdk::ConfigCapabilityType::from("antenna-sideways");
        assert!(matches!(
            config_type("test", &cap),
            Err(ClientError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn uplink_round_trips_through_sdk_shape() {
        let data = ConfigData::AntennaUplink(AntennaUplinkConfig {
            spectrum_config: UplinkSpectrumConfig {
                center_frequency: Frequency::mhz(2100.0),
                polarization: Some(Polarization::RightHand),
            },
            target_eirp: Eirp::dbw(45.0),
            transmit_disabled: Some(false),
        });
        let sdk_data = config_data_to_sdk(&data).unwrap();
        assert_eq!(config_data(&sdk_data).unwrap(), data);
    }

    #[test]
    fn telemetry_sink_round_trips_through_sdk_shape() {
        let data = ConfigData::TelemetrySink(TelemetrySinkConfig {
            telemetry_sink_type: TelemetrySinkType::KinesisDataStream,
            telemetry_sink_data: TelemetrySinkData::KinesisDataStream(KinesisDataStreamData {
                kinesis_role_arn: "arn:aws:iam::1:role/sink".into(),
                kinesis_data_stream_arn: "arn:aws:kinesis:us-east-2:1:stream/contacts".into(),
            }),
        });
        let sdk_data = config_data_to_sdk(&data).unwrap();
        assert!(matches!(sdk_data, sdk::ConfigTypeData::TelemetrySinkConfig(_)));
        assert_eq!(config_data(&sdk_data).unwrap(), data);
    }

    #[test]
    fn stream_settings_survive_profile_read() {
        let out = GetMissionProfileOutput::builder()
            .mission_profile_id("mp-1")
            .name("aqua")
            .minimum_viable_contact_duration_seconds(180)
            .contact_pre_pass_duration_seconds(60)
            .contact_post_pass_duration_seconds(120)
            .tracking_config_arn("arn:config/tracking/t-1")
            .streams_kms_key(sdk::KmsKey::KmsAliasArn("arn:aws:kms:us-east-2:1:alias/contacts".into()))
            .streams_kms_role("arn:aws:iam::1:role/streams")
            .telemetry_sink_config_arn("arn:config/telemetry-sink/ts-1")
            .build();

        let profile = mission_profile(&out).unwrap();
        assert_eq!(
            profile.streams_kms_key,
            Some(KmsKey::KmsAliasArn("arn:aws:kms:us-east-2:1:alias/contacts".into()))
        );
        assert_eq!(profile.streams_kms_role.as_deref(), Some("arn:aws:iam::1:role/streams"));
        assert_eq!(
            profile.telemetry_sink_config_arn.as_deref(),
            Some("arn:config/telemetry-sink/ts-1")
        );
        assert!(profile.dataflow_edges.is_empty());
    }

    #[test]
    fn profile_without_stream_settings_reads_as_none() {
        let out = GetMissionProfileOutput::builder()
            .mission_profile_id("mp-1")
            .name("aqua")
            .minimum_viable_contact_duration_seconds(180)
            .contact_pre_pass_duration_seconds(60)
            .contact_post_pass_duration_seconds(120)
            .tracking_config_arn("arn:config/tracking/t-1")
            .build();
        let profile = mission_profile(&out).unwrap();
        assert_eq!(profile.streams_kms_key, None);
        assert_eq!(profile.streams_kms_role, None);
        assert_eq!(profile.telemetry_sink_config_arn, None);
    }

    #[test]
    fn kms_keys_keep_their_variant() {
        for key in [
            KmsKey::KmsKeyArn("arn:aws:kms:us-east-2:1:key/k-1".into()),
            KmsKey::KmsAliasArn("arn:aws:kms:us-east-2:1:alias/a".into()),
            KmsKey::KmsAliasName("alias/a".into()),
        ] {
            assert_eq!(kms_key("test", &kms_key_to_sdk(&key)).unwrap(), key);
        }
    }

    #[test]
    fn edges_become_pairs() {
        let edges = vec![DataflowEdge::new("a/antenna-downlink/d", "a/dataflow-endpoint/e")];
        assert_eq!(
            edges_to_sdk(&edges),
            vec![vec![
                "a/antenna-downlink/d".to_string(),
                "a/dataflow-endpoint/e".to_string()
            ]]
        );
    }
}
