//! ## groundctl-engine::display
//! Human-readable rendering of fetched resources.
//!
//! Payloads are printed as 4-space indented JSON in the API's own member
//! names. Demod/decode configs carry their demodulation and decode settings
//! as JSON encoded inside strings; those are decoded before printing so the
//! operator sees structure instead of escaped text.

use std::collections::BTreeSet;
use std::io::{self, Write};

use serde::Serialize;
use serde_json::{json, Value};

use groundctl_core::model::{
    Config, ConfigData, Criticality, DataflowEndpointGroup, DemodDecodeConfig, EndpointDetails,
    MissionProfile, MissionProfileSummary,
};

const BANNER: &str = "========================================================================";
pub(crate) const RULE: &str = "--------------------------------------------------------------";

/// Serialize with a 4-space indent.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Replace the two string-encoded documents with their parsed form.
pub fn expand_demod_decode(config: &DemodDecodeConfig) -> Result<Value, serde_json::Error> {
    let decode: Value = serde_json::from_str(&config.decode_config.unvalidated_json)?;
    let demodulation: Value = serde_json::from_str(&config.demodulation_config.unvalidated_json)?;

    Ok(json!({
        "antennaDownlinkDemodDecodeConfig": {
            "decodeConfig": { "unvalidatedJSON": decode },
            "demodulationConfig": { "unvalidatedJSON": demodulation },
            "spectrumConfig": serde_json::to_value(&config.spectrum_config)?,
        }
    }))
}

/// Pretty JSON for a config payload, as shown under each dataflow edge.
pub fn render_config_data(data: &ConfigData) -> Result<String, serde_json::Error> {
    match data {
        ConfigData::AntennaDownlinkDemodDecode(dd) => to_pretty_json(&expand_demod_decode(dd)?),
        other => to_pretty_json(other),
    }
}

pub fn write_profile_banner<W: Write>(out: &mut W, summary: &MissionProfileSummary) -> io::Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{BANNER}")?;
    writeln!(out, "Mission Profile Name : {}", summary.name)?;
    writeln!(out, "Mission Profile ID : {}", summary.id)?;
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{BANNER}")
}

pub fn write_profile_timing<W: Write>(out: &mut W, profile: &MissionProfile) -> io::Result<()> {
    writeln!(
        out,
        "Contact pre pass duration : {}s",
        profile.contact_pre_pass_duration_seconds
    )?;
    writeln!(
        out,
        "Contact post pass duration : {}s",
        profile.contact_post_pass_duration_seconds
    )?;
    writeln!(
        out,
        "Minimum viable contact duration : {}s",
        profile.minimum_viable_contact_duration_seconds
    )
}

pub fn write_autotrack<W: Write>(out: &mut W, autotrack: Criticality) -> io::Result<()> {
    writeln!(out, "Antenna autotrack : {autotrack}")?;
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "Data Flow Edges and their Configs:")
}

/// Heading plus payload for one config found on a dataflow edge.
pub fn write_edge_config<W: Write>(out: &mut W, config: &Config) -> Result<(), crate::EngineError> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "{} : {}", config.config_type(), config.name)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "{}", render_config_data(&config.config_data)?)?;
    Ok(())
}

/// True when any endpoint in the group carries one of `names`.
pub fn group_matches(group: &DataflowEndpointGroup, names: &BTreeSet<String>) -> bool {
    names.iter().any(|name| group.has_endpoint_named(name))
}

fn write_endpoint<W: Write>(out: &mut W, endpoint: &EndpointDetails) -> io::Result<()> {
    let target = endpoint
        .address
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".into());

    writeln!(out, "Name      : {}", endpoint.name)?;
    writeln!(out, "Status    : {}", endpoint.status.as_deref().unwrap_or("-"))?;
    writeln!(out, "Sec group : {}", endpoint.security_group_ids.join(", "))?;
    writeln!(out, "Target    : {target}")?;
    writeln!(out)
}

pub fn write_endpoint_group<W: Write>(out: &mut W, group: &DataflowEndpointGroup) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Data Flow Endpoint Group : {}", group.id)?;
    writeln!(out, "Data Flow Endpoints in this Group:")?;
    writeln!(out, "{RULE}")?;
    for endpoint in &group.endpoints {
        write_endpoint(out, endpoint)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundctl_core::model::*;

    fn demod() -> DemodDecodeConfig {
        DemodDecodeConfig {
            spectrum_config: SpectrumConfig {
                center_frequency: Frequency::mhz(7812.0),
                bandwidth: FrequencyBandwidth {
                    units: FrequencyUnits::Mhz,
                    value: 30.0,
                },
                polarization: Some(Polarization::RightHand),
            },
            demodulation_config: UnvalidatedJson {
                unvalidated_json: r#"{"type":"QPSK","qpsk":{"carrierFrequencyRecovery":{"centerFrequency":{"value":7812,"units":"MHz"}},"symbolTimingRecovery":{"symbolRate":{"value":15,"units":"Msps"}}}}"#.into(),
            },
            decode_config: UnvalidatedJson {
                unvalidated_json: r#"{"edges":[{"from":"I-Ingress","to":"IQ-Recombiner"}],"nodeConfigs":{"I-Ingress":{"type":"CODED_SYMBOLS_INGRESS"}}}"#.into(),
            },
        }
    }

    #[test]
    fn demod_decode_blobs_decode_and_reencode_without_loss() {
        let config = demod();
        let expanded = expand_demod_decode(&config).unwrap();
        let inner = &expanded["antennaDownlinkDemodDecodeConfig"];

        let decode = &inner["decodeConfig"]["unvalidatedJSON"];
        let reencoded = serde_json::to_string(decode).unwrap();
        let original: Value = serde_json::from_str(&config.decode_config.unvalidated_json).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&reencoded).unwrap(), original);
        assert_eq!(reencoded, config.decode_config.unvalidated_json);

        let demod = &inner["demodulationConfig"]["unvalidatedJSON"];
        assert_eq!(demod["type"], "QPSK");
        assert_eq!(
            serde_json::to_string(demod).unwrap(),
            config.demodulation_config.unvalidated_json
        );

        assert_eq!(inner["spectrumConfig"]["centerFrequency"]["value"], 7812.0);
    }

    #[test]
    fn invalid_embedded_json_is_an_error() {
        let mut config = demod();
        config.decode_config.unvalidated_json = "{not json".into();
        assert!(expand_demod_decode(&config).is_err());
    }

    #[test]
    fn pretty_json_uses_four_spaces() {
        let data = ConfigData::Tracking(TrackingConfig {
            autotrack: Criticality::Required,
        });
        let text = render_config_data(&data).unwrap();
        assert_eq!(
            text,
            "{\n    \"trackingConfig\": {\n        \"autotrack\": \"REQUIRED\"\n    }\n}"
        );
    }

    #[test]
    fn endpoint_block_lists_target_and_groups() {
        let group = DataflowEndpointGroup {
            id: "dfeg-1".into(),
            endpoints: vec![EndpointDetails {
                name: "aqua-downlink".into(),
                address: Some(SocketAddress {
                    name: "10.0.0.5".into(),
                    port: 55888,
                }),
                status: Some("healthy".into()),
                security_group_ids: vec!["sg-1".into(), "sg-2".into()],
            }],
        };
        let mut out = Vec::new();
        write_endpoint_group(&mut out, &group).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Data Flow Endpoint Group : dfeg-1"));
        assert!(text.contains("Sec group : sg-1, sg-2"));
        assert!(text.contains("Target    : 10.0.0.5:55888"));
    }

    #[test]
    fn group_match_uses_any_seen_name() {
        let group = DataflowEndpointGroup {
            id: "g".into(),
            endpoints: vec![EndpointDetails {
                name: "b".into(),
                address: None,
                status: None,
                security_group_ids: vec![],
            }],
        };
        let names: BTreeSet<String> = ["a".to_string(), "b".to_string()].into();
        assert!(group_matches(&group, &names));
        assert!(!group_matches(&group, &BTreeSet::from(["c".to_string()])));
    }
}
