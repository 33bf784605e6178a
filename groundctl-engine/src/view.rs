//! Read-only walk through one mission profile.

use std::collections::BTreeSet;
use std::io::Write;

use tracing::debug;

use groundctl_core::model::{ConfigData, ConfigType, Criticality, MissionProfileSummary};
use groundctl_core::{parse_config_ref, GroundStation};

use crate::display;
use crate::menu::Next;
use crate::EngineError;

const NO_GROUP: &str = "There are no dataflow endpoints in this mission profile that are part of a dataflow endpoint group.";

/// Print the profile, every config on its dataflow edges, then the endpoint
/// group serving its dataflow endpoints. The session ends afterwards.
pub(crate) async fn show<W: Write>(
    gs: &dyn GroundStation,
    summary: &MissionProfileSummary,
    out: &mut W,
) -> Result<Next, EngineError> {
    display::write_profile_banner(out, summary)?;

    let profile = gs.get_mission_profile(&summary.id).await?;
    display::write_profile_timing(out, &profile)?;

    let autotrack = autotrack(gs, &profile.tracking_config_arn).await?;
    display::write_autotrack(out, autotrack)?;

    let mut endpoint_names = BTreeSet::new();
    for arn in profile.edge_config_arns() {
        let config_ref = parse_config_ref(arn)?;
        let config = gs
            .get_config(&config_ref.config_id, config_ref.config_type)
            .await?;
        display::write_edge_config(out, &config)?;

        if let ConfigData::DataflowEndpoint(endpoint) = &config.config_data {
            endpoint_names.insert(endpoint.dataflow_endpoint_name.clone());
        }
    }

    let mut selected = None;
    for group_id in gs.list_dataflow_endpoint_groups().await? {
        let group = gs.get_dataflow_endpoint_group(&group_id).await?;
        if display::group_matches(&group, &endpoint_names) {
            selected = Some(group);
            break;
        }
    }

    match selected {
        Some(group) => {
            debug!(group = %group.id, "endpoint group matched");
            display::write_endpoint_group(out, &group)?;
        }
        None => writeln!(out, "{NO_GROUP}")?,
    }
    Ok(Next::Quit)
}

async fn autotrack(gs: &dyn GroundStation, tracking_arn: &str) -> Result<Criticality, EngineError> {
    let config_ref = parse_config_ref(tracking_arn)?;
    let config = gs
        .get_config(&config_ref.config_id, ConfigType::Tracking)
        .await?;
    match config.config_data {
        ConfigData::Tracking(tracking) => Ok(tracking.autotrack),
        other => Err(EngineError::UnexpectedConfig {
            expected: ConfigType::Tracking,
            actual: other.config_type(),
        }),
    }
}
