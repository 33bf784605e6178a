//! In-memory Ground Station backend.
//!
//! Holds resources in process and records every update it accepts. Used to
//! drive the menus without network access.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::{ops, ClientError, ClientFactory, GroundStation};
use crate::model::{
    Config, ConfigSummary, ConfigType, DataflowEndpointGroup, MissionProfile,
    MissionProfileSummary,
};

#[derive(Default)]
struct State {
    profiles: Vec<MissionProfile>,
    configs: Vec<Config>,
    groups: Vec<DataflowEndpointGroup>,
    failures: HashMap<&'static str, String>,
    profile_updates: Vec<MissionProfile>,
    config_updates: Vec<Config>,
}

/// Shared handle; clones see the same resources.
#[derive(Clone, Default)]
pub struct InMemoryGroundStation {
    state: Arc<Mutex<State>>,
}

impl InMemoryGroundStation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: MissionProfile) -> Self {
        self.state.lock().profiles.push(profile);
        self
    }

    pub fn with_config(self, config: Config) -> Self {
        self.state.lock().configs.push(config);
        self
    }

    pub fn with_group(self, group: DataflowEndpointGroup) -> Self {
        self.state.lock().groups.push(group);
        self
    }

    /// Make every call of `operation` fail with `message`.
    pub fn fail(&self, operation: &'static str, message: impl Into<String>) {
        self.state.lock().failures.insert(operation, message.into());
    }

    pub fn profile_updates(&self) -> Vec<MissionProfile> {
        self.state.lock().profile_updates.clone()
    }

    pub fn config_updates(&self) -> Vec<Config> {
        self.state.lock().config_updates.clone()
    }

    fn check(&self, operation: &'static str) -> Result<(), ClientError> {
        match self.state.lock().failures.get(operation) {
            Some(message) => Err(ClientError::Api {
                operation,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GroundStation for InMemoryGroundStation {
    async fn list_mission_profiles(&self) -> Result<Vec<MissionProfileSummary>, ClientError> {
        self.check(ops::LIST_MISSION_PROFILES)?;
        Ok(self
            .state
            .lock()
            .profiles
            .iter()
            .map(|p| MissionProfileSummary {
                id: p.mission_profile_id.clone(),
                name: p.name.clone(),
            })
            .collect())
    }

    async fn get_mission_profile(&self, id: &str) -> Result<MissionProfile, ClientError> {
        self.check(ops::GET_MISSION_PROFILE)?;
        self.state
            .lock()
            .profiles
            .iter()
            .find(|p| p.mission_profile_id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                kind: "mission profile",
                id: id.to_string(),
            })
    }

    async fn update_mission_profile(&self, profile: &MissionProfile) -> Result<(), ClientError> {
        self.check(ops::UPDATE_MISSION_PROFILE)?;
        let mut state = self.state.lock();
        let slot = state
            .profiles
            .iter_mut()
            .find(|p| p.mission_profile_id == profile.mission_profile_id)
            .ok_or_else(|| ClientError::NotFound {
                kind: "mission profile",
                id: profile.mission_profile_id.clone(),
            })?;
        *slot = profile.clone();
        state.profile_updates.push(profile.clone());
        Ok(())
    }

    async fn list_configs(&self) -> Result<Vec<ConfigSummary>, ClientError> {
        self.check(ops::LIST_CONFIGS)?;
        Ok(self
            .state
            .lock()
            .configs
            .iter()
            .map(|c| ConfigSummary {
                config_id: c.config_id.clone(),
                config_type: c.config_type(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn get_config(&self, id: &str, config_type: ConfigType) -> Result<Config, ClientError> {
        self.check(ops::GET_CONFIG)?;
        self.state
            .lock()
            .configs
            .iter()
            .find(|c| c.config_id == id && c.config_type() == config_type)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                kind: "config",
                id: id.to_string(),
            })
    }

    async fn update_config(&self, config: &Config) -> Result<(), ClientError> {
        self.check(ops::UPDATE_CONFIG)?;
        let mut state = self.state.lock();
        let slot = state
            .configs
            .iter_mut()
            .find(|c| c.config_id == config.config_id && c.config_type() == config.config_type())
            .ok_or_else(|| ClientError::NotFound {
                kind: "config",
                id: config.config_id.clone(),
            })?;
        *slot = config.clone();
        state.config_updates.push(config.clone());
        Ok(())
    }

    async fn list_dataflow_endpoint_groups(&self) -> Result<Vec<String>, ClientError> {
        self.check(ops::LIST_DATAFLOW_ENDPOINT_GROUPS)?;
        Ok(self.state.lock().groups.iter().map(|g| g.id.clone()).collect())
    }

    async fn get_dataflow_endpoint_group(
        &self,
        id: &str,
    ) -> Result<DataflowEndpointGroup, ClientError> {
        self.check(ops::GET_DATAFLOW_ENDPOINT_GROUP)?;
        self.state
            .lock()
            .groups
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                kind: "dataflow endpoint group",
                id: id.to_string(),
            })
    }
}

/// Hands out the same in-memory backend for every region, or one per
/// region when registered with [`InMemoryFactory::with_region`].
#[derive(Clone, Default)]
pub struct InMemoryFactory {
    default: InMemoryGroundStation,
    regions: HashMap<String, InMemoryGroundStation>,
}

impl InMemoryFactory {
    pub fn new(default: InMemoryGroundStation) -> Self {
        Self {
            default,
            regions: HashMap::new(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>, station: InMemoryGroundStation) -> Self {
        self.regions.insert(region.into(), station);
        self
    }
}

#[async_trait]
impl ClientFactory for InMemoryFactory {
    async fn connect(&self, region: &str) -> Result<Box<dyn GroundStation>, ClientError> {
        let station = self.regions.get(region).unwrap_or(&self.default).clone();
        Ok(Box::new(station))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    fn tracking(id: &str) -> Config {
        Config {
            config_id: id.into(),
            config_arn: None,
            name: format!("{id}-name"),
            config_data: ConfigData::Tracking(TrackingConfig {
                autotrack: Criticality::Preferred,
            }),
        }
    }

    #[tokio::test]
    async fn lists_configs_with_their_types() {
        let gs = InMemoryGroundStation::new().with_config(tracking("t-1"));
        let listed = gs.list_configs().await.unwrap();
        assert_eq!(
            listed,
            vec![ConfigSummary {
                config_id: "t-1".into(),
                config_type: ConfigType::Tracking,
                name: "t-1-name".into(),
            }]
        );
    }

    #[tokio::test]
    async fn telemetry_sink_configs_are_listed_and_fetched() {
        let sink = Config {
            config_id: "ts-1".into(),
            config_arn: None,
            name: "contact-telemetry".into(),
            config_data: ConfigData::TelemetrySink(TelemetrySinkConfig {
                telemetry_sink_type: TelemetrySinkType::KinesisDataStream,
                telemetry_sink_data: TelemetrySinkData::KinesisDataStream(KinesisDataStreamData {
                    kinesis_role_arn: "arn:aws:iam::1:role/sink".into(),
                    kinesis_data_stream_arn: "arn:aws:kinesis:us-east-2:1:stream/contacts".into(),
                }),
            }),
        };
        let gs = InMemoryGroundStation::new()
            .with_config(tracking("t-1"))
            .with_config(sink.clone());

        let types: Vec<_> = gs
            .list_configs()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.config_type)
            .collect();
        assert_eq!(types, vec![ConfigType::Tracking, ConfigType::TelemetrySink]);

        let fetched = gs.get_config("ts-1", ConfigType::TelemetrySink).await.unwrap();
        assert_eq!(fetched, sink);
    }

    #[tokio::test]
    async fn get_config_requires_matching_type() {
        let gs = InMemoryGroundStation::new().with_config(tracking("t-1"));
        assert!(gs.get_config("t-1", ConfigType::Tracking).await.is_ok());
        assert!(matches!(
            gs.get_config("t-1", ConfigType::AntennaUplink).await,
            Err(ClientError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn injected_failure_surfaces_as_api_error() {
        let gs = InMemoryGroundStation::new().with_config(tracking("t-1"));
        gs.fail(ops::UPDATE_CONFIG, "throttled");
        let err = gs.update_config(&tracking("t-1")).await.unwrap_err();
        assert_eq!(err.to_string(), "UpdateConfig failed: throttled");
        assert!(gs.config_updates().is_empty());
    }

    #[tokio::test]
    async fn factory_routes_by_region() {
        let east = InMemoryGroundStation::new().with_config(tracking("east"));
        let factory = InMemoryFactory::new(InMemoryGroundStation::new()).with_region("us-east-2", east);
        let client = factory.connect("us-east-2").await.unwrap();
        assert_eq!(client.list_configs().await.unwrap().len(), 1);
        let other = factory.connect("eu-west-1").await.unwrap();
        assert!(other.list_configs().await.unwrap().is_empty());
    }
}
