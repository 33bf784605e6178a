//! Defines the GroundStation trait the menus call through.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    Config, ConfigSummary, ConfigType, DataflowEndpointGroup, MissionProfile,
    MissionProfileSummary,
};

/// Remote operation names, used in errors and logs.
pub mod ops {
    pub const LIST_MISSION_PROFILES: &str = "ListMissionProfiles";
    pub const GET_MISSION_PROFILE: &str = "GetMissionProfile";
    pub const UPDATE_MISSION_PROFILE: &str = "UpdateMissionProfile";
    pub const LIST_CONFIGS: &str = "ListConfigs";
    pub const GET_CONFIG: &str = "GetConfig";
    pub const UPDATE_CONFIG: &str = "UpdateConfig";
    pub const LIST_DATAFLOW_ENDPOINT_GROUPS: &str = "ListDataflowEndpointGroups";
    pub const GET_DATAFLOW_ENDPOINT_GROUP: &str = "GetDataflowEndpointGroup";
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, auth, throttling or service-side failure.
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    /// The service answered with a shape this tool cannot represent.
    #[error("unexpected {operation} response: {message}")]
    UnexpectedResponse {
        operation: &'static str,
        message: String,
    },

    /// A local value could not be expressed as a request.
    #[error("cannot build {operation} request: {message}")]
    InvalidRequest {
        operation: &'static str,
        message: String,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

/// Region-scoped access to the Ground Station API.
///
/// Reads return the full current representation. Updates take the full
/// representation; anything omitted is reset remotely.
#[async_trait]
pub trait GroundStation: Send + Sync {
    async fn list_mission_profiles(&self) -> Result<Vec<MissionProfileSummary>, ClientError>;

    async fn get_mission_profile(&self, id: &str) -> Result<MissionProfile, ClientError>;

    async fn update_mission_profile(&self, profile: &MissionProfile) -> Result<(), ClientError>;

    async fn list_configs(&self) -> Result<Vec<ConfigSummary>, ClientError>;

    async fn get_config(&self, id: &str, config_type: ConfigType) -> Result<Config, ClientError>;

    async fn update_config(&self, config: &Config) -> Result<(), ClientError>;

    /// Ids of every dataflow endpoint group in the region.
    async fn list_dataflow_endpoint_groups(&self) -> Result<Vec<String>, ClientError>;

    async fn get_dataflow_endpoint_group(
        &self,
        id: &str,
    ) -> Result<DataflowEndpointGroup, ClientError>;
}

/// Opens a [`GroundStation`] client for one region.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(&self, region: &str) -> Result<Box<dyn GroundStation>, ClientError>;
}
