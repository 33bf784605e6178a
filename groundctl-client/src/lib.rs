//! # groundctl client
//!
//! [`GroundStation`] over `aws-sdk-groundstation`. Credentials come from the
//! ambient AWS profile chain; the region is picked by the operator. Retries
//! are left to the SDK's retry layer with the configured attempt budget.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_groundstation::config::Region;
use aws_sdk_groundstation::error::DisplayErrorContext;
use aws_sdk_groundstation::operation::update_mission_profile::builders::UpdateMissionProfileFluentBuilder;
use aws_sdk_groundstation::Client;
use tracing::{debug, instrument};

use groundctl_config::ClientConfig;
use groundctl_core::client::ops;
use groundctl_core::model::{
    Config, ConfigSummary, ConfigType, DataflowEndpointGroup, MissionProfile,
    MissionProfileSummary,
};
use groundctl_core::{ClientError, ClientFactory, GroundStation};

mod convert;

fn api_error(operation: &'static str, err: impl std::error::Error) -> ClientError {
    ClientError::Api {
        operation,
        message: DisplayErrorContext(err).to_string(),
    }
}

/// Region-scoped Ground Station client.
#[derive(Clone, Debug)]
pub struct AwsGroundStation {
    client: Client,
}

impl AwsGroundStation {
    /// Build a client for `region` from the default credential chain.
    pub async fn connect(region: &str, settings: &ClientConfig) -> Self {
        let retry = match settings.retry_mode.as_str() {
            "adaptive" => RetryConfig::adaptive(),
            _ => RetryConfig::standard(),
        }
        .with_max_attempts(settings.max_attempts);

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .retry_config(retry)
            .load()
            .await;

        let mut builder = aws_sdk_groundstation::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &settings.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        debug!(region, max_attempts = settings.max_attempts, "ground station client ready");
        Self {
            client: Client::from_conf(builder.build()),
        }
    }

    /// The full `UpdateMissionProfile` request for `profile`. Every field is
    /// resent, including the stream encryption and telemetry sink settings.
    fn profile_update_request(
        &self,
        profile: &MissionProfile,
    ) -> Result<UpdateMissionProfileFluentBuilder, ClientError> {
        const OP: &str = ops::UPDATE_MISSION_PROFILE;
        Ok(self
            .client
            .update_mission_profile()
            .mission_profile_id(&profile.mission_profile_id)
            .name(&profile.name)
            .minimum_viable_contact_duration_seconds(convert::to_seconds(
                OP,
                profile.minimum_viable_contact_duration_seconds,
            )?)
            .contact_pre_pass_duration_seconds(convert::to_seconds(
                OP,
                profile.contact_pre_pass_duration_seconds,
            )?)
            .contact_post_pass_duration_seconds(convert::to_seconds(
                OP,
                profile.contact_post_pass_duration_seconds,
            )?)
            .tracking_config_arn(&profile.tracking_config_arn)
            .set_dataflow_edges(Some(convert::edges_to_sdk(&profile.dataflow_edges)))
            .set_streams_kms_key(profile.streams_kms_key.as_ref().map(convert::kms_key_to_sdk))
            .set_streams_kms_role(profile.streams_kms_role.clone())
            .set_telemetry_sink_config_arn(profile.telemetry_sink_config_arn.clone()))
    }
}

#[async_trait]
impl GroundStation for AwsGroundStation {
    #[instrument(level = "debug", skip(self))]
    async fn list_mission_profiles(&self) -> Result<Vec<MissionProfileSummary>, ClientError> {
        let mut profiles = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_mission_profiles()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| api_error(ops::LIST_MISSION_PROFILES, e))?;

            for item in page.mission_profile_list() {
                let Some(id) = item.mission_profile_id() else {
                    continue;
                };
                profiles.push(MissionProfileSummary {
                    id: id.to_string(),
                    name: item.name().unwrap_or_default().to_string(),
                });
            }

            match page.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }
        Ok(profiles)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_mission_profile(&self, id: &str) -> Result<MissionProfile, ClientError> {
        let out = self
            .client
            .get_mission_profile()
            .mission_profile_id(id)
            .send()
            .await
            .map_err(|e| api_error(ops::GET_MISSION_PROFILE, e))?;
        convert::mission_profile(&out)
    }

    #[instrument(level = "debug", skip_all, fields(id = %profile.mission_profile_id))]
    async fn update_mission_profile(&self, profile: &MissionProfile) -> Result<(), ClientError> {
        self.profile_update_request(profile)?
            .send()
            .await
            .map_err(|e| api_error(ops::UPDATE_MISSION_PROFILE, e))?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_configs(&self) -> Result<Vec<ConfigSummary>, ClientError> {
        let mut configs = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_configs()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| api_error(ops::LIST_CONFIGS, e))?;

            for item in page.config_list() {
                let (Some(id), Some(capability)) = (item.config_id(), item.config_type()) else {
                    continue;
                };
                configs.push(ConfigSummary {
                    config_id: id.to_string(),
                    config_type: convert::config_type(ops::LIST_CONFIGS, capability)?,
                    name: item.name().unwrap_or_default().to_string(),
                });
            }

            match page.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }
        Ok(configs)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_config(&self, id: &str, config_type: ConfigType) -> Result<Config, ClientError> {
        let out = self
            .client
            .get_config()
            .config_id(id)
            .config_type(convert::capability(config_type))
            .send()
            .await
            .map_err(|e| api_error(ops::GET_CONFIG, e))?;
        convert::config(&out)
    }

    #[instrument(level = "debug", skip_all, fields(id = %config.config_id))]
    async fn update_config(&self, config: &Config) -> Result<(), ClientError> {
        self.client
            .update_config()
            .config_id(&config.config_id)
            .config_type(convert::capability(config.config_type()))
            .name(&config.name)
            .config_data(convert::config_data_to_sdk(&config.config_data)?)
            .send()
            .await
            .map_err(|e| api_error(ops::UPDATE_CONFIG, e))?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_dataflow_endpoint_groups(&self) -> Result<Vec<String>, ClientError> {
        let mut ids = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_dataflow_endpoint_groups()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| api_error(ops::LIST_DATAFLOW_ENDPOINT_GROUPS, e))?;

            ids.extend(
                page.dataflow_endpoint_group_list()
                    .iter()
                    .filter_map(|g| g.dataflow_endpoint_group_id())
                    .map(str::to_string),
            );

            match page.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }
        Ok(ids)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_dataflow_endpoint_group(
        &self,
        id: &str,
    ) -> Result<DataflowEndpointGroup, ClientError> {
        let out = self
            .client
            .get_dataflow_endpoint_group()
            .dataflow_endpoint_group_id(id)
            .send()
            .await
            .map_err(|e| api_error(ops::GET_DATAFLOW_ENDPOINT_GROUP, e))?;
        convert::endpoint_group(id, &out)
    }
}

/// Opens an [`AwsGroundStation`] per selected region.
#[derive(Clone, Debug, Default)]
pub struct AwsClientFactory {
    settings: ClientConfig,
}

impl AwsClientFactory {
    pub fn new(settings: ClientConfig) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ClientFactory for AwsClientFactory {
    async fn connect(&self, region: &str) -> Result<Box<dyn GroundStation>, ClientError> {
        Ok(Box::new(AwsGroundStation::connect(region, &self.settings).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_groundstation::types::KmsKey as SdkKmsKey;
    use groundctl_core::model::{DataflowEdge, KmsKey};

    fn offline_station() -> AwsGroundStation {
        let conf = aws_sdk_groundstation::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-2"))
            .build();
        AwsGroundStation {
            client: Client::from_conf(conf),
        }
    }

    fn profile() -> MissionProfile {
        MissionProfile {
            mission_profile_id: "mp-1".into(),
            name: "aqua".into(),
            minimum_viable_contact_duration_seconds: 180,
            contact_pre_pass_duration_seconds: 90,
            contact_post_pass_duration_seconds: 120,
            tracking_config_arn: "arn:config/tracking/t-1".into(),
            dataflow_edges: vec![DataflowEdge::new(
                "arn:config/antenna-downlink/d-1",
                "arn:config/dataflow-endpoint/e-1",
            )],
            streams_kms_key: Some(KmsKey::KmsKeyArn("arn:aws:kms:us-east-2:1:key/k-1".into())),
            streams_kms_role: Some("arn:aws:iam::1:role/streams".into()),
            telemetry_sink_config_arn: Some("arn:config/telemetry-sink/ts-1".into()),
        }
    }

    #[test]
    fn profile_update_resends_stream_settings() {
        let station = offline_station();
        let request = station.profile_update_request(&profile()).unwrap();
        let input = request.as_input();

        assert_eq!(
            input.get_streams_kms_key(),
            &Some(SdkKmsKey::KmsKeyArn("arn:aws:kms:us-east-2:1:key/k-1".into()))
        );
        assert_eq!(
            input.get_streams_kms_role().as_deref(),
            Some("arn:aws:iam::1:role/streams")
        );
        assert_eq!(
            input.get_telemetry_sink_config_arn().as_deref(),
            Some("arn:config/telemetry-sink/ts-1")
        );
        assert_eq!(input.get_contact_pre_pass_duration_seconds(), &Some(90));
    }

    #[test]
    fn unset_stream_settings_stay_unset() {
        let station = offline_station();
        let bare = MissionProfile {
            streams_kms_key: None,
            streams_kms_role: None,
            telemetry_sink_config_arn: None,
            ..profile()
        };
        let request = station.profile_update_request(&bare).unwrap();
        let input = request.as_input();
        assert_eq!(input.get_streams_kms_key(), &None);
        assert_eq!(input.get_streams_kms_role(), &None);
        assert_eq!(input.get_telemetry_sink_config_arn(), &None);
    }
}
