use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use groundctl_client::AwsClientFactory;
use groundctl_config::GroundctlConfig;
use groundctl_engine::{Console, DialoguerPrompter};
use groundctl_telemetry::EventLogger;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Settings file; replaces config/groundctl.yaml and the GROUNDCTL_ENV overlay
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<GroundctlConfig, groundctl_config::ConfigError> {
        match &self.config {
            Some(path) => GroundctlConfig::load_from_path(path),
            None => GroundctlConfig::load(),
        }
    }
}

pub async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = cli.load_config()?;
    EventLogger::init(&config.telemetry.log_level);
    info!(
        regions = config.regions.len(),
        max_attempts = config.client.max_attempts,
        "configuration loaded"
    );

    let factory = AwsClientFactory::new(config.client);
    let mut console = Console::new(
        factory,
        DialoguerPrompter::new(),
        io::stdout(),
        config.regions,
    );

    console.run().await.map_err(|e| {
        error!(error = %e, "session aborted");
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_is_optional() {
        let cli = Cli::try_parse_from(["groundctl"]).unwrap();
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["groundctl", "--config", "ops.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ops.yaml")));
    }
}
