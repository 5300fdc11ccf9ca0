//! Single-shot run entry point

use tracing::info;

use crate::app::options::AppOptions;
use crate::config::ConfigSource;
use crate::deploy::deploy_stack;
use crate::errors::DeployError;
use crate::logs::{init_logging, LogOptions};

/// Parse inputs, deploy, and report the outcome
pub async fn run(cfg: &dyn ConfigSource) -> Result<(), DeployError> {
    let options = AppOptions::from_config(cfg)?;

    let log_options = LogOptions {
        log_level: options.log_level.clone(),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    deploy_stack(&options.deploy).await?;
    info!("Deployment finished successfully");
    Ok(())
}
