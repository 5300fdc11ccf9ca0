//! Deploy orchestration
//!
//! One deploy-and-update operation per invocation: build the definition
//! text, resolve the target stack, push the update. Nothing is retried;
//! a failed update is re-triggered by a fresh invocation. No version
//! token is checked before the update, so a concurrent modification on
//! the server side can be overwritten.

pub mod resolve;

use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::definition::build_stack_definition;
use crate::definition::template::TemplateVars;
use crate::errors::DeployError;
use crate::http::client::PortainerClient;
use crate::models::stack::StackUpdateRequest;
use self::resolve::resolve_stack;

/// Parameters for one deploy-and-update run.
///
/// At least one of `stack_name`/`stack_id` must be present; this is
/// checked before any remote call is made.
#[derive(Debug, Clone)]
pub struct DeployParams {
    /// Management server host URL
    pub host: String,

    /// API credential
    pub api_key: String,

    /// Target endpoint id
    pub endpoint_id: i64,

    /// Stack name, used for lookup or as fallback for a stale id
    pub stack_name: Option<String>,

    /// Stack id, preferred over name lookup when present
    pub stack_id: Option<i64>,

    /// Path to the local stack definition file
    pub stack_definition_file: PathBuf,

    /// Variables expanded into the definition before submission
    pub template_variables: Option<TemplateVars>,

    /// Replacement image reference
    pub image: Option<String>,

    /// Prune services no longer in the definition
    pub prune: bool,

    /// Pull the image when redeploying
    pub pull_image: bool,
}

/// Resolve the target stack and push the rebuilt definition to it
pub async fn deploy_stack(params: &DeployParams) -> Result<(), DeployError> {
    let client = PortainerClient::new(&params.host, &params.api_key)?;

    let definition = build_stack_definition(
        &params.stack_definition_file,
        params.template_variables.as_ref(),
        params.image.as_deref(),
    )
    .await?;
    debug!("Definition to deploy:\n{}", definition);

    let result = update_existing_stack(&client, params, definition).await;
    if let Err(e) = &result {
        error!("Deployment failed: {}", e);
    }
    result
}

async fn update_existing_stack(
    client: &PortainerClient,
    params: &DeployParams,
    definition: String,
) -> Result<(), DeployError> {
    let stack = resolve_stack(
        client,
        params.stack_id,
        params.stack_name.as_deref(),
        params.endpoint_id,
    )
    .await?;

    info!(
        "Updating stack... id: {} endpoint: {}",
        stack.id, stack.endpoint_id
    );
    info!(
        "Update flags: prune={}, pullImage={}",
        params.prune, params.pull_image
    );

    let body = StackUpdateRequest {
        env: stack.env.clone(),
        stack_file_content: definition,
        prune: params.prune,
        pull_image: params.pull_image,
    };
    client.update_stack(stack.id, stack.endpoint_id, &body).await?;

    info!("Stack updated successfully");
    Ok(())
}
