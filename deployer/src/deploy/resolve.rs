//! Stack resolution
//!
//! Decides which existing stack an update applies to: by id, by name, or
//! by id with a name fallback when the id no longer exists. Resolution
//! failures carry a listing of the stacks that were found, so an operator
//! can correct the inputs without querying the server by hand.

use tracing::{info, warn};

use crate::errors::DeployError;
use crate::http::client::PortainerClient;
use crate::models::stack::StackRecord;

/// Resolve the stack an update applies to
pub async fn resolve_stack(
    client: &PortainerClient,
    stack_id: Option<i64>,
    stack_name: Option<&str>,
    endpoint_id: i64,
) -> Result<StackRecord, DeployError> {
    match (stack_id, stack_name) {
        (Some(id), name) => resolve_by_id(client, id, name, endpoint_id).await,
        (None, Some(name)) => resolve_by_name(client, name).await,
        (None, None) => Err(DeployError::ConfigError(
            "neither stack-name nor stack-id supplied".to_string(),
        )),
    }
}

async fn resolve_by_id(
    client: &PortainerClient,
    id: i64,
    name: Option<&str>,
    endpoint_id: i64,
) -> Result<StackRecord, DeployError> {
    match client.get_stack(id).await? {
        Some(stack) => {
            if stack.endpoint_id != endpoint_id {
                warn!(
                    "Stack {} belongs to endpoint {} but endpoint {} was requested, updating it anyway",
                    id, stack.endpoint_id, endpoint_id
                );
            }
            info!("Found stack by id {} (endpoint {})", stack.id, stack.endpoint_id);
            Ok(stack)
        }
        None => match name {
            Some(name) => fallback_by_name(client, id, name, endpoint_id).await,
            None => {
                let all = client.list_stacks().await?;
                Err(DeployError::StackNotFound(describe_candidates(
                    id,
                    &all,
                    endpoint_id,
                )))
            }
        },
    }
}

async fn fallback_by_name(
    client: &PortainerClient,
    id: i64,
    name: &str,
    endpoint_id: i64,
) -> Result<StackRecord, DeployError> {
    warn!(
        "Stack id {} not found, falling back to lookup by name {:?}",
        id, name
    );
    let candidates: Vec<StackRecord> = client
        .list_stacks()
        .await?
        .into_iter()
        .filter(|s| s.endpoint_id == endpoint_id)
        .collect();

    match candidates.iter().find(|s| s.name == name) {
        Some(stack) => {
            info!(
                "Found stack {:?} by name (id {}, endpoint {})",
                name, stack.id, stack.endpoint_id
            );
            Ok(stack.clone())
        }
        None => {
            let names: Vec<&str> = candidates.iter().map(|s| s.name.as_str()).collect();
            Err(DeployError::StackNotFound(format!(
                "no stack named {:?} among the {} stacks on endpoint {}: {:?}",
                name,
                candidates.len(),
                endpoint_id,
                names
            )))
        }
    }
}

async fn resolve_by_name(
    client: &PortainerClient,
    name: &str,
) -> Result<StackRecord, DeployError> {
    let all = client.list_stacks().await?;
    match all.into_iter().find(|s| s.name == name) {
        Some(stack) => {
            info!(
                "Found existing stack named {:?} (id {}, endpoint {})",
                name, stack.id, stack.endpoint_id
            );
            Ok(stack)
        }
        None => Err(DeployError::StackNotFound(format!(
            "no stack named {:?}; create the stack manually before deploying updates to it",
            name
        ))),
    }
}

/// Diagnostic listing for a failed by-id resolution: the known stacks,
/// split into those on the requested endpoint and everything else
fn describe_candidates(id: i64, all: &[StackRecord], endpoint_id: i64) -> String {
    let (matching, other): (Vec<&StackRecord>, Vec<&StackRecord>) =
        all.iter().partition(|s| s.endpoint_id == endpoint_id);

    let matching_names: Vec<String> = matching
        .iter()
        .map(|s| format!("{} (id {})", s.name, s.id))
        .collect();
    let other_names: Vec<String> = other
        .iter()
        .map(|s| format!("{} (id {}, endpoint {})", s.name, s.id, s.endpoint_id))
        .collect();

    format!(
        "stack id {} not found and no stack-name given for fallback; \
         {} stacks on endpoint {}: {:?}; {} stacks on other endpoints: {:?}",
        id,
        matching.len(),
        endpoint_id,
        matching_names,
        other.len(),
        other_names
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(id: i64, name: &str, endpoint_id: i64) -> StackRecord {
        StackRecord {
            id,
            name: name.to_string(),
            endpoint_id,
            env: vec![],
        }
    }

    #[test]
    fn test_describe_candidates_counts_per_endpoint() {
        let all = vec![stack(1, "web", 2), stack(2, "db", 2), stack(3, "web", 9)];
        let message = describe_candidates(42, &all, 2);
        assert!(message.contains("stack id 42 not found"));
        assert!(message.contains("2 stacks on endpoint 2"));
        assert!(message.contains("1 stacks on other endpoints"));
        assert!(message.contains("web (id 1)"));
        assert!(message.contains("web (id 3, endpoint 9)"));
    }

    #[test]
    fn test_describe_candidates_empty_server() {
        let message = describe_candidates(42, &[], 2);
        assert!(message.contains("0 stacks on endpoint 2"));
    }
}
