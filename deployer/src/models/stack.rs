//! Stack models
//!
//! Wire shapes of the management server's stack API. Stack records come
//! back PascalCase; the update payload is sent camelCase.

use serde::{Deserialize, Serialize};

/// One environment variable attached to a stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

/// A stack as known to the management server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackRecord {
    /// Stack id
    pub id: i64,

    /// Stack name, usually unique per endpoint
    pub name: String,

    /// The endpoint (deployment target) the stack is bound to
    pub endpoint_id: i64,

    /// Environment variables currently set on the stack
    #[serde(default)]
    pub env: Vec<EnvVar>,
}

/// Payload of a stack update.
///
/// `env` is always carried over verbatim from the fetched record; this
/// tool only changes the definition text and the deployment flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackUpdateRequest {
    pub env: Vec<EnvVar>,
    pub stack_file_content: String,
    pub prune: bool,
    pub pull_image: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_record_wire_format() {
        let record: StackRecord = serde_json::from_str(
            r#"{"Id":42,"Name":"web","EndpointId":2,"Env":[{"name":"FOO","value":"bar"}]}"#,
        )
        .unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.name, "web");
        assert_eq!(record.endpoint_id, 2);
        assert_eq!(record.env[0].name, "FOO");
    }

    #[test]
    fn test_stack_record_env_defaults_empty() {
        let record: StackRecord =
            serde_json::from_str(r#"{"Id":1,"Name":"db","EndpointId":3}"#).unwrap();
        assert!(record.env.is_empty());
    }

    #[test]
    fn test_update_request_wire_format() {
        let body = StackUpdateRequest {
            env: vec![],
            stack_file_content: "services: {}".to_string(),
            prune: false,
            pull_image: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "env": [],
                "stackFileContent": "services: {}",
                "prune": false,
                "pullImage": true,
            })
        );
    }
}
