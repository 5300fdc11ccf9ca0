//! Run options parsed from configuration inputs

use std::path::PathBuf;

use crate::config::ConfigSource;
use crate::definition::template::parse_template_vars;
use crate::deploy::DeployParams;
use crate::errors::DeployError;
use crate::logs::LogLevel;

/// Input keys, as supplied by the host environment
mod keys {
    pub const PORTAINER_HOST: &str = "portainer-host";
    pub const API_KEY: &str = "api-key";
    pub const ENDPOINT_ID: &str = "endpoint-id";
    pub const STACK_NAME: &str = "stack-name";
    pub const STACK_ID: &str = "stack-id";
    pub const STACK_DEFINITION: &str = "stack-definition";
    pub const TEMPLATE_VARIABLES: &str = "template-variables";
    pub const IMAGE: &str = "image";
    pub const PRUNE: &str = "prune";
    pub const PULL_IMAGE: &str = "pullImage";
    pub const LOG_LEVEL: &str = "log-level";
}

/// Options for one invocation
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Log level
    pub log_level: LogLevel,

    /// Deployment parameters
    pub deploy: DeployParams,
}

impl AppOptions {
    /// Parse and validate options from a configuration source.
    ///
    /// All input errors surface here, before any file or network access.
    pub fn from_config(cfg: &dyn ConfigSource) -> Result<Self, DeployError> {
        let host = required(cfg, keys::PORTAINER_HOST)?;
        let api_key = required(cfg, keys::API_KEY)?;
        let endpoint_id = parse_i64(keys::ENDPOINT_ID, &required(cfg, keys::ENDPOINT_ID)?)?;

        let stack_name = cfg
            .get(keys::STACK_NAME)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let stack_id = match cfg.get(keys::STACK_ID) {
            Some(raw) => Some(parse_i64(keys::STACK_ID, &raw)?),
            None => None,
        };
        if stack_name.is_none() && stack_id.is_none() {
            return Err(DeployError::ConfigError(
                "either stack-name or stack-id must be supplied".to_string(),
            ));
        }

        let definition_file = required(cfg, keys::STACK_DEFINITION)?;
        let stack_definition_file = workspace_root().join(definition_file);

        let template_variables = cfg
            .get(keys::TEMPLATE_VARIABLES)
            .map(|raw| parse_template_vars(&raw))
            .transpose()?;

        let image = cfg.get(keys::IMAGE);

        let prune = parse_bool(keys::PRUNE, cfg.get(keys::PRUNE))?;
        let pull_image = parse_bool(keys::PULL_IMAGE, cfg.get(keys::PULL_IMAGE))?;

        let log_level = match cfg.get(keys::LOG_LEVEL) {
            Some(raw) => raw.parse().map_err(DeployError::ConfigError)?,
            None => LogLevel::default(),
        };

        Ok(Self {
            log_level,
            deploy: DeployParams {
                host,
                api_key,
                endpoint_id,
                stack_name,
                stack_id,
                stack_definition_file,
                template_variables,
                image,
                prune,
                pull_image,
            },
        })
    }
}

fn required(cfg: &dyn ConfigSource, key: &str) -> Result<String, DeployError> {
    cfg.get(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DeployError::ConfigError(format!("required input {:?} is missing", key)))
}

fn parse_i64(key: &str, raw: &str) -> Result<i64, DeployError> {
    raw.trim().parse().map_err(|_| {
        DeployError::ConfigError(format!("input {:?} must be an integer, got {:?}", key, raw))
    })
}

/// Boolean inputs accept the runner's `getBooleanInput` spellings;
/// absent means false
fn parse_bool(key: &str, raw: Option<String>) -> Result<bool, DeployError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("true") | Some("True") | Some("TRUE") => Ok(true),
        Some("false") | Some("False") | Some("FALSE") => Ok(false),
        Some(other) => Err(DeployError::ConfigError(format!(
            "input {:?} must be a boolean, got {:?}",
            key, other
        ))),
    }
}

/// Workspace root the definition path is resolved against.
/// Absolute definition paths are used as given.
fn workspace_root() -> PathBuf {
    std::env::var("GITHUB_WORKSPACE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base_config() -> HashMap<String, String> {
        let mut cfg = HashMap::new();
        cfg.insert("portainer-host".to_string(), "https://portainer.example.com".to_string());
        cfg.insert("api-key".to_string(), "ptr_key".to_string());
        cfg.insert("endpoint-id".to_string(), "2".to_string());
        cfg.insert("stack-name".to_string(), "web".to_string());
        cfg.insert("stack-definition".to_string(), "docker-compose.yml".to_string());
        cfg
    }

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let options = AppOptions::from_config(&base_config()).unwrap();
        assert_eq!(options.deploy.endpoint_id, 2);
        assert_eq!(options.deploy.stack_name.as_deref(), Some("web"));
        assert_eq!(options.deploy.stack_id, None);
        assert!(!options.deploy.prune);
        assert!(!options.deploy.pull_image);
        assert_eq!(options.deploy.image, None);
        assert_eq!(options.log_level, LogLevel::Info);
    }

    #[test]
    fn test_missing_required_input() {
        let mut cfg = base_config();
        cfg.remove("api-key");
        assert!(matches!(
            AppOptions::from_config(&cfg),
            Err(DeployError::ConfigError(_))
        ));
    }

    #[test]
    fn test_neither_name_nor_id() {
        let mut cfg = base_config();
        cfg.remove("stack-name");
        let err = AppOptions::from_config(&cfg).unwrap_err();
        match err {
            DeployError::ConfigError(message) => {
                assert!(message.contains("stack-name or stack-id"));
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_stack_name_counts_as_absent() {
        let mut cfg = base_config();
        cfg.insert("stack-name".to_string(), "   ".to_string());
        assert!(AppOptions::from_config(&cfg).is_err());

        cfg.insert("stack-id".to_string(), "42".to_string());
        let options = AppOptions::from_config(&cfg).unwrap();
        assert_eq!(options.deploy.stack_name, None);
        assert_eq!(options.deploy.stack_id, Some(42));
    }

    #[test]
    fn test_unparseable_endpoint_id() {
        let mut cfg = base_config();
        cfg.insert("endpoint-id".to_string(), "primary".to_string());
        assert!(matches!(
            AppOptions::from_config(&cfg),
            Err(DeployError::ConfigError(_))
        ));
    }

    #[test]
    fn test_unparseable_stack_id() {
        let mut cfg = base_config();
        cfg.insert("stack-id".to_string(), "forty-two".to_string());
        assert!(matches!(
            AppOptions::from_config(&cfg),
            Err(DeployError::ConfigError(_))
        ));
    }

    #[test]
    fn test_boolean_spellings() {
        let mut cfg = base_config();
        cfg.insert("prune".to_string(), "True".to_string());
        cfg.insert("pullImage".to_string(), "TRUE".to_string());
        let options = AppOptions::from_config(&cfg).unwrap();
        assert!(options.deploy.prune);
        assert!(options.deploy.pull_image);

        cfg.insert("prune".to_string(), "yes".to_string());
        assert!(AppOptions::from_config(&cfg).is_err());
    }

    #[test]
    fn test_template_variables_parsed() {
        let mut cfg = base_config();
        cfg.insert(
            "template-variables".to_string(),
            r#"{"tag":"2.0"}"#.to_string(),
        );
        let options = AppOptions::from_config(&cfg).unwrap();
        let vars = options.deploy.template_variables.unwrap();
        assert!(vars.contains_key("tag"));
    }

    #[test]
    fn test_invalid_template_variables() {
        let mut cfg = base_config();
        cfg.insert("template-variables".to_string(), "not json".to_string());
        assert!(matches!(
            AppOptions::from_config(&cfg),
            Err(DeployError::ConfigError(_))
        ));
    }

    #[test]
    fn test_log_level_input() {
        let mut cfg = base_config();
        cfg.insert("log-level".to_string(), "debug".to_string());
        let options = AppOptions::from_config(&cfg).unwrap();
        assert_eq!(options.log_level, LogLevel::Debug);
    }
}
