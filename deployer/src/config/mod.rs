//! Configuration input sources
//!
//! Inputs arrive the way a CI runner supplies them: `INPUT_*` environment
//! variables, optionally overridden with `--key=value` command line
//! arguments. Both are string-valued; parsing and validation happen in
//! [`crate::app::options`]. The orchestrator never reads ambient process
//! state directly, so tests can drive it from a plain map.

use std::collections::HashMap;

/// A source of string-valued configuration inputs
pub trait ConfigSource {
    /// Look up a raw input value by key; empty values count as absent
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads inputs from `INPUT_*` environment variables.
///
/// The variable name is derived the way Actions-style runners do it:
/// spaces become underscores and the key is uppercased, so `stack-name`
/// is read from `INPUT_STACK-NAME`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        let var = format!("INPUT_{}", key.replace(' ', "_").to_uppercase());
        std::env::var(var).ok().filter(|v| !v.is_empty())
    }
}

/// Inputs parsed from `--key=value` command line arguments
#[derive(Debug, Clone, Default)]
pub struct ArgsConfig {
    values: HashMap<String, String>,
}

impl ArgsConfig {
    /// Parse from an argument iterator (binary name already skipped).
    /// Standalone flags like `--version` are stored as `"true"`.
    pub fn parse<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut values = HashMap::new();
        for arg in args {
            if let Some((key, value)) = arg.split_once('=') {
                let clean_key = key.trim_start_matches('-');
                values.insert(clean_key.to_string(), value.to_string());
            } else if arg.starts_with("--") {
                let clean_key = arg.trim_start_matches('-');
                values.insert(clean_key.to_string(), "true".to_string());
            }
        }
        Self { values }
    }

    /// Check whether a key was supplied at all
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl ConfigSource for ArgsConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned().filter(|v| !v.is_empty())
    }
}

/// Layers sources; earlier sources take precedence
#[derive(Default)]
pub struct Layered {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Layered {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl ConfigSource for Layered {
    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|s| s.get(key))
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_key_value() {
        let args = ArgsConfig::parse(vec!["--stack-name=web".to_string()]);
        assert_eq!(args.get("stack-name"), Some("web".to_string()));
    }

    #[test]
    fn test_args_standalone_flag() {
        let args = ArgsConfig::parse(vec!["--version".to_string()]);
        assert!(args.contains("version"));
        assert_eq!(args.get("version"), Some("true".to_string()));
    }

    #[test]
    fn test_args_empty_value_counts_as_absent() {
        let args = ArgsConfig::parse(vec!["--image=".to_string()]);
        assert!(args.contains("image"));
        assert_eq!(args.get("image"), None);
    }

    #[test]
    fn test_layered_precedence() {
        let mut first = HashMap::new();
        first.insert("endpoint-id".to_string(), "2".to_string());
        let mut second = HashMap::new();
        second.insert("endpoint-id".to_string(), "9".to_string());
        second.insert("stack-name".to_string(), "web".to_string());

        let layered = Layered::new().with(first).with(second);
        assert_eq!(layered.get("endpoint-id"), Some("2".to_string()));
        assert_eq!(layered.get("stack-name"), Some("web".to_string()));
        assert_eq!(layered.get("image"), None);
    }
}
