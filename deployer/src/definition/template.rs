//! Template variables and expansion
//!
//! Variables are a closed set of scalars plus nested mappings; arrays
//! and nulls are rejected when the input is parsed rather than surfacing
//! as engine errors mid-render.

use std::collections::BTreeMap;

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::DeployError;

/// A template variable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(BTreeMap<String, TemplateValue>),
}

/// Variables applied to a stack definition template
pub type TemplateVars = BTreeMap<String, TemplateValue>;

/// Parse template variables from their JSON input form
pub fn parse_template_vars(raw: &str) -> Result<TemplateVars, DeployError> {
    serde_json::from_str(raw)
        .map_err(|e| DeployError::ConfigError(format!("Invalid template-variables: {}", e)))
}

/// Expand the definition text with the given variables.
///
/// Unknown placeholders follow the engine's default policy and render
/// as empty strings.
pub fn render(definition: &str, vars: &TemplateVars) -> Result<String, DeployError> {
    info!(
        "Applying template variables for keys: {:?}",
        vars.keys().collect::<Vec<_>>()
    );
    let handlebars = Handlebars::new();
    Ok(handlebars.render_template(definition, vars)?)
}
