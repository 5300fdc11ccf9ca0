//! Error types for the stack deployer

use thiserror::Error;

/// Main error type for stack deployment
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    #[error("HTTP request failed: {status} ({method} {url}):\n{body}")]
    ApiError {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Stack definition not found: {0}")]
    DefinitionNotFound(String),

    #[error("Stack not found: {0}")]
    StackNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
