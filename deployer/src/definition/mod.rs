//! Stack definition builder
//!
//! Produces the final definition text submitted to the server: reads the
//! local definition file, optionally expands template variables, and
//! optionally rewrites image references in place. The document is treated
//! as plain text throughout; it is never parsed as YAML.

pub mod template;

use std::path::Path;

use regex::{Captures, Regex};
use tokio::fs;
use tracing::info;

use crate::errors::DeployError;
use self::template::TemplateVars;

/// Build the definition text to deploy
pub async fn build_stack_definition(
    path: &Path,
    template_vars: Option<&TemplateVars>,
    image: Option<&str>,
) -> Result<String, DeployError> {
    info!("Reading stack definition from {}", path.display());
    let definition = fs::read_to_string(path)
        .await
        .map_err(|e| DeployError::DefinitionNotFound(format!("{}: {}", path.display(), e)))?;
    if definition.is_empty() {
        return Err(DeployError::DefinitionNotFound(format!(
            "{} is empty",
            path.display()
        )));
    }

    let definition = match template_vars {
        Some(vars) => template::render(&definition, vars)?,
        None => definition,
    };

    match image {
        Some(image) => substitute_image(&definition, image),
        None => {
            info!("No new image supplied, keeping the image from the stack definition");
            Ok(definition)
        }
    }
}

/// The repository portion of an image reference: everything before the
/// first `:`, or the whole string when there is no tag
fn repository_of(image: &str) -> &str {
    match image.find(':') {
        Some(idx) => &image[..idx],
        None => image,
    }
}

/// Rewrite every `image:` declaration whose repository matches the new
/// image's repository exactly.
///
/// Handles tagged and tag-less occurrences, quoted with single quotes,
/// double quotes, or bare; the quote style of each occurrence is
/// preserved. Occurrences with a different repository are left alone.
pub fn substitute_image(definition: &str, image: &str) -> Result<String, DeployError> {
    let repository = repository_of(image);
    if repository.is_empty() {
        return Err(DeployError::ConfigError(format!(
            "image {:?} has no repository before the tag separator",
            image
        )));
    }

    info!("Inserting image {} into the stack definition", image);

    let re = Regex::new(r#"(image:\s*)(["']?)([^"'\s]+)(["']?)"#)
        .map_err(|e| DeployError::ConfigError(format!("image pattern: {}", e)))?;

    let replaced = re.replace_all(definition, |caps: &Captures| {
        if repository_of(&caps[3]) == repository {
            format!("{}{}{}{}", &caps[1], &caps[2], image, &caps[4])
        } else {
            caps[0].to_string()
        }
    });
    Ok(replaced.into_owned())
}
