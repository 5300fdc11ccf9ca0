//! HTTP client implementation

use reqwest::{header, Client, Response};
use tracing::{debug, error, warn};

use crate::errors::DeployError;
use crate::utils::mask_secret;

/// Registry authentication header value sent with every request
const REGISTRY_AUTH: &str = "eyJyZWdpc3RyeUlkIjoxfQ==";

/// HTTP client for a Portainer-compatible management server
pub struct PortainerClient {
    client: Client,
    base_url: String,
}

impl PortainerClient {
    /// Create a new client for the given host and API key
    pub fn new(host: &str, api_key: &str) -> Result<Self, DeployError> {
        let base_url = normalize_host(host)?;
        debug!("Management API base URL: {}", base_url);
        debug!("X-API-Key: {}", mask_secret(api_key));

        let mut key_value = header::HeaderValue::from_str(api_key).map_err(|_| {
            DeployError::ConfigError("api-key contains invalid header characters".to_string())
        })?;
        key_value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("X-API-Key", key_value);
        headers.insert("X-Registry-Auth", header::HeaderValue::from_static(REGISTRY_AUTH));

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Get the normalized base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Map a non-success response to an API error carrying the full
    /// request context (method, URL, status, response body)
    pub(crate) async fn check(
        method: &'static str,
        url: &str,
        response: Response,
    ) -> Result<Response, DeployError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        error!("HTTP {} {} failed: {} - {}", method, url, status, body);
        Err(DeployError::ApiError {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

/// Normalize a user-supplied host into the API base URL.
///
/// Trailing slashes are stripped, the scheme defaults to `https://`, and
/// a trailing `/api` is removed so the final URL never ends in `/api/api`.
fn normalize_host(host: &str) -> Result<String, DeployError> {
    let mut clean = host.trim().trim_end_matches('/').to_string();

    if !clean.starts_with("http://") && !clean.starts_with("https://") {
        warn!("Host has no scheme, assuming https://");
        clean = format!("https://{}", clean);
    }

    if let Some(stripped) = clean.strip_suffix("/api") {
        clean = stripped.to_string();
    }

    let base = format!("{}/api", clean);
    url::Url::parse(&base).map_err(|e| {
        DeployError::ConfigError(format!("Invalid portainer-host {:?}: {}", host, e))
    })?;
    Ok(base)
}
