//! Stack API operations

use tracing::debug;

use crate::errors::DeployError;
use crate::http::client::PortainerClient;
use crate::models::stack::{StackRecord, StackUpdateRequest};

impl PortainerClient {
    /// List all stacks visible to the credential.
    ///
    /// The server does no filtering here; callers narrow the result by
    /// endpoint or name locally.
    pub async fn list_stacks(&self) -> Result<Vec<StackRecord>, DeployError> {
        let url = self.url("/stacks");
        debug!("GET {}", url);

        let response = self.http().get(&url).send().await?;
        let response = Self::check("GET", &url, response).await?;
        Ok(response.json().await?)
    }

    /// Fetch one stack by id.
    ///
    /// Returns `None` when the server reports no such stack, so callers
    /// can branch into fallback lookup without inspecting error values.
    /// Any other failure is an error.
    pub async fn get_stack(&self, id: i64) -> Result<Option<StackRecord>, DeployError> {
        let url = self.url(&format!("/stacks/{}", id));
        debug!("GET {}", url);

        let response = self.http().get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check("GET", &url, response).await?;
        Ok(Some(response.json().await?))
    }

    /// Apply an update to a stack.
    ///
    /// The endpoint id travels as a query parameter, not in the body.
    /// The response body is not consulted; success is "no error raised".
    pub async fn update_stack(
        &self,
        id: i64,
        endpoint_id: i64,
        body: &StackUpdateRequest,
    ) -> Result<(), DeployError> {
        let url = self.url(&format!("/stacks/{}", id));
        debug!("PUT {} (endpointId={})", url, endpoint_id);

        let response = self
            .http()
            .put(&url)
            .query(&[("endpointId", endpoint_id)])
            .json(body)
            .send()
            .await?;
        Self::check("PUT", &url, response).await?;
        Ok(())
    }
}
