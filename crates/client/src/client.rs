//! HTTP client for the IcePanel landscape API.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::{LandscapeExport, ModelConnection, ModelObject};

/// Builder for creating a new [`IcepanelClient`].
pub struct IcepanelClientBuilder {
    base_url: Option<String>,
    landscape_id: Option<String>,
    api_key: Option<SecretString>,
    timeout: Duration,
}

impl Default for IcepanelClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            landscape_id: None,
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl IcepanelClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the IcePanel API.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the landscape identifier.
    pub fn landscape_id(mut self, id: String) -> Self {
        self.landscape_id = Some(id);
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// Prevents double slashes when concatenating with endpoint paths.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the client.
    pub fn build(self) -> Result<IcepanelClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let landscape_id = self
            .landscape_id
            .ok_or_else(|| ClientError::InvalidUrl("landscape_id is required".to_string()))?;

        let api_key = self
            .api_key
            .ok_or_else(|| ClientError::AuthFailed("api_key is required".to_string()))?;

        let http = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(IcepanelClient {
            http,
            base_url,
            landscape_id,
            api_key,
        })
    }
}

/// IcePanel landscape API client.
///
/// Scoped to one landscape at the latest model version. All mutating calls
/// return the id of the affected entity; creates read it out of the response
/// body, updates echo the id they were given.
#[derive(Debug)]
pub struct IcepanelClient {
    http: reqwest::Client,
    base_url: String,
    landscape_id: String,
    api_key: SecretString,
}

impl IcepanelClient {
    /// Create a new client builder.
    pub fn builder() -> IcepanelClientBuilder {
        IcepanelClientBuilder::new()
    }

    /// Build a client from the service configuration.
    pub fn from_config(config: &provisioner_config::Config) -> Result<Self> {
        Self::builder()
            .base_url(config.base_url.clone())
            .landscape_id(config.landscape_id.clone())
            .api_key(config.api_key.clone())
            .timeout(config.timeout)
            .build()
    }

    fn landscape_url(&self, suffix: &str) -> String {
        format!(
            "{}/landscapes/{}/versions/latest/{}",
            self.base_url, self.landscape_id, suffix
        )
    }

    fn auth_header(&self) -> String {
        format!("ApiKey {}", self.api_key.expose_secret())
    }

    /// Send a request and map non-success statuses to [`ClientError::Api`].
    async fn send(&self, builder: reqwest::RequestBuilder, url: &str) -> Result<reqwest::Response> {
        let response = builder
            .header("Accept", "application/json")
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }
        Ok(response)
    }

    /// Fetch the full landscape export (domains, objects, connections, tags, teams).
    pub async fn export_landscape(&self) -> Result<LandscapeExport> {
        let url = self.landscape_url("export/json");
        debug!(url = %url, "fetching landscape export");

        let response = self.send(self.http.get(&url), &url).await?;
        let export: LandscapeExport = response.json().await?;
        Ok(export)
    }

    /// Create a model object and return its assigned id.
    pub async fn create_object(&self, object: &ModelObject) -> Result<String> {
        let url = self.landscape_url("model/objects");
        debug!(name = %object.name, "creating model object");

        let response = self.send(self.http.post(&url).json(object), &url).await?;
        created_id(response, "modelObject").await
    }

    /// Update an existing model object, returning the id it was addressed by.
    pub async fn update_object(&self, id: &str, object: &ModelObject) -> Result<String> {
        let url = self.landscape_url(&format!("model/objects/{id}"));
        debug!(id = %id, name = %object.name, "updating model object");

        self.send(self.http.patch(&url).json(object), &url).await?;
        Ok(id.to_string())
    }

    /// Create a model connection and return its assigned id.
    pub async fn create_connection(&self, connection: &ModelConnection) -> Result<String> {
        let url = self.landscape_url("model/connections");
        debug!(
            origin = %connection.origin_id,
            target = %connection.target_id,
            "creating model connection"
        );

        let response = self
            .send(self.http.post(&url).json(connection), &url)
            .await?;
        created_id(response, "modelConnection").await
    }

    /// Update an existing model connection, returning the id it was addressed by.
    pub async fn update_connection(&self, id: &str, connection: &ModelConnection) -> Result<String> {
        let url = self.landscape_url(&format!("model/connections/{id}"));
        debug!(id = %id, "updating model connection");

        self.send(self.http.patch(&url).json(connection), &url)
            .await?;
        Ok(id.to_string())
    }
}

/// Extract the assigned id from a create response.
///
/// Create responses wrap the stored entity under a key named after the
/// entity family (`modelObject` / `modelConnection`).
async fn created_id(response: reqwest::Response, wrapper: &str) -> Result<String> {
    let body: serde_json::Value = response.json().await?;
    body.get(wrapper)
        .and_then(|entity| entity.get("id"))
        .and_then(|id| id.as_str())
        .map(|id| id.to_string())
        .ok_or_else(|| {
            ClientError::InvalidResponse(format!("missing {wrapper}.id in create response"))
        })
}
