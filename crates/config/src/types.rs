//! Configuration types for the provisioner service.

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;

/// Resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the IcePanel API (e.g., https://api.icepanel.io/v1)
    pub base_url: String,
    /// Identifier of the IcePanel landscape the provisioner writes into.
    pub landscape_id: String,
    /// API key used to build the `Authorization: ApiKey ...` header.
    pub api_key: SecretString,
    /// Timeout applied to every outbound IcePanel call.
    pub timeout: Duration,
    /// Address the HTTP surface binds to.
    pub bind_addr: SocketAddr,
}
