//! API models of the provisioning contract.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of descriptor carried by a provisioning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DescriptorKind {
    DataproductDescriptor,
    ComponentDescriptor,
    DataproductDescriptorWithResults,
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DescriptorKind::DataproductDescriptor => "DATAPRODUCT_DESCRIPTOR",
            DescriptorKind::ComponentDescriptor => "COMPONENT_DESCRIPTOR",
            DescriptorKind::DataproductDescriptorWithResults => {
                "DATAPRODUCT_DESCRIPTOR_WITH_RESULTS"
            }
        };
        f.write_str(name)
    }
}

/// A request to provision or unprovision a data product component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningRequest {
    pub descriptor_kind: DescriptorKind,
    /// YAML text of the provisioning descriptor.
    pub descriptor: String,
}

/// Result of a past provisioning operation, echoed back by update-ACL
/// requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionInfo {
    /// YAML text of the descriptor of the latest complete provisioning.
    pub request: String,
    #[serde(default)]
    pub result: Option<String>,
}

/// A request to grant access to a provisioned component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAclRequest {
    /// Identities the access should be granted to.
    pub refs: Vec<String>,
    pub provision_info: ProvisionInfo,
}

/// State of a provisioning operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProvisioningState {
    Running,
    Completed,
    Failed,
}

/// Status of a provisioning operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningStatus {
    pub status: ProvisioningState,
    pub result: String,
}

/// A descriptor or request was malformed; user-correctable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }
}

/// Outcome of a synchronous descriptor validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub error: Option<ValidationError>,
}

/// Status of an asynchronous descriptor validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStatus {
    pub status: ProvisioningState,
    #[serde(default)]
    pub result: Option<ValidationResult>,
}

/// Generic operator-facing failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemErr {
    pub error: String,
}

impl SystemErr {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
