//! Request unpacking: extracting the embedded data product descriptor from
//! inbound requests.
//!
//! Both operations return a tagged result; any parse problem comes back as a
//! `ValidationError`, never as a panic.

use serde_yaml::Value;

use crate::api::models::{DescriptorKind, ProvisioningRequest, UpdateAclRequest, ValidationError};
use crate::descriptor::{DataProduct, parse_document};

/// Contents of a successfully unpacked provisioning request.
#[derive(Debug)]
pub struct UnpackedProvisioningRequest {
    pub data_product: DataProduct,
    /// Id of the component to provision, when the request names one.
    pub component_id: Option<String>,
}

/// Contents of a successfully unpacked update-ACL request.
#[derive(Debug)]
pub struct UnpackedUpdateAclRequest {
    pub data_product: DataProduct,
    pub component_id: Option<String>,
    /// Identities the access should be granted to.
    pub refs: Vec<String>,
}

fn parse_failure(err: &ValidationError) -> ValidationError {
    let mut errors = vec!["Unable to parse the descriptor.".to_string()];
    errors.extend(err.errors.iter().cloned());
    ValidationError::new(errors)
}

/// Extract the data product and target component id from the embedded
/// descriptor text.
fn unpack_descriptor(descriptor: &str) -> Result<(DataProduct, Option<String>), ValidationError> {
    let document: Value = serde_yaml::from_str(descriptor).map_err(|e| {
        ValidationError::new(vec![
            "Unable to parse the descriptor.".to_string(),
            e.to_string(),
        ])
    })?;

    let data_product_doc = document
        .get("dataProduct")
        .cloned()
        .unwrap_or(Value::Null);
    let data_product: DataProduct =
        parse_document(data_product_doc).map_err(|e| parse_failure(&e))?;

    let component_id = document
        .get("componentIdToProvision")
        .and_then(Value::as_str)
        .map(|id| id.to_string());

    Ok((data_product, component_id))
}

/// Unpack a provisioning request.
///
/// The request must declare a `COMPONENT_DESCRIPTOR`; any other kind is a
/// validation error naming what was found.
pub fn unpack_provisioning_request(
    request: &ProvisioningRequest,
) -> Result<UnpackedProvisioningRequest, ValidationError> {
    if request.descriptor_kind != DescriptorKind::ComponentDescriptor {
        return Err(ValidationError::new(vec![format!(
            "Expecting a COMPONENT_DESCRIPTOR but got a {} instead; \
             please check with the platform team.",
            request.descriptor_kind
        )]));
    }

    let (data_product, component_id) = unpack_descriptor(&request.descriptor)?;
    Ok(UnpackedProvisioningRequest {
        data_product,
        component_id,
    })
}

/// Unpack an update-ACL request.
///
/// The descriptor of the latest complete provisioning is carried in the
/// nested `provisionInfo.request` field.
pub fn unpack_update_acl_request(
    request: &UpdateAclRequest,
) -> Result<UnpackedUpdateAclRequest, ValidationError> {
    let (data_product, component_id) = unpack_descriptor(&request.provision_info.request)?;
    Ok(UnpackedUpdateAclRequest {
        data_product,
        component_id,
        refs: request.refs.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::ProvisionInfo;

    const DESCRIPTOR: &str = r#"
dataProduct:
  id: dp-1
  name: Sample Data Product
  description: A test data product
  kind: dataproduct
  domain: Sample Domain
  domainId: dom-1
  version: "1.0"
  environment: Development
  dataProductOwner: John Doe
  ownerGroup: Data Owners
  devGroup: Development Team
  tags: []
  specific: {}
  components: []
componentIdToProvision: dp-1:comp-1
"#;

    #[test]
    fn test_unpack_provisioning_request() {
        let request = ProvisioningRequest {
            descriptor_kind: DescriptorKind::ComponentDescriptor,
            descriptor: DESCRIPTOR.to_string(),
        };
        let unpacked = unpack_provisioning_request(&request).unwrap();
        assert_eq!(unpacked.data_product.id, "dp-1");
        assert_eq!(unpacked.component_id.as_deref(), Some("dp-1:comp-1"));
    }

    #[test]
    fn test_wrong_descriptor_kind_names_the_kind_found() {
        let request = ProvisioningRequest {
            descriptor_kind: DescriptorKind::DataproductDescriptor,
            descriptor: DESCRIPTOR.to_string(),
        };
        let failure = unpack_provisioning_request(&request).unwrap_err();
        assert!(failure.errors[0].contains("COMPONENT_DESCRIPTOR"));
        assert!(failure.errors[0].contains("DATAPRODUCT_DESCRIPTOR"));
    }

    #[test]
    fn test_unparseable_descriptor_is_a_validation_error() {
        let request = ProvisioningRequest {
            descriptor_kind: DescriptorKind::ComponentDescriptor,
            descriptor: "dataProduct: [unclosed".to_string(),
        };
        let failure = unpack_provisioning_request(&request).unwrap_err();
        assert_eq!(failure.errors[0], "Unable to parse the descriptor.");
        assert_eq!(failure.errors.len(), 2);
    }

    #[test]
    fn test_invalid_data_product_is_a_validation_error() {
        let request = ProvisioningRequest {
            descriptor_kind: DescriptorKind::ComponentDescriptor,
            descriptor: "dataProduct:\n  id: only-an-id\n".to_string(),
        };
        let failure = unpack_provisioning_request(&request).unwrap_err();
        assert_eq!(failure.errors[0], "Unable to parse the descriptor.");
        assert!(failure.errors[1].contains("DataProduct"));
    }

    #[test]
    fn test_unpack_update_acl_request_carries_refs() {
        let request = UpdateAclRequest {
            refs: vec!["user:alice".to_string(), "group:readers".to_string()],
            provision_info: ProvisionInfo {
                request: DESCRIPTOR.to_string(),
                result: None,
            },
        };
        let unpacked = unpack_update_acl_request(&request).unwrap();
        assert_eq!(unpacked.data_product.id, "dp-1");
        assert_eq!(unpacked.refs.len(), 2);
    }
}
