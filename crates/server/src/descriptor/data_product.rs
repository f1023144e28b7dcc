//! The data product descriptor root.

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::descriptor::component::{
    Component, ComponentKind, Observability, OpenMetadataTagLabel, OutputPort, SpecificMap,
    StorageArea, Workload,
};

/// Expected value of the data product's `kind` field.
pub const DATA_PRODUCT_KIND: &str = "dataproduct";

fn data_product_kind<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let kind = String::deserialize(deserializer)?;
    if kind != DATA_PRODUCT_KIND {
        return Err(de::Error::custom(format!(
            "kind of a data product must be '{DATA_PRODUCT_KIND}', got '{kind}'"
        )));
    }
    Ok(kind)
}

/// A named, versioned collection of components describing a deployable data
/// asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fully_qualified_name: Option<String>,
    pub description: String,
    #[serde(deserialize_with = "data_product_kind")]
    pub kind: String,
    pub domain: String,
    pub domain_id: String,
    pub version: String,
    pub environment: String,
    pub data_product_owner: String,
    #[serde(default)]
    pub data_product_owner_display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub owner_group: String,
    pub dev_group: String,
    #[serde(rename = "informationSLA", default)]
    pub information_sla: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub maturity: Option<String>,
    #[serde(default)]
    pub billing: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<OpenMetadataTagLabel>,
    pub specific: SpecificMap,
    pub components: Vec<Component>,
}

impl DataProduct {
    /// All components of the given kind, in descriptor order.
    pub fn get_components_by_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|component| component.kind() == kind)
            .collect()
    }

    /// The component with the given id, if any.
    pub fn get_component_by_id(&self, component_id: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|component| component.id() == component_id)
    }

    /// The output ports of this data product, in descriptor order.
    pub fn output_ports(&self) -> Vec<&OutputPort> {
        self.components
            .iter()
            .filter_map(|component| match component {
                Component::OutputPort(port) => Some(port),
                _ => None,
            })
            .collect()
    }

    /// The workloads of this data product, in descriptor order.
    pub fn workloads(&self) -> Vec<&Workload> {
        self.components
            .iter()
            .filter_map(|component| match component {
                Component::Workload(workload) => Some(workload),
                _ => None,
            })
            .collect()
    }

    /// The storage areas of this data product, in descriptor order.
    pub fn storage_areas(&self) -> Vec<&StorageArea> {
        self.components
            .iter()
            .filter_map(|component| match component {
                Component::Storage(storage) => Some(storage),
                _ => None,
            })
            .collect()
    }

    /// The observability APIs of this data product, in descriptor order.
    pub fn observability_apis(&self) -> Vec<&Observability> {
        self.components
            .iter()
            .filter_map(|component| match component {
                Component::Observability(observability) => Some(observability),
                _ => None,
            })
            .collect()
    }
}
