//! Translation from descriptor entities to landscape model entities.

use std::collections::HashMap;

use icepanel_client::{ModelConnection, ModelObject};

use crate::descriptor::{Component, DataProduct};

/// Status assigned to every object and connection this service writes.
pub const STATUS_LIVE: &str = "live";

fn model_object(
    id: &str,
    name: &str,
    caption: Option<&str>,
    description: &str,
    domain_id: &str,
    parent_id: &str,
    object_type: &str,
) -> ModelObject {
    ModelObject {
        caption: caption.unwrap_or_default().to_string(),
        description: description.to_string(),
        domain_id: domain_id.to_string(),
        external: false,
        icon: None,
        id: id.to_string(),
        links: HashMap::new(),
        name: name.to_string(),
        parent_id: Some(parent_id.to_string()),
        parent_ids: Vec::new(),
        status: STATUS_LIVE.to_string(),
        tag_ids: Vec::new(),
        team_ids: Vec::new(),
        technologies: HashMap::new(),
        object_type: object_type.to_string(),
    }
}

/// The data product as a landscape object: a `system` under the root anchor.
pub fn data_product_object(
    product: &DataProduct,
    domain_id: &str,
    root_id: &str,
) -> ModelObject {
    model_object(
        &product.id,
        &product.name,
        product.fully_qualified_name.as_deref(),
        &product.description,
        domain_id,
        root_id,
        "system",
    )
}

/// A component as a landscape object, parented under the data product.
///
/// Storage areas become `store` nodes, everything else an `app`;
/// observability components produce no landscape object at all.
pub fn component_object(
    component: &Component,
    domain_id: &str,
    data_product_id: &str,
) -> Option<ModelObject> {
    let object_type = match component {
        Component::Observability(_) => return None,
        Component::Storage(_) => "store",
        Component::OutputPort(_) | Component::Workload(_) => "app",
    };
    Some(model_object(
        component.id(),
        component.name(),
        component.fully_qualified_name(),
        component.description(),
        domain_id,
        data_product_id,
        object_type,
    ))
}

/// A dependency edge between two landscape objects, named after the
/// relationship kind.
pub fn connection(relationship: &str, origin_id: &str, target_id: &str) -> ModelConnection {
    ModelConnection {
        description: relationship.to_string(),
        direction: "outgoing".to_string(),
        id: String::new(),
        name: relationship.to_string(),
        origin_id: origin_id.to_string(),
        status: STATUS_LIVE.to_string(),
        tag_ids: Vec::new(),
        target_id: target_id.to_string(),
        technologies: HashMap::new(),
    }
}
