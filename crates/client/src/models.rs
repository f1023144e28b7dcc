//! Wire models for the IcePanel landscape API.
//!
//! Field names follow the API's camelCase JSON; the full-landscape export
//! returns each entity family as a map keyed by id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A landscape domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
}

/// An architecture node in the landscape model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelObject {
    pub caption: String,
    pub description: String,
    pub domain_id: String,
    pub external: bool,
    pub icon: Option<String>,
    pub id: String,
    #[serde(default)]
    pub links: HashMap<String, String>,
    pub name: String,
    pub parent_id: Option<String>,
    #[serde(default)]
    pub parent_ids: Vec<String>,
    pub status: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub team_ids: Vec<String>,
    #[serde(default)]
    pub technologies: HashMap<String, String>,
    #[serde(rename = "type")]
    pub object_type: String,
}

/// A typed directed edge between two model objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConnection {
    pub description: String,
    pub direction: String,
    pub id: String,
    pub name: String,
    pub origin_id: String,
    pub status: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    pub target_id: String,
    #[serde(default)]
    pub technologies: HashMap<String, Option<String>>,
}

/// A tag group in the landscape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagGroup {
    pub icon: String,
    pub id: String,
    pub name: String,
}

/// A tag in the landscape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub color: String,
    pub group_id: String,
    pub id: String,
    pub name: String,
}

/// Full landscape export as returned by `export/json`.
///
/// Flows and teams are carried opaquely; the provisioner never reads them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandscapeExport {
    #[serde(default)]
    pub domains: HashMap<String, Domain>,
    #[serde(default)]
    pub flows: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub model_connections: HashMap<String, ModelConnection>,
    #[serde(default)]
    pub model_objects: HashMap<String, ModelObject>,
    #[serde(default)]
    pub tag_groups: HashMap<String, TagGroup>,
    #[serde(default)]
    pub tags: HashMap<String, Tag>,
    #[serde(default)]
    pub teams: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_object_round_trips_camel_case() {
        let json = serde_json::json!({
            "caption": "cap",
            "description": "desc",
            "domainId": "dom-1",
            "external": false,
            "icon": null,
            "id": "obj-1",
            "links": {},
            "name": "My Object",
            "parentId": "root-1",
            "parentIds": [],
            "status": "live",
            "tagIds": [],
            "teamIds": [],
            "technologies": {},
            "type": "system"
        });
        let object: ModelObject = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(object.domain_id, "dom-1");
        assert_eq!(object.object_type, "system");
        let back = serde_json::to_value(&object).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_landscape_export_tolerates_missing_families() {
        let export: LandscapeExport = serde_json::from_value(serde_json::json!({
            "domains": {"d1": {"id": "d1", "name": "Default domain"}},
            "modelObjects": {}
        }))
        .unwrap();
        assert_eq!(export.domains.len(), 1);
        assert!(export.model_connections.is_empty());
    }
}
