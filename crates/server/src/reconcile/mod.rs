//! Reconciliation of a data product descriptor against the landscape model.
//!
//! One landscape export is fetched per run; every create/update decision is
//! made against that initial snapshot, by exact name match for objects and
//! by (origin, target, name) for connections. Objects created during the run
//! are not visible to later matching in the same run. Calls are sequential;
//! the first failing call aborts the remainder.

mod translate;

use std::collections::HashMap;

use icepanel_client::{
    ClientError, Domain, IcepanelClient, LandscapeExport, ModelConnection, ModelObject,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::descriptor::{Component, DataProduct};

/// Name of the domain every provisioned object is filed under.
pub const DEFAULT_DOMAIN_NAME: &str = "Default domain";

/// Object type of the landscape root anchor.
pub const ROOT_OBJECT_TYPE: &str = "root";

/// Errors that can occur during reconciliation.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The landscape is missing an anchor the algorithm depends on.
    #[error("landscape anchor not found: {0}")]
    AnchorNotFound(&'static str),

    /// A name lookup that must be unique matched more than one candidate.
    #[error("ambiguous match for {entity} '{name}': {count} candidates")]
    AmbiguousMatch {
        entity: &'static str,
        name: String,
        count: usize,
    },

    /// An outbound call failed; the remainder of the run was aborted.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Counts of the calls a reconciliation run issued.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub objects_created: usize,
    pub objects_updated: usize,
    pub connections_created: usize,
    pub connections_updated: usize,
}

/// The landscape state reconciliation decisions are made against.
struct Snapshot {
    domains: Vec<Domain>,
    objects: Vec<ModelObject>,
    connections: Vec<ModelConnection>,
}

impl From<LandscapeExport> for Snapshot {
    fn from(export: LandscapeExport) -> Self {
        Snapshot {
            domains: export.domains.into_values().collect(),
            objects: export.model_objects.into_values().collect(),
            connections: export.model_connections.into_values().collect(),
        }
    }
}

impl Snapshot {
    /// Id of the domain named [`DEFAULT_DOMAIN_NAME`].
    fn default_domain_id(&self) -> Result<String, ReconcileError> {
        let matches: Vec<&Domain> = self
            .domains
            .iter()
            .filter(|domain| domain.name == DEFAULT_DOMAIN_NAME)
            .collect();
        match matches.as_slice() {
            [] => Err(ReconcileError::AnchorNotFound("default domain")),
            [domain] => Ok(domain.id.clone()),
            many => Err(ReconcileError::AmbiguousMatch {
                entity: "domain",
                name: DEFAULT_DOMAIN_NAME.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Id of the single object of type [`ROOT_OBJECT_TYPE`].
    fn root_object_id(&self) -> Result<String, ReconcileError> {
        let matches: Vec<&ModelObject> = self
            .objects
            .iter()
            .filter(|object| object.object_type == ROOT_OBJECT_TYPE)
            .collect();
        match matches.as_slice() {
            [] => Err(ReconcileError::AnchorNotFound("root object")),
            [object] => Ok(object.id.clone()),
            many => Err(ReconcileError::AmbiguousMatch {
                entity: "root object",
                name: ROOT_OBJECT_TYPE.to_string(),
                count: many.len(),
            }),
        }
    }
}

/// A dependency edge derived from a component.
struct Edge {
    relationship: &'static str,
    target: String,
}

/// Edges a component contributes to the landscape graph.
///
/// Output ports contribute `dependsOn`; workloads contribute `dependsOn`
/// plus `readsFrom`. Other kinds contribute nothing.
fn relationship_edges(component: &Component) -> Vec<Edge> {
    match component {
        Component::OutputPort(port) => port
            .depends_on
            .iter()
            .map(|id| Edge {
                relationship: "dependsOn",
                target: id.clone(),
            })
            .collect(),
        Component::Workload(workload) => workload
            .depends_on
            .iter()
            .map(|id| Edge {
                relationship: "dependsOn",
                target: id.clone(),
            })
            .chain(workload.reads_from.iter().map(|reference| Edge {
                relationship: "readsFrom",
                target: reference.reference().to_string(),
            }))
            .collect(),
        Component::Storage(_) | Component::Observability(_) => Vec::new(),
    }
}

/// Brings the landscape model into agreement with a data product's
/// component and dependency graph.
pub struct Reconciler<'a> {
    client: &'a IcepanelClient,
}

impl<'a> Reconciler<'a> {
    pub fn new(client: &'a IcepanelClient) -> Self {
        Self { client }
    }

    /// Run one reconciliation pass for the given data product.
    pub async fn run(&self, product: &DataProduct) -> Result<ReconcileSummary, ReconcileError> {
        let snapshot = Snapshot::from(self.client.export_landscape().await?);
        let domain_id = snapshot.default_domain_id()?;
        let root_id = snapshot.root_object_id()?;

        let mut summary = ReconcileSummary::default();

        let product_object = translate::data_product_object(product, &domain_id, &root_id);
        let product_remote_id = self
            .upsert_object(&snapshot, &product_object, &mut summary)
            .await?;

        // Local component id -> landscape object id, for edge resolution.
        let mut remote_ids: HashMap<&str, String> = HashMap::new();
        for component in &product.components {
            let Some(object) =
                translate::component_object(component, &domain_id, &product_remote_id)
            else {
                debug!(
                    component = component.id(),
                    "component maps to no landscape object, skipping"
                );
                continue;
            };
            let remote_id = self.upsert_object(&snapshot, &object, &mut summary).await?;
            remote_ids.insert(component.id(), remote_id);
        }

        for component in &product.components {
            for edge in relationship_edges(component) {
                // Edges whose target is not a component of this product are
                // dropped; readsFrom references to external systems always
                // fall out here.
                let Some(related) = product.get_component_by_id(&edge.target) else {
                    continue;
                };
                let (Some(origin_id), Some(target_id)) =
                    (remote_ids.get(component.id()), remote_ids.get(related.id()))
                else {
                    debug!(
                        component = component.id(),
                        target = related.id(),
                        "edge endpoint has no landscape object, skipping"
                    );
                    continue;
                };
                let connection = translate::connection(edge.relationship, origin_id, target_id);
                self.upsert_connection(&snapshot, &connection, &mut summary)
                    .await?;
            }
        }

        info!(
            product = %product.name,
            created = summary.objects_created,
            updated = summary.objects_updated,
            connections_created = summary.connections_created,
            connections_updated = summary.connections_updated,
            "reconciliation pass complete"
        );
        Ok(summary)
    }

    /// Create or update an object, matched by exact name against the
    /// snapshot. Returns the landscape id of the object.
    async fn upsert_object(
        &self,
        snapshot: &Snapshot,
        object: &ModelObject,
        summary: &mut ReconcileSummary,
    ) -> Result<String, ReconcileError> {
        let matches: Vec<&ModelObject> = snapshot
            .objects
            .iter()
            .filter(|existing| existing.name == object.name)
            .collect();
        match matches.as_slice() {
            [] => {
                let id = self.client.create_object(object).await?;
                summary.objects_created += 1;
                Ok(id)
            }
            [existing] => {
                let id = self.client.update_object(&existing.id, object).await?;
                summary.objects_updated += 1;
                Ok(id)
            }
            many => Err(ReconcileError::AmbiguousMatch {
                entity: "model object",
                name: object.name.clone(),
                count: many.len(),
            }),
        }
    }

    /// Create or update a connection, matched by (origin, target, name)
    /// against the snapshot.
    async fn upsert_connection(
        &self,
        snapshot: &Snapshot,
        connection: &ModelConnection,
        summary: &mut ReconcileSummary,
    ) -> Result<(), ReconcileError> {
        let matches: Vec<&ModelConnection> = snapshot
            .connections
            .iter()
            .filter(|existing| {
                existing.origin_id == connection.origin_id
                    && existing.target_id == connection.target_id
                    && existing.name == connection.name
            })
            .collect();
        match matches.as_slice() {
            [] => {
                self.client.create_connection(connection).await?;
                summary.connections_created += 1;
                Ok(())
            }
            [existing] => {
                self.client
                    .update_connection(&existing.id, connection)
                    .await?;
                summary.connections_updated += 1;
                Ok(())
            }
            many => Err(ReconcileError::AmbiguousMatch {
                entity: "model connection",
                name: connection.name.clone(),
                count: many.len(),
            }),
        }
    }
}
