//! Component shapes of the data product descriptor.
//!
//! `Component` is a tagged union keyed by the descriptor's `kind` field.
//! Per-variant invariants (supported column data types, `readsFrom` rules)
//! are enforced once, at deserialization time, so a constructed value is
//! always valid.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form deployment-specific payload, preserved and forwarded opaquely.
pub type SpecificMap = serde_json::Map<String, serde_json::Value>;

/// Column data types accepted by OpenMetadata schemas.
///
/// Comparison is case-insensitive; entries here are the canonical uppercase
/// spellings.
pub const OPENMETADATA_SUPPORTED_DATATYPES: &[&str] = &[
    "NUMBER",
    "TINYINT",
    "SMALLINT",
    "INT",
    "BIGINT",
    "BYTEINT",
    "BYTES",
    "FLOAT",
    "DOUBLE",
    "DECIMAL",
    "NUMERIC",
    "TIMESTAMP",
    "TIMESTAMPZ",
    "TIME",
    "DATE",
    "DATETIME",
    "INTERVAL",
    "STRING",
    "MEDIUMTEXT",
    "TEXT",
    "CHAR",
    "LONG",
    "VARCHAR",
    "BOOLEAN",
    "BINARY",
    "VARBINARY",
    "ARRAY",
    "BLOB",
    "LONGBLOB",
    "MEDIUMBLOB",
    "MAP",
    "STRUCT",
    "UNION",
    "SET",
    "GEOGRAPHY",
    "ENUM",
    "JSON",
    "UUID",
    "VARIANT",
    "GEOMETRY",
    "BYTEA",
    "AGGREGATEFUNCTION",
    "ERROR",
    "FIXED",
    "RECORD",
    "NULL",
    "SUPER",
    "HLLSKETCH",
    "PG_LSN",
    "PG_SNAPSHOT",
    "TSQUERY",
    "TXID_SNAPSHOT",
    "XML",
    "MACADDR",
    "TSVECTOR",
    "UNKNOWN",
    "CIDR",
    "INET",
    "CLOB",
    "ROWID",
    "LOWCARDINALITY",
    "YEAR",
    "POINT",
    "POLYGON",
];

/// Kind discriminator of a descriptor component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    OutputPort,
    Workload,
    Storage,
    Observability,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::OutputPort => "outputport",
            ComponentKind::Workload => "workload",
            ComponentKind::Storage => "storage",
            ComponentKind::Observability => "observability",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of an OpenMetadata tag label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TagSource {
    #[default]
    Classification,
    Glossary,
    Tag,
}

/// How an OpenMetadata tag label was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TagLabelType {
    #[default]
    Manual,
    Propagated,
    Automated,
    Derived,
}

/// Confirmation state of an OpenMetadata tag label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TagState {
    Suggested,
    #[default]
    Confirmed,
}

/// An OpenMetadata tag label attached to a component or data product.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OpenMetadataTagLabel {
    #[serde(rename = "tagFQN", default)]
    pub tag_fqn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: TagSource,
    #[serde(default)]
    pub label_type: TagLabelType,
    #[serde(default)]
    pub state: TagState,
    #[serde(default)]
    pub href: Option<String>,
}

/// A typed column of an output port's data contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawOpenMetadataColumn")]
pub struct OpenMetadataColumn {
    pub name: String,
    pub data_type: String,
    pub data_length: Option<u64>,
    pub precision: Option<u64>,
    pub scale: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOpenMetadataColumn {
    name: String,
    data_type: String,
    #[serde(default)]
    data_length: Option<u64>,
    #[serde(default)]
    precision: Option<u64>,
    #[serde(default)]
    scale: Option<u64>,
}

impl TryFrom<RawOpenMetadataColumn> for OpenMetadataColumn {
    type Error = String;

    fn try_from(raw: RawOpenMetadataColumn) -> Result<Self, Self::Error> {
        if !OPENMETADATA_SUPPORTED_DATATYPES.contains(&raw.data_type.to_uppercase().as_str()) {
            return Err(format!(
                "Column \"{}\" specifies dataType of \"{}\" but this is not a valid OpenMetadata data type",
                raw.name, raw.data_type
            ));
        }
        Ok(OpenMetadataColumn {
            name: raw.name,
            data_type: raw.data_type,
            data_length: raw.data_length,
            precision: raw.precision,
            scale: raw.scale,
        })
    }
}

/// Data contract exposed by an output port.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataContract {
    pub schema: Vec<OpenMetadataColumn>,
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
    #[serde(rename = "SLA", default)]
    pub sla: Option<serde_json::Value>,
}

/// Terms governing how consumers may use an output port.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataSharingAgreement {
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub billing: Option<String>,
    #[serde(default)]
    pub security: Option<String>,
    #[serde(default)]
    pub intended_usage: Option<String>,
    #[serde(default)]
    pub limitations: Option<String>,
    #[serde(default)]
    pub life_cycle: Option<String>,
    #[serde(default)]
    pub confidentiality: Option<String>,
}

/// Connection type of a workload.
///
/// Descriptors in the wild use both the mixed-case and the all-caps
/// spelling; both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(alias = "HOUSEKEEPING")]
    HouseKeeping,
    #[serde(alias = "DATAPIPELINE")]
    DataPipeline,
}

/// A source a data-pipeline workload reads from.
///
/// Output ports are referenced as `DP_UK:$OutputPortName`, external systems
/// as `urn:dmb:ex:$SystemName`. The prefix fully determines the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReadsFromRef {
    OutputPort(String),
    ExternalSystem(String),
}

impl ReadsFromRef {
    /// The reference exactly as written in the descriptor.
    pub fn reference(&self) -> &str {
        match self {
            ReadsFromRef::OutputPort(value) | ReadsFromRef::ExternalSystem(value) => value,
        }
    }
}

impl TryFrom<String> for ReadsFromRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.starts_with("DP_UK:") {
            Ok(ReadsFromRef::OutputPort(value))
        } else if value.starts_with("urn:dmb:ex:") {
            Ok(ReadsFromRef::ExternalSystem(value))
        } else {
            Err(format!(
                "Incorrect value in readsFrom: {value}. Value should start with DP_UK: or urn:dmb:ex:"
            ))
        }
    }
}

impl From<ReadsFromRef> for String {
    fn from(value: ReadsFromRef) -> Self {
        match value {
            ReadsFromRef::OutputPort(v) | ReadsFromRef::ExternalSystem(v) => v,
        }
    }
}

/// A component exposing data for consumption, with a schema/data contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPort {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fully_qualified_name: Option<String>,
    pub description: String,
    pub specific: SpecificMap,
    pub version: String,
    pub infrastructure_template_id: String,
    #[serde(default)]
    pub use_case_template_id: Option<String>,
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub technology: Option<String>,
    pub output_port_type: String,
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    pub data_contract: DataContract,
    pub data_sharing_agreement: DataSharingAgreement,
    #[serde(default)]
    pub tags: Vec<OpenMetadataTagLabel>,
    #[serde(default)]
    pub sample_data: Option<serde_json::Value>,
    #[serde(default)]
    pub semantic_linking: Vec<serde_json::Value>,
}

/// A component performing computation, optionally reading from other
/// ports/systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWorkload")]
pub struct Workload {
    pub id: String,
    pub name: String,
    pub fully_qualified_name: Option<String>,
    pub description: String,
    pub specific: SpecificMap,
    pub version: String,
    pub infrastructure_template_id: String,
    pub use_case_template_id: Option<String>,
    pub depends_on: Vec<String>,
    pub platform: Option<String>,
    pub technology: Option<String>,
    pub workload_type: Option<String>,
    pub connection_type: ConnectionType,
    pub tags: Vec<OpenMetadataTagLabel>,
    pub reads_from: Vec<ReadsFromRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWorkload {
    id: String,
    name: String,
    #[serde(default)]
    fully_qualified_name: Option<String>,
    description: String,
    specific: SpecificMap,
    version: String,
    infrastructure_template_id: String,
    #[serde(default)]
    use_case_template_id: Option<String>,
    depends_on: Vec<String>,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    technology: Option<String>,
    #[serde(default)]
    workload_type: Option<String>,
    connection_type: ConnectionType,
    #[serde(default)]
    tags: Vec<OpenMetadataTagLabel>,
    #[serde(default)]
    reads_from: Vec<ReadsFromRef>,
}

impl TryFrom<RawWorkload> for Workload {
    type Error = String;

    fn try_from(raw: RawWorkload) -> Result<Self, Self::Error> {
        // readsFrom is filled only for DataPipeline workloads.
        if raw.connection_type != ConnectionType::DataPipeline && !raw.reads_from.is_empty() {
            return Err(
                "readsFrom is only allowed when connectionType is 'DATAPIPELINE'".to_string(),
            );
        }
        Ok(Workload {
            id: raw.id,
            name: raw.name,
            fully_qualified_name: raw.fully_qualified_name,
            description: raw.description,
            specific: raw.specific,
            version: raw.version,
            infrastructure_template_id: raw.infrastructure_template_id,
            use_case_template_id: raw.use_case_template_id,
            depends_on: raw.depends_on,
            platform: raw.platform,
            technology: raw.technology,
            workload_type: raw.workload_type,
            connection_type: raw.connection_type,
            tags: raw.tags,
            reads_from: raw.reads_from,
        })
    }
}

/// A component describing a storage area owned by the data product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageArea {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fully_qualified_name: Option<String>,
    pub description: String,
    pub specific: SpecificMap,
    pub infrastructure_template_id: String,
    #[serde(default)]
    pub use_case_template_id: Option<String>,
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub storage_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<OpenMetadataTagLabel>,
}

/// A component pointing at the observability surface of the data product.
///
/// The metric definition maps are deployment-specific and carried opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observability {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fully_qualified_name: Option<String>,
    pub description: String,
    pub specific: SpecificMap,
    pub endpoint: String,
    #[serde(default)]
    pub completeness: SpecificMap,
    #[serde(default)]
    pub data_profiling: SpecificMap,
    #[serde(default)]
    pub freshness: SpecificMap,
    #[serde(default)]
    pub availability: SpecificMap,
    #[serde(default)]
    pub data_quality: SpecificMap,
}

/// A data product component, discriminated by the `kind` field.
///
/// Unknown kinds fail deserialization before any field-level validation
/// runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Component {
    OutputPort(OutputPort),
    Workload(Workload),
    Storage(StorageArea),
    Observability(Observability),
}

impl Component {
    pub fn id(&self) -> &str {
        match self {
            Component::OutputPort(c) => &c.id,
            Component::Workload(c) => &c.id,
            Component::Storage(c) => &c.id,
            Component::Observability(c) => &c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Component::OutputPort(c) => &c.name,
            Component::Workload(c) => &c.name,
            Component::Storage(c) => &c.name,
            Component::Observability(c) => &c.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Component::OutputPort(c) => &c.description,
            Component::Workload(c) => &c.description,
            Component::Storage(c) => &c.description,
            Component::Observability(c) => &c.description,
        }
    }

    pub fn fully_qualified_name(&self) -> Option<&str> {
        match self {
            Component::OutputPort(c) => c.fully_qualified_name.as_deref(),
            Component::Workload(c) => c.fully_qualified_name.as_deref(),
            Component::Storage(c) => c.fully_qualified_name.as_deref(),
            Component::Observability(c) => c.fully_qualified_name.as_deref(),
        }
    }

    pub fn specific(&self) -> &SpecificMap {
        match self {
            Component::OutputPort(c) => &c.specific,
            Component::Workload(c) => &c.specific,
            Component::Storage(c) => &c.specific,
            Component::Observability(c) => &c.specific,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::OutputPort(_) => ComponentKind::OutputPort,
            Component::Workload(_) => ComponentKind::Workload,
            Component::Storage(_) => ComponentKind::Storage,
            Component::Observability(_) => ComponentKind::Observability,
        }
    }

    /// Ids of the components this component depends on.
    ///
    /// Observability components carry no dependencies.
    pub fn depends_on(&self) -> &[String] {
        match self {
            Component::OutputPort(c) => &c.depends_on,
            Component::Workload(c) => &c.depends_on,
            Component::Storage(c) => &c.depends_on,
            Component::Observability(_) => &[],
        }
    }

    /// Sources this component reads from; non-empty only for data-pipeline
    /// workloads.
    pub fn reads_from(&self) -> &[ReadsFromRef] {
        match self {
            Component::Workload(c) => &c.reads_from,
            _ => &[],
        }
    }
}
