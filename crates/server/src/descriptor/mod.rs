//! Data product descriptor: typed model and parsing.

mod component;
mod data_product;
mod parse;

pub use component::{
    Component, ComponentKind, ConnectionType, DataContract, DataSharingAgreement,
    OPENMETADATA_SUPPORTED_DATATYPES, Observability, OpenMetadataColumn, OpenMetadataTagLabel,
    OutputPort, ReadsFromRef, SpecificMap, StorageArea, TagLabelType, TagSource, TagState,
    Workload,
};
pub use data_product::{DATA_PRODUCT_KIND, DataProduct};
pub use parse::{DocumentSource, parse_document};
