//! IcePanel architecture-modeling API client.
//!
//! This crate provides a type-safe client for the slice of the IcePanel
//! landscape API the provisioner needs: a full-landscape export plus
//! create/update calls for model objects and model connections. Every
//! request carries the `Authorization: ApiKey ...` header and is scoped to
//! a single landscape at the latest version.

mod client;
mod error;
pub mod models;

pub use client::{IcepanelClient, IcepanelClientBuilder};
pub use error::{ClientError, Result};
pub use models::{
    Domain, LandscapeExport, ModelConnection, ModelObject, Tag, TagGroup,
};
