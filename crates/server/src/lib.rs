//! Specific provisioner for the IcePanel architecture model.
//!
//! Translates declarative data product descriptors into create/update calls
//! against an IcePanel landscape and exposes the provisioning-API lifecycle
//! endpoints. The service is stateless: each request parses its descriptor,
//! reconciles against a fresh landscape export, and discards everything when
//! the response is produced.

pub mod api;
pub mod descriptor;
pub mod reconcile;

pub use api::routes::{AppState, BASE_PATH, app};
