//! Provisioning API: contract models, request unpacking, response shaping,
//! and the HTTP routes.

pub mod models;
pub mod response;
pub mod routes;
pub mod unpack;
