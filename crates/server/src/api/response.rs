//! Response shaping for the provisioning API.
//!
//! Each route declares an ordered table mapping HTTP status codes to the
//! payload kind it may return. A handler's produced value is rendered with
//! the first status whose declared kind matches; a value no entry covers
//! always falls back to 500 with a fixed operator-facing error. The table is
//! passed explicitly at every call site, so shaping never depends on the
//! identity of the calling route.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::api::models::{
    ProvisioningStatus, SystemErr, ValidationError, ValidationResult, ValidationStatus,
};

/// Operator-facing message used whenever shaping cannot produce a declared
/// response.
pub const FALLBACK_ERROR: &str = "An unexpected error occurred while processing the request. \
     If the issue still persists, contact the platform team for assistance!";

/// A value a provisioning handler can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiValue {
    ProvisioningStatus(ProvisioningStatus),
    /// An async-operation token, rendered as plain text.
    Token(String),
    ValidationError(ValidationError),
    ValidationResult(ValidationResult),
    ValidationStatus(ValidationStatus),
    SystemErr(SystemErr),
}

/// Discriminant of [`ApiValue`], used in route response tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiValueKind {
    ProvisioningStatus,
    Token,
    ValidationError,
    ValidationResult,
    ValidationStatus,
    SystemErr,
}

impl ApiValue {
    pub fn kind(&self) -> ApiValueKind {
        match self {
            ApiValue::ProvisioningStatus(_) => ApiValueKind::ProvisioningStatus,
            ApiValue::Token(_) => ApiValueKind::Token,
            ApiValue::ValidationError(_) => ApiValueKind::ValidationError,
            ApiValue::ValidationResult(_) => ApiValueKind::ValidationResult,
            ApiValue::ValidationStatus(_) => ApiValueKind::ValidationStatus,
            ApiValue::SystemErr(_) => ApiValueKind::SystemErr,
        }
    }

    /// Serialized body and content type of this value.
    fn render(&self) -> (String, &'static str) {
        match self {
            ApiValue::Token(token) => (token.clone(), "text/plain; charset=utf-8"),
            ApiValue::ProvisioningStatus(v) => (to_json(v), "application/json"),
            ApiValue::ValidationError(v) => (to_json(v), "application/json"),
            ApiValue::ValidationResult(v) => (to_json(v), "application/json"),
            ApiValue::ValidationStatus(v) => (to_json(v), "application/json"),
            ApiValue::SystemErr(v) => (to_json(v), "application/json"),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    // The API models contain nothing that can fail to serialize.
    serde_json::to_string(value).unwrap_or_default()
}

/// An ordered status-code to payload-kind table declared by a route.
pub type ResponseTable = [(StatusCode, ApiValueKind)];

/// Render a handler value as the HTTP response declared for it.
///
/// Picks the first table entry whose kind equals the value's kind. A value
/// matching no entry yields 500 with [`FALLBACK_ERROR`].
pub fn shape_response(table: &ResponseTable, value: ApiValue) -> Response {
    for (status, kind) in table {
        if *kind == value.kind() {
            let (body, content_type) = value.render();
            return (*status, [(header::CONTENT_TYPE, content_type)], body).into_response();
        }
    }

    error!(kind = ?value.kind(), "produced value not declared by the route's response table");
    let fallback = ApiValue::SystemErr(SystemErr::new(FALLBACK_ERROR));
    let (body, content_type) = fallback.render();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, content_type)],
        body,
    )
        .into_response()
}
