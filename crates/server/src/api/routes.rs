//! HTTP surface of the specific provisioner.
//!
//! Seven endpoints per the provisioning-API contract, nested under the
//! microservice base path. Only `/v1/provision` performs real work; every
//! other handler returns the not-yet-implemented payload.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use icepanel_client::IcepanelClient;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::models::{ProvisioningRequest, SystemErr};
use crate::api::response::{ApiValue, ApiValueKind, ResponseTable, shape_response};
use crate::api::unpack::unpack_provisioning_request;
use crate::reconcile::Reconciler;

/// Base path all routes are nested under.
pub const BASE_PATH: &str = "/datamesh.specificprovisioner";

/// Shared state of the HTTP surface.
pub struct AppState {
    pub icepanel: IcepanelClient,
}

const PROVISION_RESPONSES: &ResponseTable = &[
    (StatusCode::OK, ApiValueKind::ProvisioningStatus),
    (StatusCode::ACCEPTED, ApiValueKind::Token),
    (StatusCode::BAD_REQUEST, ApiValueKind::ValidationError),
    (StatusCode::INTERNAL_SERVER_ERROR, ApiValueKind::SystemErr),
];

const STATUS_RESPONSES: &ResponseTable = &[
    (StatusCode::OK, ApiValueKind::ProvisioningStatus),
    (StatusCode::BAD_REQUEST, ApiValueKind::ValidationError),
    (StatusCode::INTERNAL_SERVER_ERROR, ApiValueKind::SystemErr),
];

const VALIDATE_RESPONSES: &ResponseTable = &[
    (StatusCode::OK, ApiValueKind::ValidationResult),
    (StatusCode::INTERNAL_SERVER_ERROR, ApiValueKind::SystemErr),
];

const ASYNC_VALIDATE_RESPONSES: &ResponseTable = &[
    (StatusCode::ACCEPTED, ApiValueKind::Token),
    (StatusCode::BAD_REQUEST, ApiValueKind::ValidationError),
    (StatusCode::INTERNAL_SERVER_ERROR, ApiValueKind::SystemErr),
];

const VALIDATION_STATUS_RESPONSES: &ResponseTable = &[
    (StatusCode::OK, ApiValueKind::ValidationStatus),
    (StatusCode::BAD_REQUEST, ApiValueKind::ValidationError),
    (StatusCode::INTERNAL_SERVER_ERROR, ApiValueKind::SystemErr),
];

fn not_yet_implemented(table: &ResponseTable) -> Response {
    shape_response(
        table,
        ApiValue::SystemErr(SystemErr::new("Response not yet implemented")),
    )
}

/// Deploy a data product or a single component starting from a provisioning
/// descriptor.
async fn provision(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProvisioningRequest>,
) -> Response {
    let unpacked = match unpack_provisioning_request(&body) {
        Ok(unpacked) => unpacked,
        Err(failure) => {
            warn!(errors = ?failure.errors, "rejecting malformed provisioning request");
            return shape_response(PROVISION_RESPONSES, ApiValue::ValidationError(failure));
        }
    };

    info!(
        product = %unpacked.data_product.name,
        component = unpacked.component_id.as_deref().unwrap_or("<all>"),
        "provisioning request unpacked"
    );

    match Reconciler::new(&state.icepanel)
        .run(&unpacked.data_product)
        .await
    {
        // The provisioning contract's success payload is still to be
        // defined; the landscape has been reconciled at this point.
        Ok(_) => not_yet_implemented(PROVISION_RESPONSES),
        Err(err) => shape_response(
            PROVISION_RESPONSES,
            ApiValue::SystemErr(SystemErr::new(err.to_string())),
        ),
    }
}

/// Get the status for a provisioning request.
async fn get_provision_status() -> Response {
    not_yet_implemented(STATUS_RESPONSES)
}

/// Undeploy a data product or a single component.
async fn unprovision() -> Response {
    not_yet_implemented(PROVISION_RESPONSES)
}

/// Request access to a specific provisioner component.
async fn update_acl() -> Response {
    not_yet_implemented(PROVISION_RESPONSES)
}

/// Validate a provisioning request synchronously.
async fn validate() -> Response {
    not_yet_implemented(VALIDATE_RESPONSES)
}

/// Start an asynchronous validation of a deployment request.
async fn async_validate() -> Response {
    not_yet_implemented(ASYNC_VALIDATE_RESPONSES)
}

/// Get the status of an asynchronous validation.
async fn validation_status() -> Response {
    not_yet_implemented(VALIDATION_STATUS_RESPONSES)
}

/// Build the application router, nested under [`BASE_PATH`].
pub fn app(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/v1/provision", post(provision))
        .route("/v1/provision/{token}/status", get(get_provision_status))
        .route("/v1/unprovision", post(unprovision))
        .route("/v1/updateacl", post(update_acl))
        .route("/v1/validate", post(validate))
        .route("/v2/validate", post(async_validate))
        .route("/v2/validate/{token}/status", get(validation_status))
        .with_state(state);

    Router::new()
        .nest(BASE_PATH, api)
        .layer(TraceLayer::new_for_http())
}
