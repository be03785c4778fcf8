//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::setup::routes::health;

/// OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Galleria API",
        version = "0.1.0",
        description = "Image gallery gatekeeper and calculator (v0). Uploads are validated (size, extension, content type, magic bytes) before being relayed to a remote image store. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Images
        handlers::images::list_images,
        handlers::images::upload_image,
        // Calculator
        handlers::calc::evaluate_expression,
        // Health
        health::health_check,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::images::UploadResponse,
        handlers::calc::EvaluateRequest,
        handlers::calc::EvaluateResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "images", description = "List and upload images held by the remote store"),
        (name = "calc", description = "Arithmetic expression evaluation"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;
