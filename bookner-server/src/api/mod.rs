//! API implementation for the bookner HTTP server

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use bookner::entity_extraction::OrphanPolicy;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod dto;
pub mod predict;

use dto::{ExtractorsDto, HealthResponse, MergeSettingsDto, StatusResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(predict::predict, health_check, root_status),
    components(
        schemas(
            dto::PredictRequest,
            dto::PredictResponse,
            dto::SpanDto,
            dto::StatusResponse,
            dto::HealthResponse,
            dto::ExtractorsDto,
            dto::MergeSettingsDto,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "extraction", description = "Book metadata entity extraction"),
        (name = "health", description = "Liveness and capability reporting"),
    ),
    info(
        title = "Bookner Entity Extraction API",
        version = "1.0.0",
        description = "Runs a book-metadata model and a general person model over the same text and merges their spans into one list.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/predict", post(predict::predict))
        .route("/health", get(health_check))
        .with_state(state.clone());

    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/", get(root_status))
        // Unprefixed alias for existing clients
        .route("/predict", post(predict::predict))
        .with_state(state)
        .nest("/api", api_router)
        .merge(swagger_router)
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = StatusResponse)
    )
)]
async fn root_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Model is running".to_string(),
    })
}

/// Health check endpoint with capability reporting
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Loaded extractors and merge policy", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let pipeline = &state.pipeline;
    let merger = pipeline.merger();

    let orphan_policy = match merger.orphan_policy() {
        OrphanPolicy::Drop => "drop",
        OrphanPolicy::Append => "append",
    };

    Json(HealthResponse {
        status: "OK".to_string(),
        version: bookner::VERSION.to_string(),
        extractors: ExtractorsDto {
            domain: pipeline.domain_extractor_name().to_string(),
            general: pipeline.general_extractor_name().to_string(),
        },
        merge: MergeSettingsDto {
            restricted_words: merger.restricted_words().to_vec(),
            context_window: merger.context_window(),
            orphan_policy: orphan_policy.to_string(),
        },
    })
}
