//! Entity extraction endpoint

use std::sync::Arc;

use axum::{extract::State, extract::rejection::JsonRejection, response::Json};
use tracing::debug;

use crate::{
    api::dto::{PredictRequest, PredictResponse, SpanDto},
    error::{ServerResult, bad_request},
    state::AppState,
};

/// Extract and merge entities from text
#[utoipa::path(
    post,
    path = "/api/predict",
    tag = "extraction",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Merged entity list", body = PredictResponse),
        (status = 400, description = "No text provided", body = crate::error::ErrorResponse),
        (status = 502, description = "An extractor failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> ServerResult<Json<PredictResponse>> {
    let Json(request) = payload.map_err(|rejection| bad_request(&rejection.body_text()))?;

    let text = match request.text.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => return Err(bad_request("No text provided")),
    };

    let spans = state.pipeline.predict(text).await?;
    debug!(entities = spans.len(), "Prediction complete");

    Ok(Json(PredictResponse {
        entities: spans.into_iter().map(SpanDto::from).collect(),
    }))
}
