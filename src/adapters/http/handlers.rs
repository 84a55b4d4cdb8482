//! HTTP request handlers

use std::sync::Arc;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::model::{ModelMetadata, PredictionResponse, RawImage};
use crate::utils::error::ServiceError;

use super::error::Result;
use super::state::AppState;

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub model_loaded: bool,
    #[serde(flatten)]
    pub metadata: ModelMetadata,
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "MetaSelect API is running",
        "status": "healthy",
    }))
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let model = state.model();
    let message = match model.unavailable_reason() {
        None => "API is ready for predictions".to_string(),
        Some(reason) => format!("Model not loaded: {}", reason),
    };

    Json(json!({
        "status": "healthy",
        "model_loaded": model.is_loaded(),
        "message": message,
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.uptime_secs(),
    }))
}

/// Classify an uploaded image
pub async fn predict(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictionResponse>> {
    let mut multipart = multipart.map_err(|e| ServiceError::InvalidRequest {
        message: e.body_text(),
    })?;
    let image = read_upload(&mut multipart).await?;

    // decode, resize, inference and the sysinfo refresh all block; keep them off the reactor
    let response = tokio::task::spawn_blocking(move || {
        let result = state.pipeline.run(&image);
        state.monitor.log_stats("predict");
        result
    })
    .await
    .map_err(|e| ServiceError::InferenceError {
        message: format!("prediction task aborted: {}", e),
    })??;

    Ok(Json(response))
}

pub async fn model_info(State(state): State<Arc<AppState>>) -> Result<Json<ModelInfoResponse>> {
    let metadata = state.model().metadata()?;
    Ok(Json(ModelInfoResponse {
        model_loaded: true,
        metadata,
    }))
}

async fn read_upload(multipart: &mut Multipart) -> Result<RawImage> {
    let invalid = |e: axum::extract::multipart::MultipartError| ServiceError::InvalidRequest {
        message: e.body_text(),
    };

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let media_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(invalid)?;

        tracing::info!(
            file_name = %file_name,
            media_type = %media_type,
            bytes = data.len(),
            "Received upload"
        );
        return Ok(RawImage::new(data.to_vec(), media_type));
    }

    Err(ServiceError::InvalidRequest {
        message: format!("No file uploaded; expected multipart field '{}'", UPLOAD_FIELD),
    })
}
