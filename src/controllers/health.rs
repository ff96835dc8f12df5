use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::repositories::AudioFileRepository;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(audio_repo): State<Arc<AudioFileRepository>>) -> impl IntoResponse {
    match audio_repo.check_writable().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "storage": "writable",
                "tts": "available"
            })),
        ),
        Err(e) => {
            tracing::warn!(
                error = %e,
                dir = %audio_repo.dir().display(),
                "Audio directory is not writable"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "storage": "unwritable",
                    "tts": "unknown"
                })),
            )
        }
    }
}
