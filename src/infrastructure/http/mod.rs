use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{form, health, tts::TtsController};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::AudioFileRepository;

pub mod request_id;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router
pub fn create_router(
    audio_repo: Arc<AudioFileRepository>,
    tts_controller: Arc<TtsController>,
) -> Router {
    // Form page
    let form_routes = Router::new().route("/", get(form::index));

    // TTS routes
    let tts_routes = Router::new()
        .route("/api/languages", get(TtsController::list_languages))
        .route("/api/tts/synthesize", post(TtsController::synthesize))
        .route("/api/audio/:audioId", get(TtsController::get_audio))
        .route(
            "/api/audio/:audioId/download",
            get(TtsController::download_audio),
        )
        .with_state(tts_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(audio_repo)
        .merge(form_routes)
        .merge(tts_routes)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    audio_repo: Arc<AudioFileRepository>,
    tts_controller: Arc<TtsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(audio_repo, tts_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
