use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttsconvert_backend::controllers::tts::TtsController;
use ttsconvert_backend::domain::tts::{SelectionResolver, TtsService};
use ttsconvert_backend::infrastructure::config::{Config, LogFormat};
use ttsconvert_backend::infrastructure::http::start_http_server;
use ttsconvert_backend::infrastructure::repositories::{AudioFileRepository, GoogleTtsRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        log_format = ?config.log_format,
        "Starting TTS Converter on {}:{}",
        config.host,
        config.port
    );

    // Selection resolver
    let language_table = config.load_language_table()?;
    tracing::info!(
        languages = language_table.languages.len(),
        table_path = ?config.language_table_path,
        table = ?config.language_table,
        "Language table loaded"
    );
    let resolver = Arc::new(SelectionResolver::new(language_table));

    // Transient audio storage
    let audio_repo = Arc::new(AudioFileRepository::new(config.audio_dir.clone()));
    audio_repo.ensure_dir().await?;
    tracing::info!(dir = %config.audio_dir.display(), "Audio directory ready");

    // Synthesis client
    let tts_repo = Arc::new(GoogleTtsRepository::new(
        &config.google_tts_base_url,
        Duration::from_secs(config.synthesis_timeout_secs),
    )?);
    tracing::info!(
        base_url = %config.google_tts_base_url,
        timeout_secs = config.synthesis_timeout_secs,
        "Synthesis client initialized"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let tts_service = Arc::new(TtsService::new(
        resolver,
        tts_repo,
        audio_repo.clone(),
        config.max_text_chars,
    ));
    let tts_controller = Arc::new(TtsController::new(tts_service));

    start_http_server(config, audio_repo, tts_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ttsconvert_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
