use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::tts::{
        delivery,
        speed::{MAX_SPEED, MIN_SPEED, NEUTRAL_SPEED},
        LanguagesResponse, SpeedRange, SynthesizeResponse, TtsRequest, TtsService,
        TtsServiceApi,
    },
    error::{AppError, AppResult},
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// GET /api/languages - Options for the form
    pub async fn list_languages(
        State(controller): State<Arc<TtsController>>,
    ) -> Json<LanguagesResponse> {
        Json(LanguagesResponse {
            languages: controller.tts_service.languages(),
            speed: SpeedRange {
                min: MIN_SPEED,
                max: MAX_SPEED,
                neutral: NEUTRAL_SPEED,
                note: "Only two speeds exist: anything below normal is read slowly, \
                       anything at or above normal is read at normal speed."
                    .to_string(),
            },
        })
    }

    /// POST /api/tts/synthesize - Convert text to speech
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Json<SynthesizeResponse>)> {
        let result = controller.tts_service.synthesize(request.into()).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Language-Code",
            header_value(result.language_code.as_str())?,
        );
        headers.insert("X-Audio-Bytes", HeaderValue::from(result.size_bytes));
        headers.insert(
            "X-Speech-Slow",
            HeaderValue::from_static(if result.slow { "true" } else { "false" }),
        );

        let response = SynthesizeResponse {
            id: result.id,
            language_code: result.language_code.to_string(),
            slow: result.slow,
            size_bytes: result.size_bytes,
            audio_url: delivery::audio_url(result.id),
            download_url: delivery::download_url(result.id),
            download_href: delivery::data_uri(&result.audio_data),
            filename: delivery::download_filename(result.id),
            created_at: result.created_at,
        };

        Ok((StatusCode::OK, headers, Json(response)))
    }

    /// GET /api/audio/{id} - Inline playback
    pub async fn get_audio(
        State(controller): State<Arc<TtsController>>,
        Path(audio_id): Path<Uuid>,
    ) -> AppResult<(HeaderMap, Body)> {
        let audio = controller.tts_service.load_audio(audio_id).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(delivery::AUDIO_MIME_TYPE),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(audio.len()));

        Ok((headers, Body::from(audio)))
    }

    /// GET /api/audio/{id}/download - Attachment download
    pub async fn download_audio(
        State(controller): State<Arc<TtsController>>,
        Path(audio_id): Path<Uuid>,
    ) -> AppResult<(HeaderMap, Body)> {
        let audio = controller.tts_service.load_audio(audio_id).await?;
        let filename = delivery::download_filename(audio_id);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(delivery::AUDIO_MIME_TYPE),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(audio.len()));
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(&delivery::attachment_disposition(&filename))?,
        );

        Ok((headers, Body::from(audio)))
    }
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::Internal(format!("invalid header value '{}': {}", value, e)))
}
