use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::language::LanguageOption;
use super::speed::NEUTRAL_SPEED;

fn default_speed() -> f32 {
    NEUTRAL_SPEED
}

/// Request for POST /api/tts/synthesize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default = "default_speed")]
    pub speed: f32,
}

/// Response for POST /api/tts/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesizeResponse {
    pub id: Uuid,
    pub language_code: String,
    pub slow: bool,
    pub size_bytes: usize,
    pub audio_url: String,
    pub download_url: String,
    pub download_href: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

/// Response for GET /api/languages
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageOption>,
    pub speed: SpeedRange,
}

/// Slider bounds; only the side of `neutral` a value falls on matters
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
    pub neutral: f32,
    pub note: String,
}
