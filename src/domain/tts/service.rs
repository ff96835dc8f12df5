use super::dto::TtsRequest;
use super::error::TtsServiceError;
use super::language::{LanguageCode, LanguageOption, LanguageSelection, SelectionResolver};
use super::speed::is_slow;
use crate::infrastructure::repositories::{AudioFileRepository, TtsRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_MAX_TEXT_CHARS: usize = 10_000;

/// One form submission
#[derive(Debug, Clone)]
pub struct SynthesisCommand {
    pub text: String,
    pub selection: LanguageSelection,
    pub speed: f32,
}

impl From<TtsRequest> for SynthesisCommand {
    fn from(request: TtsRequest) -> Self {
        Self {
            text: request.text,
            selection: LanguageSelection {
                display_language: request.language,
                accent: request.accent,
            },
            speed: request.speed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    pub id: Uuid,
    pub language_code: LanguageCode,
    pub slow: bool,
    pub size_bytes: usize,
    pub audio_data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

pub struct TtsService {
    resolver: Arc<SelectionResolver>,
    tts_repo: Arc<dyn TtsRepository>,
    audio_repo: Arc<AudioFileRepository>,
    max_text_chars: usize,
}

impl TtsService {
    pub fn new(
        resolver: Arc<SelectionResolver>,
        tts_repo: Arc<dyn TtsRepository>,
        audio_repo: Arc<AudioFileRepository>,
        max_text_chars: usize,
    ) -> Self {
        Self {
            resolver,
            tts_repo,
            audio_repo,
            max_text_chars,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Turn one submission into a stored MP3
    ///
    /// This operation:
    /// - Rejects empty or oversized text before anything else runs
    /// - Resolves the language selection to a service code
    /// - Calls the synthesis service exactly once
    /// - Writes the audio to a fresh transient file
    async fn synthesize(
        &self,
        command: SynthesisCommand,
    ) -> Result<TtsSynthesisResult, TtsServiceError>;

    /// Read back a clip produced by `synthesize`
    async fn load_audio(&self, id: Uuid) -> Result<Vec<u8>, TtsServiceError>;

    /// Options offered by the form
    fn languages(&self) -> Vec<LanguageOption>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        command: SynthesisCommand,
    ) -> Result<TtsSynthesisResult, TtsServiceError> {
        // 1. Validate input
        self.guard_text(&command.text)?;
        if !command.speed.is_finite() {
            return Err(TtsServiceError::Invalid(
                "speed must be a finite number".to_string(),
            ));
        }

        // 2. Resolve language code
        let language_code = self.resolver.resolve(&command.selection)?;
        let slow = is_slow(command.speed);

        tracing::info!(
            language = %command.selection.display_language,
            accent = ?command.selection.accent,
            language_code = %language_code,
            speed = command.speed,
            slow,
            text_length = command.text.chars().count(),
            "TTS synthesis request"
        );

        // 3. Call the synthesis service
        let audio_data = self
            .tts_repo
            .synthesize(&command.text, &language_code, slow)
            .await
            .map_err(TtsServiceError::SynthesisFailed)?;

        if audio_data.is_empty() {
            return Err(TtsServiceError::SynthesisFailed(
                "synthesis service returned no audio".to_string(),
            ));
        }

        // 4. Store the clip
        let stored = self
            .audio_repo
            .save(&audio_data)
            .await
            .map_err(|e| TtsServiceError::Storage(e.to_string()))?;

        tracing::info!(
            audio_id = %stored.id,
            audio_size = stored.size_bytes,
            "TTS audio stored"
        );

        Ok(TtsSynthesisResult {
            id: stored.id,
            language_code,
            slow,
            size_bytes: stored.size_bytes,
            audio_data,
            created_at: Utc::now(),
        })
    }

    async fn load_audio(&self, id: Uuid) -> Result<Vec<u8>, TtsServiceError> {
        self.audio_repo
            .load(id)
            .await
            .map_err(|e| TtsServiceError::Storage(e.to_string()))?
            .ok_or(TtsServiceError::NotFound)
    }

    fn languages(&self) -> Vec<LanguageOption> {
        self.resolver.options().to_vec()
    }
}

impl TtsService {
    fn guard_text(&self, text: &str) -> Result<(), TtsServiceError> {
        if text.trim().is_empty() {
            return Err(TtsServiceError::EmptyInput);
        }

        let char_count = text.chars().count();
        if char_count > self.max_text_chars {
            return Err(TtsServiceError::TextTooLong {
                max: self.max_text_chars,
                actual: char_count,
            });
        }

        Ok(())
    }
}
