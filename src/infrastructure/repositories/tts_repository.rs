use crate::domain::tts::LanguageCode;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the hosted speech service behind one call.
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Merging audio chunks into a single MP3 stream
/// - Bounding how long a call may block
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech with the given language code.
    ///
    /// Returns MP3 audio ready for playback. `slow` selects the service's
    /// reduced speaking rate.
    ///
    /// # Errors
    /// Returns the provider's failure message if synthesis fails, times out
    /// or the provider is unreachable
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
        slow: bool,
    ) -> Result<Vec<u8>, String>;
}
