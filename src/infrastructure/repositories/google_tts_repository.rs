use super::tts_repository::TtsRepository;
use crate::domain::tts::LanguageCode;
use async_trait::async_trait;
use regex::Regex;
use reqwest::{header, Client, Url};
use std::sync::LazyLock;
use std::time::Duration;

/// Google Translate TTS rejects requests longer than 100 characters
const MAX_CHUNK_CHARS: usize = 100;

/// Reduced rate used for slow speech
const SLOW_TTS_SPEED: &str = "0.3";
const NORMAL_TTS_SPEED: &str = "1";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";
const REFERER: &str = "http://translate.google.com/";

static WHITESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

// Punctuation followed by whitespace is a natural pause for the voice
static PAUSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?;:,…。！？]+\s+").expect("valid pause pattern"));

/// Google Translate text-to-speech implementation of TTS repository
pub struct GoogleTtsRepository {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl GoogleTtsRepository {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("synthesis base URL '{}' cannot be a base", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Build the request URL for one chunk of a submission
    fn chunk_url(
        &self,
        chunk: &str,
        index: usize,
        total: usize,
        language: &LanguageCode,
        slow: bool,
    ) -> Result<Url, String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| format!("base URL '{}' cannot be a base", self.base_url))?
            .pop_if_empty()
            .push("translate_tts");

        url.query_pairs_mut()
            .append_pair("ie", "UTF-8")
            .append_pair("q", chunk)
            .append_pair("tl", language.as_str())
            .append_pair("total", &total.to_string())
            .append_pair("idx", &index.to_string())
            .append_pair("textlen", &chunk.chars().count().to_string())
            .append_pair("client", "tw-ob")
            .append_pair(
                "ttsspeed",
                if slow { SLOW_TTS_SPEED } else { NORMAL_TTS_SPEED },
            );

        Ok(url)
    }

    /// Call the service for a single chunk
    async fn call_google(&self, url: Url, index: usize) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(url)
            .header(header::REFERER, REFERER)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    self.timeout_message()
                } else {
                    format!("could not reach synthesis service: {}", e)
                };
                tracing::error!(error = %e, chunk_index = index, "Google TTS request failed");
                message
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, chunk_index = index, "Google TTS rejected request");
            return Err(format!("synthesis service responded with {}", status));
        }

        let audio = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_message()
            } else {
                format!("could not read synthesis response: {}", e)
            }
        })?;

        if audio.is_empty() {
            return Err("synthesis service returned no audio".to_string());
        }

        Ok(audio.to_vec())
    }

    /// Call the service chunk by chunk and merge the audio in order
    async fn synthesize_chunks(
        &self,
        chunks: &[String],
        language: &LanguageCode,
        slow: bool,
    ) -> Result<Vec<u8>, String> {
        // MP3 frames concatenate cleanly
        let mut merged_audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let url = self.chunk_url(chunk, index, chunks.len(), language, slow)?;
            let audio = self.call_google(url, index).await?;
            merged_audio.extend(audio);

            tracing::debug!(
                chunk_index = index,
                total_audio_size = merged_audio.len(),
                "Chunk synthesized and merged"
            );
        }
        Ok(merged_audio)
    }

    fn timeout_message(&self) -> String {
        format!(
            "synthesis service did not answer within {}s",
            self.timeout.as_secs()
        )
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
        slow: bool,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let chunks = split_into_chunks(text);
        if chunks.is_empty() {
            return Err("no text to speak".to_string());
        }

        tracing::info!(
            language_code = %language,
            slow,
            text_length = text.chars().count(),
            chunk_count = chunks.len(),
            text_preview = %text.chars().take(50).collect::<String>(),
            "Calling Google TTS"
        );

        // The timeout bounds the whole submission, not each chunk
        let merged_audio = tokio::time::timeout(
            self.timeout,
            self.synthesize_chunks(&chunks, language, slow),
        )
        .await
        .map_err(|_| {
            tracing::error!(
                chunk_count = chunks.len(),
                timeout_secs = self.timeout.as_secs(),
                "Google TTS submission timed out"
            );
            self.timeout_message()
        })??;

        tracing::info!(
            audio_size = merged_audio.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Google TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn push_chunk(chunks: &mut Vec<String>, chunk: &str) {
    let chunk = chunk.trim();
    if !chunk.is_empty() {
        chunks.push(chunk.to_string());
    }
}

/// Split text into chunks of at most MAX_CHUNK_CHARS characters.
/// Prefers pauses (punctuation), then word boundaries, and only cuts
/// inside a word when the word alone is too long.
fn split_into_chunks(text: &str) -> Vec<String> {
    let normalized = WHITESPACE_PATTERN.replace_all(text.trim(), " ");
    let text: &str = normalized.as_ref();
    if text.is_empty() {
        return Vec::new();
    }
    if char_len(text) <= MAX_CHUNK_CHARS {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut last_end = 0;
    for mat in PAUSE_PATTERN.find_iter(text) {
        pieces.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        pieces.push(&text[last_end..]);
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for piece in pieces {
        if !current.is_empty() && char_len(&current) + char_len(piece) > MAX_CHUNK_CHARS {
            push_chunk(&mut chunks, &current);
            current.clear();
        }

        if char_len(piece) > MAX_CHUNK_CHARS {
            split_on_words(piece, &mut chunks);
        } else {
            current.push_str(piece);
        }
    }
    push_chunk(&mut chunks, &current);

    chunks
}

fn split_on_words(piece: &str, chunks: &mut Vec<String>) {
    let mut current = String::new();
    for word in piece.split_whitespace() {
        let needed = if current.is_empty() {
            char_len(word)
        } else {
            char_len(&current) + 1 + char_len(word)
        };
        if needed > MAX_CHUNK_CHARS && !current.is_empty() {
            push_chunk(chunks, &current);
            current.clear();
        }

        if char_len(word) > MAX_CHUNK_CHARS {
            let chars: Vec<char> = word.chars().collect();
            for part in chars.chunks(MAX_CHUNK_CHARS) {
                chunks.push(part.iter().collect());
            }
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    push_chunk(chunks, &current);
}
