use base64::{engine::general_purpose::STANDARD, Engine as _};
use uuid::Uuid;

pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// Suggested name for a downloaded clip
pub fn download_filename(id: Uuid) -> String {
    format!("speech-{}.mp3", id)
}

/// Inline playback location
pub fn audio_url(id: Uuid) -> String {
    format!("/api/audio/{}", id)
}

/// Attachment location
pub fn download_url(id: Uuid) -> String {
    format!("/api/audio/{}/download", id)
}

/// Encode audio as a `data:` URI so it can be embedded in a hyperlink
/// without a second round trip
pub fn data_uri(audio: &[u8]) -> String {
    format!("data:application/octet-stream;base64,{}", STANDARD.encode(audio))
}

/// `Content-Disposition` value for an attachment with the given filename
pub fn attachment_disposition(filename: &str) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        filename.replace(['"', '\\'], "_"),
        urlencoding::encode(filename)
    )
}
