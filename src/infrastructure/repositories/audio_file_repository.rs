use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use uuid::Uuid;

/// A synthesized clip written to the audio directory
#[derive(Debug, Clone)]
pub struct StoredAudio {
    pub id: Uuid,
    pub path: PathBuf,
    pub size_bytes: usize,
}

/// Transient MP3 storage.
///
/// Every clip gets a fresh UUID file name and is created with create-new
/// semantics, so concurrent submissions never share a path. Nothing here
/// deletes files; the audio directory is expected to live somewhere the
/// environment cleans up (the system temp dir by default).
pub struct AudioFileRepository {
    dir: PathBuf,
}

impl AudioFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.mp3", id))
    }

    /// Create the audio directory if it is missing
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    pub async fn save(&self, audio: &[u8]) -> std::io::Result<StoredAudio> {
        self.ensure_dir().await?;

        let id = Uuid::new_v4();
        let path = self.path_for(id);
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        write_or_discard(&path, file, audio).await?;

        tracing::debug!(
            audio_id = %id,
            path = %path.display(),
            size_bytes = audio.len(),
            "Audio written"
        );

        Ok(StoredAudio {
            id,
            path,
            size_bytes: audio.len(),
        })
    }

    /// Read a clip back; `None` when it does not exist (or was cleaned up)
    pub async fn load(&self, id: Uuid) -> std::io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether a file can be created in the audio directory right now
    pub async fn check_writable(&self) -> std::io::Result<()> {
        self.ensure_dir().await?;
        let probe = self.dir.join(format!(".probe-{}", Uuid::new_v4()));
        tokio::fs::write(&probe, b"").await?;
        tokio::fs::remove_file(&probe).await
    }
}

/// Write a freshly created clip; a failed write removes the partial file
async fn write_or_discard<W>(path: &Path, mut writer: W, audio: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(audio).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(writer);
        tracing::error!(error = %e, path = %path.display(), "Audio write failed");
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            tracing::warn!(error = %remove_err, path = %path.display(), "Could not remove partial audio");
        }
        return Err(e);
    }

    Ok(())
}
