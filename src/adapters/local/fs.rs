use crate::domain::jobs::is_single_component;
use crate::domain::ladder::QualityTier;
use crate::error::StorageError;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::io::StreamReader;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Subdirectory of a video holding the upload, apart from tier outputs and the master.
pub const SOURCE_DIR: &str = "source";

/// Uploads and published renditions under `{root}/{video_id}/`.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an uploaded byte stream as `{root}/{video_id}/source/{file_name}`.
    /// Only the last component of the client-supplied name is kept.
    pub async fn store<S, E>(
        &self,
        video_id: &str,
        file_name: &str,
        stream: S,
    ) -> Result<PathBuf, StorageError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<BoxError>,
    {
        let video_id = single_component(video_id)?;
        let file_name = Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StorageError::InvalidName(file_name.to_string()))?;
        let file_name = single_component(file_name)?;

        let dir = self.root.join(video_id).join(SOURCE_DIR);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(file_name);
        tracing::info!(?path, "saving upload");
        stream_to_file(&path, stream).await?;

        Ok(path)
    }

    /// Existing file inside a tier directory, e.g. a segment or the tier playlist.
    pub async fn resolve_variant(
        &self,
        video_id: &str,
        tier: QualityTier,
        file_name: &str,
    ) -> Result<PathBuf, StorageError> {
        let path = self
            .root
            .join(single_component(video_id)?)
            .join(tier.name())
            .join(single_component(file_name)?);

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(StorageError::NotFound(path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::NotFound(path)),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

fn single_component(name: &str) -> Result<&str, StorageError> {
    if is_single_component(name) {
        Ok(name)
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

// Save a `Stream` to a file
async fn stream_to_file<S, E>(path: &Path, stream: S) -> Result<(), io::Error>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let body_with_io_error = stream.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
    let body_reader = StreamReader::new(body_with_io_error);
    futures::pin_mut!(body_reader);

    let mut file = BufWriter::new(File::create(path).await?);
    tokio::io::copy(&mut body_reader, &mut file).await?;
    file.flush().await?;

    Ok(())
}
