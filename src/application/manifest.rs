use crate::config::PipelineConfig;
use crate::domain::hls::{MasterPlaylist, PLAYLIST_FILE_NAME};
use crate::domain::jobs::is_single_component;
use crate::domain::ladder::QualityTier;
use crate::error::ManifestError;
use std::io;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Persists and serves `{storage_root}/{video_id}/master.m3u8`.
#[derive(Clone, Debug)]
pub struct ManifestGenerator {
    storage_root: PathBuf,
}

impl ManifestGenerator {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            storage_root: config.storage_root.clone(),
        }
    }

    pub fn master_path(&self, video_id: &str) -> PathBuf {
        self.storage_root.join(video_id).join(PLAYLIST_FILE_NAME)
    }

    /// Write the master playlist for `tiers`. The text is staged next to the
    /// target and renamed over it, so readers never see a partial file.
    pub async fn generate_master(
        &self,
        video_id: &str,
        tiers: &[QualityTier],
    ) -> Result<PathBuf, ManifestError> {
        let path = self.master_path(video_id);
        let staging = path.with_extension("m3u8.tmp");
        let text = MasterPlaylist::for_tiers(tiers).render();

        let write = async {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let mut file = File::create(&staging).await?;
            file.write_all(text.as_bytes()).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&staging, &path).await
        };

        write.await.map_err(|source| ManifestError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(video_id, ?path, variants = tiers.len(), "master manifest written");
        Ok(path)
    }

    pub async fn read_master(&self, video_id: &str) -> Result<String, ManifestError> {
        if !is_single_component(video_id) {
            return Err(ManifestError::NotFound {
                video_id: video_id.to_string(),
            });
        }

        let path = self.master_path(video_id);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ManifestError::NotFound {
                video_id: video_id.to_string(),
            }),
            Err(source) => Err(ManifestError::Read { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn generator(root: &std::path::Path) -> ManifestGenerator {
        ManifestGenerator::new(&PipelineConfig::new(root))
    }

    #[tokio::test]
    async fn test_master_round_trip() {
        let temp_dir = tempdir().unwrap();
        let manifests = generator(temp_dir.path());

        let path = manifests
            .generate_master("abc", &[QualityTier::P480, QualityTier::P720])
            .await
            .unwrap();
        assert_eq!(path, temp_dir.path().join("abc").join("master.m3u8"));
        assert!(!temp_dir.path().join("abc").join("master.m3u8.tmp").exists());

        let text = manifests.read_master("abc").await.unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#EXTM3U");

        let stream_infos: Vec<&&str> = lines
            .iter()
            .filter(|l| l.starts_with("#EXT-X-STREAM-INF:"))
            .collect();
        assert_eq!(stream_infos.len(), 2);
        assert!(stream_infos[0].contains("BANDWIDTH=800000"));
        assert!(stream_infos[0].contains("RESOLUTION=640x480"));
        assert!(stream_infos[1].contains("BANDWIDTH=1400000"));
        assert!(stream_infos[1].contains("RESOLUTION=1280x720"));
        assert_eq!(lines[2], "480p/master.m3u8");
        assert_eq!(lines[4], "720p/master.m3u8");
    }

    #[tokio::test]
    async fn test_missing_manifest_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let err = generator(temp_dir.path())
            .read_master("missing")
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { video_id } if video_id == "missing"));
    }

    #[tokio::test]
    async fn test_traversing_id_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let manifests = generator(temp_dir.path());
        manifests
            .generate_master("abc", &[QualityTier::P480])
            .await
            .unwrap();

        let err = manifests.read_master("abc/..").await.unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unreadable_manifest_is_read_error() {
        let temp_dir = tempdir().unwrap();
        // A directory where the manifest should be exists but cannot be read as text.
        std::fs::create_dir_all(temp_dir.path().join("abc").join("master.m3u8")).unwrap();

        let err = generator(temp_dir.path())
            .read_master("abc")
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[tokio::test]
    async fn test_write_failure() {
        let temp_dir = tempdir().unwrap();
        // A file where the video directory should be.
        std::fs::write(temp_dir.path().join("abc"), b"not a directory").unwrap();

        let err = generator(temp_dir.path())
            .generate_master("abc", &[QualityTier::P480])
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::Write { .. }));
    }
}
