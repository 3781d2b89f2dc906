//! File-based photo capture.
//!
//! Stands in for a hardware camera: "capturing" imports an image file the
//! operator points at (typically a `--photo` flag) into the photo
//! directory and returns a local URI to the imported copy, so the record
//! never references a file the operator may later move or delete.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::new_record_id;

use super::CameraProvider;

/// A camera provider that imports an existing image file.
#[derive(Debug, Clone)]
pub struct FileCamera {
    source: PathBuf,
    photo_dir: PathBuf,
    quality: f64,
    granted: bool,
}

impl FileCamera {
    /// Create a provider importing `source` into `photo_dir`.
    ///
    /// `granted` carries the consent state from the device configuration.
    /// `quality` is advisory — recorded for backends able to re-encode;
    /// the file import keeps the image byte-for-byte.
    #[must_use]
    pub fn new(
        source: impl Into<PathBuf>,
        photo_dir: impl Into<PathBuf>,
        quality: f64,
        granted: bool,
    ) -> Self {
        Self {
            source: source.into(),
            photo_dir: photo_dir.into(),
            quality,
            granted,
        }
    }

    /// Destination path for the imported copy, keeping the source extension.
    fn destination(&self) -> PathBuf {
        let mut name = new_record_id();
        if let Some(ext) = self.source.extension().and_then(|e| e.to_str()) {
            name.push('.');
            name.push_str(ext);
        }
        self.photo_dir.join(name)
    }
}

#[async_trait]
impl CameraProvider for FileCamera {
    fn name(&self) -> &'static str {
        "file"
    }

    fn has_permission(&self) -> bool {
        self.granted
    }

    async fn capture_photo(&self) -> Result<String> {
        if !path_exists(&self.source).await {
            return Err(Error::device(
                "file",
                format!("source image {} does not exist", self.source.display()),
            ));
        }

        tokio::fs::create_dir_all(&self.photo_dir)
            .await
            .map_err(|source| Error::DirectoryCreate {
                path: self.photo_dir.clone(),
                source,
            })?;

        let dest = self.destination();
        tokio::fs::copy(&self.source, &dest).await?;
        debug!(
            "Imported photo {} -> {} (quality {})",
            self.source.display(),
            dest.display(),
            self.quality
        );
        Ok(format!("file://{}", dest.display()))
    }
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::acquire_photo;

    fn temp_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("obralog_camera_{label}_{}", std::process::id()))
    }

    #[tokio::test]
    async fn test_capture_imports_file() {
        let dir = temp_dir("import");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let source = dir.join("obra.jpg");
        std::fs::write(&source, b"jpeg bytes").unwrap();

        let photo_dir = dir.join("fotos");
        let camera = FileCamera::new(&source, &photo_dir, 0.7, true);
        let uri = acquire_photo(&camera).await.unwrap();

        assert!(uri.starts_with("file://"));
        assert!(uri.ends_with(".jpg"));
        let imported = PathBuf::from(uri.trim_start_matches("file://"));
        assert_eq!(std::fs::read(imported).unwrap(), b"jpeg bytes");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_capture_missing_source() {
        let dir = temp_dir("missing");
        let camera = FileCamera::new(dir.join("nope.jpg"), dir.join("fotos"), 0.7, true);

        let err = acquire_photo(&camera).await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_capture_denied() {
        let dir = temp_dir("denied");
        let camera = FileCamera::new(dir.join("obra.jpg"), dir.join("fotos"), 0.7, false);

        let err = acquire_photo(&camera).await.unwrap_err();
        assert!(err.is_permission_denied());
    }
}
