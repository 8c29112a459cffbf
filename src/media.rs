//! Local media storage for uploaded game images

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::catalog::UploadedImage;
use crate::config::MediaConfig;

/// Directory under the media root that holds game cover images
const GAME_IMAGE_DIR: &str = "games";

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media storage failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(&config.root, &config.url_prefix)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write the upload under a fresh name and return its media-relative path
    pub async fn save_game_image(&self, image: &UploadedImage) -> Result<String, MediaError> {
        let dir = self.root.join(GAME_IMAGE_DIR);
        tokio::fs::create_dir_all(&dir).await?;

        let name = match extension_of(&image.file_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        tokio::fs::write(dir.join(&name), &image.bytes).await?;

        let relative = format!("{}/{}", GAME_IMAGE_DIR, name);
        tracing::info!(path = %relative, bytes = image.bytes.len(), "Stored game image");
        Ok(relative)
    }

    /// Delete a previously stored file by its media-relative path
    pub async fn remove(&self, relative: &str) -> Result<(), MediaError> {
        tokio::fs::remove_file(self.root.join(relative)).await?;
        tracing::info!(path = %relative, "Removed stored media");
        Ok(())
    }

    /// Public URL of a stored media path
    pub fn url_for(&self, relative: &str) -> String {
        format!(
            "{}/{}",
            self.url_prefix.trim_end_matches('/'),
            relative.trim_start_matches('/')
        )
    }
}

/// Lowercased alphanumeric extension of an uploaded file name, if any
fn extension_of(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
