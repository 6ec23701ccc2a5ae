use async_trait::async_trait;
use tracing::warn;

use super::error::StorageError;
use super::traits::{ImageStore, ImageUpload};

/// Image store used until a real bucket is wired in. Accepts every upload and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredImageStore;

#[async_trait]
impl ImageStore for UnconfiguredImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<Option<String>, StorageError> {
        warn!(
            filename = %upload.filename,
            size = upload.size(),
            "Image storage is not configured, discarding upload"
        );
        Ok(None)
    }
}
