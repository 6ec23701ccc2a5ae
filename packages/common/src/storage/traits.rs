use async_trait::async_trait;

use super::error::StorageError;

/// An image received from a client, fully buffered.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Validated flat filename as sent by the client.
    pub filename: String,
    /// Image MIME type, as declared by the client or guessed from the filename.
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Storage for article photos (an S3-like bucket in a full deployment).
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the image and return the location it can be served from.
    ///
    /// Returns `Ok(None)` when the store accepted the upload but keeps no copy of it,
    /// in which case no photo reference is recorded.
    async fn save(&self, upload: &ImageUpload) -> Result<Option<String>, StorageError>;
}
