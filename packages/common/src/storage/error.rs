use thiserror::Error;

/// Errors that can occur while persisting an uploaded image.
///
/// `Io` and `Rejected` are raised by `ImageStore` implementations backed by a disk or a
/// remote bucket; the size limit is enforced before a store is reached.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The upload exceeds the configured size limit.
    #[error("image exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
    /// The backing store rejected the upload.
    #[error("image store rejected upload: {0}")]
    Rejected(String),
}
