mod error;
mod traits;

pub mod unconfigured;

pub use error::StorageError;
pub use traits::{ImageStore, ImageUpload};
pub use unconfigured::UnconfiguredImageStore;
