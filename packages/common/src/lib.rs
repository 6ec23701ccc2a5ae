pub mod similarity;
pub mod storage;

pub use similarity::{SongFeatures, similarity_score};
