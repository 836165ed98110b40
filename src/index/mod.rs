mod store;

pub use store::{EmbeddingRecord, IndexError, ScoredChunk, VectorIndex};
