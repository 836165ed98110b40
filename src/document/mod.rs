mod chunker;
mod loader;

pub use chunker::TextChunker;
pub use loader::{Document, DocumentFormat, DocumentLoader};
