pub mod commands;
pub mod config;
pub mod crypto;
pub mod document;
pub mod index;
pub mod llm;
pub mod pipeline;
pub mod providers;

// Re-export commonly used items
pub use crypto::{AnswerSealer, SealKey};
pub use document::{Document, DocumentLoader};
pub use index::VectorIndex;
pub use pipeline::Pipeline;
