//! End-to-end tests against a running Ollama instance.
//!
//! Run with: cargo test -- --ignored
//! Requires OLLAMA_URL (default http://localhost:11434) and the configured
//! model tags to be pullable.

use std::fs;
use std::sync::Arc;

use ragseal::config::PipelineConfig;
use ragseal::crypto::{AnswerSealer, SealKey};
use ragseal::document::{DocumentLoader, TextChunker};
use ragseal::index::{EmbeddingRecord, VectorIndex};
use ragseal::llm::QueryEngine;
use ragseal::pipeline::Pipeline;
use ragseal::providers::ollama::OllamaProvider;
use ragseal::providers::traits::CompletionProvider;

const SAMPLE: &str = "The lighthouse at Alexandria was completed around 280 BC \
on the island of Pharos. It stood roughly one hundred meters tall and guided \
ships into the harbor for centuries until earthquakes brought it down. \
\n\nThe structure was commissioned by Ptolemy I and finished under Ptolemy II. \
Its light came from a furnace at the top, reportedly visible from fifty \
kilometers out at sea.";

fn write_sample_docs(dir: &std::path::Path) {
    fs::write(dir.join("lighthouse.txt"), SAMPLE).unwrap();
    fs::write(dir.join("ignore.bin"), b"not a document").unwrap();
}

#[tokio::test]
#[ignore]
async fn test_sealed_answer_round_trips_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_docs(dir.path());

    let config = PipelineConfig::from_env();
    let provider: Arc<dyn CompletionProvider> =
        Arc::new(OllamaProvider::connect(&config).await.unwrap());

    let documents = DocumentLoader::load_dir(dir.path()).unwrap();
    assert_eq!(documents.len(), 1);

    let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap);
    let mut index = VectorIndex::new();
    for document in &documents {
        for chunk in chunker.chunk(&document.text) {
            let vector = provider.generate_embedding(&chunk).await.unwrap();
            index
                .insert(EmbeddingRecord::new(
                    vector,
                    chunk,
                    document.path.display().to_string(),
                ))
                .unwrap();
        }
    }

    let engine = QueryEngine::new(provider, index, config.top_k);
    let answer = engine
        .ask("Who commissioned the lighthouse at Alexandria?")
        .await
        .unwrap();
    assert!(!answer.trim().is_empty());

    let sealer = AnswerSealer::new(&SealKey::generate());
    let token = sealer.seal(&answer).unwrap();
    assert_ne!(token, answer);
    assert_eq!(sealer.unseal(&token).unwrap(), answer);
}

#[tokio::test]
#[ignore]
async fn test_pipeline_build_and_ask_sealed() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_docs(dir.path());

    let config = PipelineConfig::from_env();
    let key = SealKey::generate();
    let pipeline = Pipeline::build(&config, dir.path(), key.clone())
        .await
        .unwrap();
    assert!(!pipeline.index().is_empty());

    let token = pipeline
        .ask_sealed("How tall was the lighthouse?")
        .await
        .unwrap();

    // Decryptable with the same session key, including outside the pipeline
    let answer = pipeline.unseal(&token).unwrap();
    assert!(!answer.trim().is_empty());
    assert_eq!(AnswerSealer::new(&key).unseal(&token).unwrap(), answer);
}
