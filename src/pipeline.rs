use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::crypto::{AnswerSealer, SealKey};
use crate::document::{DocumentLoader, TextChunker};
use crate::index::{EmbeddingRecord, VectorIndex};
use crate::llm::QueryEngine;
use crate::providers::ollama::OllamaProvider;
use crate::providers::traits::CompletionProvider;

/// End-to-end pipeline: load documents, build the in-memory index once, then
/// answer questions and seal every answer under the session key.
pub struct Pipeline {
    engine: QueryEngine,
    sealer: AnswerSealer,
    key: SealKey,
}

impl Pipeline {
    pub async fn build(config: &PipelineConfig, docs_dir: &Path, key: SealKey) -> Result<Self> {
        let provider: Arc<dyn CompletionProvider> =
            Arc::new(OllamaProvider::connect(config).await?);

        let documents = DocumentLoader::load_dir(docs_dir)?;
        if documents.is_empty() {
            return Err(anyhow!(
                "No supported documents (.txt, .pdf) found in {}",
                docs_dir.display()
            ));
        }
        log::info!(
            "Loaded {} documents from {}",
            documents.len(),
            docs_dir.display()
        );

        let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap);
        let mut chunks: Vec<(String, String)> = Vec::new();
        for document in &documents {
            let source = document.path.display().to_string();
            for chunk in chunker.chunk(&document.text) {
                chunks.push((chunk, source.clone()));
            }
        }

        let pb = ProgressBar::new(chunks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap(),
        );
        pb.set_message("Embedding chunks");

        let mut index = VectorIndex::new();
        for (text, source) in chunks {
            let vector = provider.generate_embedding(&text).await?;
            index.insert(EmbeddingRecord::new(vector, text, source))?;
            pb.inc(1);
        }
        pb.finish_with_message("Index built");

        let engine = QueryEngine::new(provider, index, config.top_k);
        let sealer = AnswerSealer::new(&key);

        Ok(Self {
            engine,
            sealer,
            key,
        })
    }

    /// Answers the question and returns the sealed token. The plaintext
    /// answer is dropped once sealed.
    pub async fn ask_sealed(&self, question: &str) -> Result<String> {
        let answer = self.engine.ask(question).await?;
        Ok(self.sealer.seal(&answer)?)
    }

    pub fn seal(&self, text: &str) -> Result<String> {
        Ok(self.sealer.seal(text)?)
    }

    pub fn unseal(&self, token: &str) -> Result<String> {
        Ok(self.sealer.unseal(token)?)
    }

    pub fn key(&self) -> &SealKey {
        &self.key
    }

    pub fn index(&self) -> &VectorIndex {
        self.engine.index()
    }

    pub async fn model_info(&self) -> Result<String> {
        self.engine.model_info().await
    }
}
