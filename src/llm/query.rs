use anyhow::Result;
use std::sync::Arc;

use crate::index::{ScoredChunk, VectorIndex};
use crate::providers::traits::CompletionProvider;

/// Answers one question at a time from the built index: embed the question,
/// retrieve the nearest chunks, forward them with the question in a single
/// generation call. No caching, no multi-turn state.
pub struct QueryEngine {
    provider: Arc<dyn CompletionProvider>,
    index: VectorIndex,
    top_k: usize,
}

impl QueryEngine {
    pub fn new(provider: Arc<dyn CompletionProvider>, index: VectorIndex, top_k: usize) -> Self {
        Self {
            provider,
            index,
            top_k: top_k.max(1),
        }
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub async fn ask(&self, question: &str) -> Result<String> {
        let query_embedding = self.provider.generate_embedding(question).await?;
        let retrieved = self.index.search(&query_embedding, self.top_k);

        log::debug!(
            "Retrieved {} chunks for question: {}",
            retrieved.len(),
            question
        );

        let prompt = build_prompt(&retrieved, question);
        self.provider.complete(&prompt).await
    }

    pub async fn model_info(&self) -> Result<String> {
        self.provider.get_model_info().await
    }
}

fn build_prompt(retrieved: &[ScoredChunk], question: &str) -> String {
    let mut context = String::new();
    for (i, chunk) in retrieved.iter().enumerate() {
        context.push_str(&format!(
            "{}. [Score: {:.2}] {} (Source: {})\n",
            i + 1,
            chunk.score,
            chunk.text,
            chunk.source
        ));
    }

    format!(
        "Answer the question using only the context below. \
         If the context does not contain the answer, say so.\n\n\
         Context:\n{}\nQuestion: {}\nAnswer:",
        context, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_context_and_question() {
        let retrieved = vec![
            ScoredChunk {
                text: "Paris is the capital of France.".to_string(),
                source: "geo.txt".to_string(),
                score: 0.91,
            },
            ScoredChunk {
                text: "Berlin is the capital of Germany.".to_string(),
                source: "geo.txt".to_string(),
                score: 0.42,
            },
        ];

        let prompt = build_prompt(&retrieved, "What is the capital of France?");
        assert!(prompt.contains("Paris is the capital of France."));
        assert!(prompt.contains("geo.txt"));
        assert!(prompt.contains("Question: What is the capital of France?"));
        assert!(prompt.starts_with("Answer the question"));
    }

    #[test]
    fn test_prompt_with_no_retrieved_chunks() {
        let prompt = build_prompt(&[], "Anything?");
        assert!(prompt.contains("Question: Anything?"));
    }
}
