use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Dimension mismatch: index holds {expected}-dim vectors, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("Cannot index an empty vector")]
    EmptyVector,
}

/// One embedded chunk plus a back-reference to the document it came from.
/// Read-only after creation; lives as long as the index.
#[derive(Debug, Clone)]
pub struct EmbeddingRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub text: String,
    pub source: String,
}

impl EmbeddingRecord {
    pub fn new(vector: Vec<f32>, text: String, source: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vector,
            text,
            source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub text: String,
    pub source: String,
    pub score: f32,
}

/// In-memory vector index searched by cosine similarity. Built once per run;
/// no persistence, no eviction.
#[derive(Debug, Default)]
pub struct VectorIndex {
    records: Vec<EmbeddingRecord>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: EmbeddingRecord) -> Result<(), IndexError> {
        if record.vector.is_empty() {
            return Err(IndexError::EmptyVector);
        }
        if let Some(first) = self.records.first() {
            if first.vector.len() != record.vector.len() {
                return Err(IndexError::DimensionMismatch {
                    expected: first.vector.len(),
                    got: record.vector.len(),
                });
            }
        }
        self.records.push(record);
        Ok(())
    }

    /// Returns up to `limit` records closest to `query`, best first.
    pub fn search(&self, query: &[f32], limit: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .records
            .iter()
            .map(|record| ScoredChunk {
                text: record.text.clone(),
                source: record.source.clone(),
                score: cosine_similarity(query, &record.vector),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);
        scored
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dimension(&self) -> Option<usize> {
        self.records.first().map(|r| r.vector.len())
    }

    /// Distinct source paths, in first-seen order.
    pub fn sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = Vec::new();
        for record in &self.records {
            if !sources.contains(&record.source) {
                sources.push(record.source.clone());
            }
        }
        sources
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vector: Vec<f32>, text: &str) -> EmbeddingRecord {
        EmbeddingRecord::new(vector, text.to_string(), "test.txt".to_string())
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let mut index = VectorIndex::new();
        index.insert(record(vec![1.0, 0.0], "east")).unwrap();
        index.insert(record(vec![0.0, 1.0], "north")).unwrap();
        index.insert(record(vec![0.7, 0.7], "northeast")).unwrap();

        let results = index.search(&[1.0, 0.1], 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].text, "east");
        assert_eq!(results[1].text, "northeast");
        assert_eq!(results[2].text, "north");
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }

    #[test]
    fn test_search_respects_limit() {
        let mut index = VectorIndex::new();
        for i in 0..10 {
            index
                .insert(record(vec![i as f32, 1.0], &format!("chunk {}", i)))
                .unwrap();
        }
        assert_eq!(index.search(&[1.0, 1.0], 3).len(), 3);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut index = VectorIndex::new();
        index.insert(record(vec![1.0, 2.0, 3.0], "first")).unwrap();

        let result = index.insert(record(vec![1.0, 2.0], "second"));
        assert!(matches!(
            result,
            Err(IndexError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_empty_vector_rejected() {
        let mut index = VectorIndex::new();
        assert!(matches!(
            index.insert(record(vec![], "nothing")),
            Err(IndexError::EmptyVector)
        ));
    }

    #[test]
    fn test_zero_norm_query_scores_zero() {
        let mut index = VectorIndex::new();
        index.insert(record(vec![1.0, 2.0], "chunk")).unwrap();

        let results = index.search(&[0.0, 0.0], 1);
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn test_scored_chunk_serializes() {
        let chunk = ScoredChunk {
            text: "hello".to_string(),
            source: "a.txt".to_string(),
            score: 0.5,
        };
        let json = serde_json::to_string(&chunk).unwrap();
        let back: ScoredChunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back.text, chunk.text);
        assert_eq!(back.source, chunk.source);
    }

    #[test]
    fn test_sources_deduplicated() {
        let mut index = VectorIndex::new();
        index
            .insert(EmbeddingRecord::new(
                vec![1.0],
                "a".to_string(),
                "one.txt".to_string(),
            ))
            .unwrap();
        index
            .insert(EmbeddingRecord::new(
                vec![2.0],
                "b".to_string(),
                "one.txt".to_string(),
            ))
            .unwrap();
        index
            .insert(EmbeddingRecord::new(
                vec![3.0],
                "c".to_string(),
                "two.pdf".to_string(),
            ))
            .unwrap();

        assert_eq!(index.sources(), vec!["one.txt", "two.pdf"]);
    }
}
