use super::{RankedChunk, RetrievalError, VectorStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// A [`VectorStore`] held entirely in memory. Scoring matches the on-disk store.
#[derive(Debug, Default)]
pub struct MemoryVectorStore {
    entries: RwLock<Vec<(String, Vec<f32>)>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn replace_all(&self, entries: Vec<(String, Vec<f32>)>) -> Result<(), RetrievalError> {
        if let Some((_, first)) = entries.first() {
            let expected = first.len();
            if let Some((_, bad)) = entries.iter().find(|(_, v)| v.len() != expected) {
                return Err(RetrievalError::DimensionMismatch {
                    expected,
                    actual: bad.len(),
                });
            }
        }
        *self.entries.write().await = entries;
        Ok(())
    }

    async fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<RankedChunk>, RetrievalError> {
        let entries = self.entries.read().await;
        if let Some((_, first)) = entries.first() {
            if first.len() != query.len() {
                return Err(RetrievalError::DimensionMismatch {
                    expected: first.len(),
                    actual: query.len(),
                });
            }
        }

        let mut ranked: Vec<RankedChunk> = entries
            .iter()
            .map(|(content, vector)| RankedChunk {
                content: content.clone(),
                score: 1.0 - cosine_distance(query, vector) / 2.0,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(k);
        Ok(ranked)
    }

    async fn len(&self) -> Result<usize, RetrievalError> {
        Ok(self.entries.read().await.len())
    }
}

/// `1 - cos(a, b)`, in `[0, 2]`. A zero vector is treated as orthogonal.
fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_nearest_orders_by_similarity() {
        let store = MemoryVectorStore::new();
        store
            .replace_all(vec![
                ("east".to_string(), vec![1.0, 0.0]),
                ("north".to_string(), vec![0.0, 1.0]),
                ("west".to_string(), vec![-1.0, 0.0]),
            ])
            .await
            .unwrap();

        let ranked = store.nearest(&[0.9, 0.1], 2).await.unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].content, "east");
        assert_eq!(ranked[1].content, "north");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_rejected() {
        let store = MemoryVectorStore::new();
        let err = store
            .replace_all(vec![
                ("a".to_string(), vec![1.0, 0.0]),
                ("b".to_string(), vec![1.0]),
            ])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));

        store
            .replace_all(vec![("a".to_string(), vec![1.0, 0.0])])
            .await
            .unwrap();
        assert!(store.nearest(&[1.0, 0.0, 0.0], 1).await.is_err());
    }

    #[tokio::test]
    async fn test_replace_all_discards_previous_entries() {
        let store = MemoryVectorStore::new();
        store
            .replace_all(vec![("old".to_string(), vec![1.0])])
            .await
            .unwrap();
        store
            .replace_all(vec![("new".to_string(), vec![1.0])])
            .await
            .unwrap();
        assert_eq!(store.len().await.unwrap(), 1);
        assert_eq!(store.nearest(&[1.0], 5).await.unwrap()[0].content, "new");
    }
}
