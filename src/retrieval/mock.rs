//! In-memory FAQ index for tests and modelless development.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::corpus::LanguageCode;

use super::error::RetrievalError;
use super::{FaqIndex, FaqPoint, IndexHit};

/// Brute-force cosine index over an in-memory point list.
#[derive(Default)]
pub struct MockFaqIndex {
    points: RwLock<Vec<FaqPoint>>,
    fail_searches: AtomicBool,
}

impl MockFaqIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated mock (skips the rebuild call in tests).
    pub fn with_points(points: Vec<FaqPoint>) -> Self {
        Self {
            points: RwLock::new(points),
            fail_searches: AtomicBool::new(false),
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.read().len()
    }

    /// Makes every subsequent search fail, simulating an index outage.
    pub fn fail_searches(&self, fail: bool) {
        self.fail_searches.store(fail, Ordering::SeqCst);
    }
}

impl FaqIndex for MockFaqIndex {
    async fn ensure_collection(&self, _vector_size: u64) -> Result<(), RetrievalError> {
        Ok(())
    }

    async fn rebuild(
        &self,
        points: Vec<FaqPoint>,
        _vector_size: u64,
    ) -> Result<(), RetrievalError> {
        *self.points.write() = points;
        Ok(())
    }

    async fn search(
        &self,
        vector: Vec<f32>,
        language: LanguageCode,
        limit: u64,
    ) -> Result<Vec<IndexHit>, RetrievalError> {
        if self.fail_searches.load(Ordering::SeqCst) {
            return Err(RetrievalError::SearchFailed {
                collection: "mock".to_string(),
                message: "simulated index outage".to_string(),
            });
        }

        let points = self.points.read();

        let mut hits: Vec<IndexHit> = points
            .iter()
            .filter(|p| p.entry.language == language)
            .map(|p| IndexHit {
                entry: p.entry.clone(),
                similarity: cosine_similarity(&vector, &p.vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        hits.truncate(limit as usize);
        Ok(hits)
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
