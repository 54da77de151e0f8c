//! Candidate retrieval: embedder + language-filtered vector index.
//!
//! The index itself is externally owned (Qdrant in production, an in-memory
//! mock in tests); [`SemanticRetriever`] composes it with the
//! [`QueryEmbedder`](crate::embedding::QueryEmbedder) and enforces the
//! language filter contract: a [`Candidate`] never leaks across languages.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use client::QdrantFaqIndex;
pub use error::RetrievalError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockFaqIndex, cosine_similarity};

use tracing::debug;

use crate::corpus::{FaqEntry, LanguageCode};
use crate::embedding::QueryEmbedder;
use crate::hashing::faq_point_id;

/// An indexed FAQ entry ready for upsert.
#[derive(Debug, Clone)]
pub struct FaqPoint {
    pub id: u64,
    pub vector: Vec<f32>,
    pub entry: FaqEntry,
}

/// A raw index hit before rank assignment.
#[derive(Debug, Clone)]
pub struct IndexHit {
    pub entry: FaqEntry,
    pub similarity: f32,
}

/// A retrieval candidate handed to the reranker.
///
/// `retrieval_rank` is the 0-based position in the index's similarity
/// ordering; the decision pipeline uses it as a stable tie-break so identical
/// inputs always produce identical decisions.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub entry: FaqEntry,
    pub retrieval_rank: usize,
    pub similarity: f32,
}

/// Async seam over the vector index (RPITIT, no boxing).
pub trait FaqIndex: Send + Sync {
    /// Creates the backing collection if missing.
    fn ensure_collection(
        &self,
        vector_size: u64,
    ) -> impl std::future::Future<Output = Result<(), RetrievalError>> + Send;

    /// Replaces the whole indexed corpus with `points` (hot reload).
    fn rebuild(
        &self,
        points: Vec<FaqPoint>,
        vector_size: u64,
    ) -> impl std::future::Future<Output = Result<(), RetrievalError>> + Send;

    /// Returns up to `limit` hits for `vector`, restricted to `language`,
    /// ordered by descending similarity. Fewer hits than `limit` is normal.
    fn search(
        &self,
        vector: Vec<f32>,
        language: LanguageCode,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<IndexHit>, RetrievalError>> + Send;
}

/// Embedder + index pair: the Candidate Retriever of the decision pipeline.
#[derive(Debug)]
pub struct SemanticRetriever<I: FaqIndex> {
    embedder: QueryEmbedder,
    index: I,
}

impl<I: FaqIndex> SemanticRetriever<I> {
    pub fn new(embedder: QueryEmbedder, index: I) -> Self {
        Self { embedder, index }
    }

    /// Ensures the index collection exists for this embedder's dimension.
    pub async fn ensure_ready(&self) -> Result<(), RetrievalError> {
        self.index
            .ensure_collection(self.embedder.embedding_dim() as u64)
            .await
    }

    /// Top-`k` language-filtered candidates for `query`, most similar first.
    ///
    /// One-shot per call; no engine-level retry. If the language subset holds
    /// fewer than `k` entries, all of them come back (no padding, no error).
    pub async fn retrieve(
        &self,
        query: &str,
        language: LanguageCode,
        k: usize,
    ) -> Result<Vec<Candidate>, RetrievalError> {
        let vector = self.embedder.embed(query)?;
        let hits = self.index.search(vector, language, k as u64).await?;

        debug!(
            lang = %language,
            requested = k,
            returned = hits.len(),
            "Retrieved candidates"
        );

        Ok(hits
            .into_iter()
            .enumerate()
            .map(|(rank, hit)| Candidate {
                entry: hit.entry,
                retrieval_rank: rank,
                similarity: hit.similarity,
            })
            .collect())
    }

    /// Re-embeds `entries` and swaps them in as the new corpus.
    ///
    /// Deterministic point ids make the swap idempotent: reloading an
    /// unchanged corpus overwrites every point in place.
    pub async fn rebuild(&self, entries: Vec<FaqEntry>) -> Result<usize, RetrievalError> {
        let count = entries.len();

        let mut points = Vec::with_capacity(count);
        for entry in entries {
            let vector = self.embedder.embed(&entry.question)?;
            points.push(FaqPoint {
                id: faq_point_id(entry.language, &entry.question),
                vector,
                entry,
            });
        }

        self.index
            .rebuild(points, self.embedder.embedding_dim() as u64)
            .await?;

        Ok(count)
    }

    pub fn embedder(&self) -> &QueryEmbedder {
        &self.embedder
    }

    pub fn index(&self) -> &I {
        &self.index
    }
}
