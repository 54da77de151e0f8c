use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::FaqEngine;
use crate::fallback::FallbackResponder;
use crate::retrieval::FaqIndex;

/// Shared state behind the gateway routes.
pub struct HandlerState<I: FaqIndex + 'static> {
    pub engine: Arc<FaqEngine<I>>,

    /// Set when escalated queries should be retried against a chat model.
    pub fallback: Option<Arc<FallbackResponder>>,

    /// Corpus file the reload route re-indexes from.
    pub corpus_path: Option<PathBuf>,
}

// Manual impl: `I` need not be `Clone`, only the Arcs are cloned.
impl<I: FaqIndex> Clone for HandlerState<I> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            fallback: self.fallback.clone(),
            corpus_path: self.corpus_path.clone(),
        }
    }
}

impl<I: FaqIndex> HandlerState<I> {
    pub fn new(
        engine: Arc<FaqEngine<I>>,
        fallback: Option<Arc<FallbackResponder>>,
        corpus_path: Option<PathBuf>,
    ) -> Self {
        Self {
            engine,
            fallback,
            corpus_path,
        }
    }
}
