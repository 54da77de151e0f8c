//! Cross-encoder relevance scoring.
//!
//! Scores `(query, candidate)` pairs with a BERT sequence-classification
//! model (sigmoid-activated, so scores live on a 0..1 scale matching the
//! calibrated thresholds). Stub mode substitutes a deterministic
//! lemma-overlap score so the whole pipeline runs without model files.
//!
//! The batch API preserves input order; ordering for the decision policy is
//! applied separately via [`rank_by_score`] (score descending, ties broken by
//! retrieval rank, stable for reproducible decisions).

pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::CrossEncoderConfig;
pub use error::RerankerError;

use candle_core::{Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::device::select_device;
use crate::lexical::Normalizer;
use crate::retrieval::Candidate;

/// A candidate annotated with its cross-encoder relevance score.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f32,
}

/// Sorts by score descending; ties keep retrieval order (stable).
pub fn rank_by_score(scored: &mut [ScoredCandidate]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.candidate.retrieval_rank.cmp(&b.candidate.retrieval_rank))
    });
}

struct ClassifierHead {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    device: Device,
}

enum EncoderBackend {
    Model(Box<ClassifierHead>),
    Stub { normalizer: Normalizer },
}

/// Batch relevance scorer over retrieval candidates.
pub struct CrossEncoder {
    backend: EncoderBackend,
    config: CrossEncoderConfig,
}

impl std::fmt::Debug for CrossEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model(head) => format!("Model({:?})", head.device),
                    EncoderBackend::Stub { .. } => "Stub".to_string(),
                },
            )
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl CrossEncoder {
    /// Loads the cross-encoder; stub mode when no model directory is set.
    pub fn load(config: CrossEncoderConfig) -> Result<Self, RerankerError> {
        if let Err(reason) = config.validate() {
            return Err(RerankerError::InvalidConfig { reason });
        }

        let Some(ref model_dir) = config.model_dir else {
            warn!("No cross-encoder model configured, running in stub mode");
            return Ok(Self {
                backend: EncoderBackend::Stub {
                    normalizer: Normalizer::default(),
                },
                config,
            });
        };

        if !model_dir.exists() {
            return Err(RerankerError::ModelNotFound {
                path: model_dir.clone(),
            });
        }

        let device = select_device().map_err(|e| RerankerError::ModelLoadFailed {
            reason: e.to_string(),
        })?;

        let bert_config: BertConfig = serde_json::from_reader(std::fs::File::open(
            model_dir.join("config.json"),
        )?)
        .map_err(|e| RerankerError::ModelLoadFailed {
            reason: format!("failed to parse config.json: {e}"),
        })?;

        let weights_path = model_dir.join("model.safetensors");
        // SAFETY: mmapped read-only weights, alive as long as the model.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, &device)?
        };

        let bert = BertModel::load(vb.pp("bert"), &bert_config).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("failed to load BERT encoder: {e}"),
            }
        })?;

        let hidden = bert_config.hidden_size;
        let pooler = candle_nn::linear(hidden, hidden, vb.pp("bert.pooler.dense"))
            .map_err(|e| RerankerError::ModelLoadFailed {
                reason: format!("failed to load pooler: {e}"),
            })?;
        let classifier =
            candle_nn::linear(hidden, 1, vb.pp("classifier")).map_err(|e| {
                RerankerError::ModelLoadFailed {
                    reason: format!("failed to load classifier head: {e}"),
                }
            })?;

        let tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json")).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("failed to load tokenizer: {e}"),
            }
        })?;

        info!(
            model_dir = %model_dir.display(),
            hidden_size = hidden,
            "Cross-encoder model loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model(Box::new(ClassifierHead {
                bert,
                pooler,
                classifier,
                tokenizer,
                device,
            })),
            config,
        })
    }

    /// Stub scorer (lexical overlap, deterministic).
    pub fn stub() -> Result<Self, RerankerError> {
        Self::load(CrossEncoderConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        matches!(self.backend, EncoderBackend::Model(_))
    }

    pub fn config(&self) -> &CrossEncoderConfig {
        &self.config
    }

    /// Scores one `(query, candidate-text)` pair on the 0..1 scale.
    pub fn score_pair(&self, query: &str, candidate: &str) -> Result<f32, RerankerError> {
        match &self.backend {
            EncoderBackend::Model(head) => self.score_with_model(head, query, candidate),
            EncoderBackend::Stub { normalizer } => {
                Ok(lexical_placeholder_score(normalizer, query, candidate))
            }
        }
    }

    /// Scores the whole candidate batch against `query`.
    ///
    /// Output has the same length and candidate identities as the input, in
    /// input order. Deterministic for fixed weights.
    pub fn score_batch(
        &self,
        query: &str,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<ScoredCandidate>, RerankerError> {
        debug!(
            query_len = query.len(),
            num_candidates = candidates.len(),
            "Scoring candidate batch"
        );

        candidates
            .into_iter()
            .map(|candidate| {
                let score = self.score_pair(query, &candidate.entry.question)?;
                Ok(ScoredCandidate { candidate, score })
            })
            .collect()
    }

    fn score_with_model(
        &self,
        head: &ClassifierHead,
        query: &str,
        candidate: &str,
    ) -> Result<f32, RerankerError> {
        let encoding = head
            .tokenizer
            .encode((query, candidate), true)
            .map_err(|e| RerankerError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let mut ids: Vec<u32> = encoding.get_ids().to_vec();
        let mut type_ids: Vec<u32> = encoding.get_type_ids().to_vec();
        let mut mask: Vec<u32> = encoding.get_attention_mask().to_vec();

        if ids.len() > self.config.max_seq_len {
            ids.truncate(self.config.max_seq_len);
            type_ids.truncate(self.config.max_seq_len);
            mask.truncate(self.config.max_seq_len);
        }

        let input_ids = Tensor::new(&ids[..], &head.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(&type_ids[..], &head.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(&mask[..], &head.device)?.unsqueeze(0)?;

        let hidden = head
            .bert
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| RerankerError::InferenceFailed {
                reason: format!("BERT forward pass failed: {e}"),
            })?;

        // [CLS] token → pooler (tanh) → single-logit classifier → sigmoid.
        let cls = hidden.narrow(1, 0, 1)?.squeeze(1)?;
        let pooled = head.pooler.forward(&cls)?.tanh()?;
        let logits = head.classifier.forward(&pooled)?;
        let score = candle_nn::ops::sigmoid(&logits)?
            .flatten_all()?
            .to_vec1::<f32>()?[0];

        Ok(score)
    }
}

/// Stub relevance score: lemma-set recall/Jaccard blend squashed through a
/// sigmoid, so stub scores land on the same 0..1 scale the thresholds expect.
fn lexical_placeholder_score(normalizer: &Normalizer, query: &str, candidate: &str) -> f32 {
    let query_tokens = normalizer.token_set(query);
    let candidate_tokens = normalizer.token_set(candidate);

    if query_tokens.is_empty() || candidate_tokens.is_empty() {
        return 0.0;
    }

    let matches = query_tokens.intersection(&candidate_tokens).count() as f32;
    let recall = matches / query_tokens.len() as f32;
    let union = query_tokens.union(&candidate_tokens).count() as f32;
    let jaccard = matches / union;

    let blended = 0.6 * recall + 0.4 * jaccard;

    let squashed = 1.0 / (1.0 + (-8.0 * (blended - 0.5)).exp());
    squashed.clamp(0.0, 1.0)
}
