//! Query/corpus embedder (BERT sentence encoder with stub mode).
//!
//! One shared multilingual index serves every language; this module turns
//! question text into the unit-norm vectors that index stores. Use
//! [`EmbedderConfig::stub`] for tests and development without model files.

pub mod config;
pub mod device;
pub mod error;


pub use config::EmbedderConfig;
pub use error::EmbeddingError;

use std::sync::Arc;

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use device::select_device;

enum EmbedderBackend {
    Model {
        model: Arc<BertModel>,
        tokenizer: Arc<Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Sentence embedder for retrieval (masked mean pooling + L2 norm).
pub struct QueryEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for QueryEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({device:?})"),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

impl QueryEmbedder {
    /// Loads the embedder; stub mode when no model directory is configured.
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(ref model_dir) = config.model_dir else {
            warn!("No embedding model configured, running in stub mode");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        };

        if !model_dir.exists() {
            return Err(EmbeddingError::ModelNotFound {
                path: model_dir.clone(),
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for embedder");

        let bert_config: BertConfig = serde_json::from_reader(std::fs::File::open(
            model_dir.join("config.json"),
        )?)
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to parse config.json: {e}"),
        })?;

        let weights_path = model_dir.join("model.safetensors");
        // SAFETY: the weights file is mmapped read-only and not mutated
        // while the model lives.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, &device)?
        };

        let model =
            BertModel::load(vb, &bert_config).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("failed to load BERT weights: {e}"),
            })?;

        let tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json")).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("failed to load tokenizer: {e}"),
            }
        })?;

        info!(
            model_dir = %model_dir.display(),
            embedding_dim = config.embedding_dim,
            hidden_size = bert_config.hidden_size,
            "Embedding model loaded"
        );

        if config.embedding_dim > bert_config.hidden_size {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) exceeds model hidden_size ({})",
                    config.embedding_dim, bert_config.hidden_size
                ),
            });
        }

        Ok(Self {
            backend: EmbedderBackend::Model {
                model: Arc::new(model),
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    /// Stub embedder (deterministic hashed vectors).
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(EmbedderConfig::stub())
    }

    /// Embeds a single text into a unit-norm vector of `embedding_dim`.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    /// Embeds a batch (sequential forward passes; corpus rebuilds are rare).
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let mut ids: Vec<u32> = encoding.get_ids().to_vec();
        let mut type_ids: Vec<u32> = encoding.get_type_ids().to_vec();
        let mut mask: Vec<u32> = encoding.get_attention_mask().to_vec();

        if ids.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        if ids.len() > self.config.max_seq_len {
            ids.truncate(self.config.max_seq_len);
            type_ids.truncate(self.config.max_seq_len);
            mask.truncate(self.config.max_seq_len);
        }

        let input_ids = Tensor::new(&ids[..], device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(&type_ids[..], device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(&mask[..], device)?.unsqueeze(0)?;

        // [1, seq_len, hidden]
        let hidden = model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("BERT forward pass failed: {e}"),
            })?;

        // Masked mean pooling over the sequence dimension.
        let mask_f = attention_mask.to_dtype(DTYPE)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask_f)?.sum(1)?;
        let counts = mask_f.sum(1)?.clamp(1e-9, f64::INFINITY)?;
        let mean = summed.broadcast_div(&counts)?;

        let mut embedding = mean.squeeze(0)?.to_vec1::<f32>()?;
        embedding.truncate(self.config.embedding_dim);

        Ok(l2_normalize(embedding))
    }

    // Deterministic pseudo-embedding: hash-seeded LCG, then unit norm.
    // Identical texts collide exactly, which is what the mock index needs.
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        l2_normalize(embedding)
    }

    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }
}

fn l2_normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut v {
            *x /= norm;
        }
    }
    v
}
