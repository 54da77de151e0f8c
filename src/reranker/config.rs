use std::path::PathBuf;

use crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Cross-encoder configuration.
///
/// `model_dir` points at a BERT sequence-classification export
/// (`config.json`, `model.safetensors`, `tokenizer.json`). Absent, the
/// reranker runs in stub mode with a deterministic lexical score.
#[derive(Debug, Clone)]
pub struct CrossEncoderConfig {
    pub model_dir: Option<PathBuf>,

    pub max_seq_len: usize,
}

impl Default for CrossEncoderConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl CrossEncoderConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Self::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_seq_len == 0 {
            return Err("max_seq_len must be non-zero".to_string());
        }

        if let Some(ref dir) = self.model_dir
            && dir.as_os_str().is_empty()
        {
            return Err("model_dir cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
