//! Compute device selection for candle models.

use candle_core::Device;
use tracing::warn;

use super::error::EmbeddingError;

/// Picks the best available device for the enabled backend features,
/// falling back to CPU. Never fails: an unavailable GPU downgrades with a
/// warning instead of refusing to start.
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            tracing::info!("Using Metal GPU for model inference");
            return Ok(device);
        }
        Err(e) => warn!(error = %e, "Metal device unavailable, falling back"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            tracing::info!("Using CUDA GPU for model inference");
            return Ok(device);
        }
        Err(e) => warn!(error = %e, "CUDA device unavailable, falling back"),
    }

    Ok(Device::Cpu)
}
