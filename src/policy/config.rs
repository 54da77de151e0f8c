use super::error::ThresholdError;

/// Default absolute acceptance threshold.
pub const DEFAULT_ABS_TH: f32 = 0.35;

/// Default minimum top-1/top-2 margin.
pub const DEFAULT_REL_DIFF: f32 = 0.10;

/// Calibrated score scale of the default reranker (sigmoid logits → 0..1).
pub const DEFAULT_SCALE: f32 = 1.0;

/// Decision thresholds, calibrated per reranker model.
///
/// These are configuration, not law: a different scoring model means a
/// different score distribution, and these values must be re-calibrated, not
/// reused. `override_*` and `backoff_*` are fractions of `scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Reject when the best score falls below this.
    pub abs_th: f32,
    /// Reject when `best - second` falls below this. Must be positive:
    /// a zero margin requirement would accept genuinely ambiguous pairs.
    pub rel_diff: f32,
    /// Calibrated score scale of the reranker in use.
    pub scale: f32,
    /// High-confidence override: accept without lexical support when
    /// `best >= override_score * scale` and margin clears
    /// `override_margin * scale`.
    pub override_score: f32,
    pub override_margin: f32,
    /// Single-shared-token back-off: accept with one good token when
    /// `best >= backoff_score * scale` and margin clears
    /// `backoff_margin * scale`.
    pub backoff_score: f32,
    pub backoff_margin: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            abs_th: DEFAULT_ABS_TH,
            rel_diff: DEFAULT_REL_DIFF,
            scale: DEFAULT_SCALE,
            override_score: 0.90,
            override_margin: 0.20,
            backoff_score: 0.65,
            backoff_margin: 0.15,
        }
    }
}

impl Thresholds {
    const ENV_ABS_TH: &'static str = "VERDICT_ABS_TH";
    const ENV_REL_DIFF: &'static str = "VERDICT_REL_DIFF";
    const ENV_SCALE: &'static str = "VERDICT_SCORE_SCALE";

    /// Reads overrides from `VERDICT_*` variables on top of defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            abs_th: parse_f32(Self::ENV_ABS_TH, defaults.abs_th),
            rel_diff: parse_f32(Self::ENV_REL_DIFF, defaults.rel_diff),
            scale: parse_f32(Self::ENV_SCALE, defaults.scale),
            ..defaults
        }
    }

    /// Rejects nonsensical threshold sets at startup. A service running with
    /// broken thresholds is worse than one that refuses to start.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let positive = [
            ("abs_th", self.abs_th),
            ("rel_diff", self.rel_diff),
            ("scale", self.scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ThresholdError::NotPositive {
                    name,
                    value,
                });
            }
        }

        let fractions = [
            ("override_score", self.override_score),
            ("override_margin", self.override_margin),
            ("backoff_score", self.backoff_score),
            ("backoff_margin", self.backoff_margin),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(ThresholdError::FractionOutOfRange { name, value });
            }
        }

        if self.abs_th > self.scale {
            return Err(ThresholdError::AboveScale {
                name: "abs_th",
                value: self.abs_th,
                scale: self.scale,
            });
        }

        Ok(())
    }
}

fn parse_f32(var: &str, default: f32) -> f32 {
    std::env::var(var)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
