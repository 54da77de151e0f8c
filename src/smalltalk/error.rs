//! Small-talk classifier construction errors.

use thiserror::Error;

/// Pattern-set problems, surfaced at construction time as fatal
/// configuration errors, never deferred to per-call failures.
#[derive(Debug, Error)]
pub enum SmallTalkError {
    /// No patterns configured: the gate would silently pass everything.
    #[error("small-talk pattern list is empty")]
    EmptyPatternList,

    /// A pattern failed to compile.
    #[error("invalid small-talk pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
