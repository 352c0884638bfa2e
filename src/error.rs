//! Error types for the cost engine
//!
//! IRR non-convergence, unknown currencies and unknown sensitivity variables
//! are not errors; see the respective modules.

use thiserror::Error;

/// Result alias used throughout the library
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A production unit violates a costing precondition
    #[error("Invalid block '{block_id}': {reason}")]
    InvalidBlock { block_id: String, reason: String },

    /// Rock type did not match and the penetration catalog has no fallback entry
    #[error("Block '{block_id}': rock type '{rock_type}' not in penetration catalog and no fallback entry configured")]
    UnresolvedRockType { block_id: String, rock_type: String },

    /// Risk premium condition string could not be parsed
    #[error("Invalid condition '{condition}': {reason}")]
    InvalidCondition { condition: String, reason: String },

    /// A computed cost came out NaN or infinite
    #[error("Block '{block_id}': non-finite value for {field}")]
    NonFiniteResult { block_id: String, field: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl EngineError {
    pub(crate) fn invalid_block(block_id: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidBlock {
            block_id: block_id.to_string(),
            reason: reason.into(),
        }
    }
}
