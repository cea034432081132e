//! Store error types.

use claim_core::PlayerId;
use thiserror::Error;

/// Store error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// LMDB error.
    #[error("database error: {0}")]
    Database(#[from] heed::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document under `key` is not a valid claim list.
    #[error("malformed claim document under key `{key}`: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored claim breaks the claim rules.
    #[error("invalid claim of `{owner}` under key `{key}`: {reason}")]
    InvalidClaim {
        key: String,
        owner: PlayerId,
        reason: &'static str,
    },

    /// The claim list could not be encoded.
    #[error("failed to encode claims: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
