//! Errors raised while decoding an LWO2 stream.

use thiserror::Error;

use super::chunk::ChunkId;

/// Errors that can occur during LWO2 decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The container or format signature is not what LWO2 requires.
    #[error("Invalid signature: expected {expected}, found {found}")]
    InvalidSignature { expected: ChunkId, found: ChunkId },

    #[error("Polygon declares {count} vertices, limit is {limit}")]
    PolygonTooLarge { count: usize, limit: usize },

    #[error("Truncated data at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}

impl DecodeError {
    /// Returns true if the error only invalidates the chunk being decoded,
    /// so the walker may skip that chunk and keep scanning.
    pub fn is_chunk_local(&self) -> bool {
        matches!(
            self,
            DecodeError::Truncated { .. } | DecodeError::PolygonTooLarge { .. }
        )
    }
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
