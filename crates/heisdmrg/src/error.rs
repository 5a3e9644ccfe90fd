//! Error types for heisdmrg.

use thiserror::Error;

use crate::store::Side;

/// Errors that can occur while building tensors, solving superblocks or
/// persisting blocks.
#[derive(Debug, Error)]
pub enum DmrgError {
    /// Shape mismatch between data length and expected size.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Invalid permutation.
    #[error("invalid permutation {perm:?} for tensor with {ndim} dimensions")]
    InvalidPermutation { perm: Vec<usize>, ndim: usize },

    /// Operation requires specific tensor rank.
    #[error("expected tensor of rank {expected}, got rank {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// Matrix must be square.
    #[error("matrix must be square: got {rows}x{cols}")]
    NotSquareMatrix { rows: usize, cols: usize },

    /// Eigendecomposition failed.
    #[error("eigendecomposition error: {message}")]
    EigenError { message: String },

    /// A block operator does not live in the block's basis.
    #[error("operator {operator} has dimension {actual}, block basis has {expected}")]
    OperatorDimension {
        operator: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Truncation asked for more states than the basis holds.
    #[error("cannot keep {requested} states out of a {available}-dimensional basis")]
    TruncationExceedsBasis { requested: usize, available: usize },

    /// Truncation asked for no states at all.
    #[error("truncation must keep at least one of {available} states")]
    EmptyTruncation { available: usize },

    /// Run parameters violate a documented precondition.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// No block was stored under the requested key.
    #[error("no {side} block with {size} sites in the store")]
    BlockNotFound { size: usize, side: Side },

    /// Filesystem failure in a persistent store.
    #[error("block store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding of a stored block failed.
    #[error("block encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DmrgError>;
