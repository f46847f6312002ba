use thiserror::Error as ThisError;

/// Convenience alias for results returned by tree operations.
pub type Result<T, E = TreeError> = core::result::Result<T, E>;

/// Recoverable failures reported by [`OrderedTree`](crate::OrderedTree).
///
/// None of these indicate structural corruption: the tree is left exactly as
/// it was before the failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum TreeError {
    /// Descent ran out of children before reaching an equal key.
    #[error("key not found")]
    KeyNotFound,

    /// The requested rank does not exist in a tree of `len` elements.
    #[error("k = {k} is out of range for a tree of {len} elements")]
    IndexOutOfRange {
        /// Requested rank, counted from the largest key (1-based).
        k: usize,
        /// Number of elements in the tree at the time of the call.
        len: usize,
    },

    /// An equal key is already present and the tree rejects duplicates.
    #[error("key is already present")]
    DuplicateKey,
}
