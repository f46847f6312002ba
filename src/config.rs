/// How [`OrderedTree::insert`](crate::OrderedTree::insert) treats a key that
/// compares equal to one already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Overwrite the stored value in place and hand back the previous one.
    #[default]
    Replace,
    /// Fail with [`TreeError::DuplicateKey`](crate::TreeError::DuplicateKey)
    /// and leave the tree untouched.
    Reject,
    /// Route the key right and store it as a separate node.
    ///
    /// Lookups and removals only ever reach the topologically highest of the
    /// equal keys, so the copies below it surface one at a time as the ones
    /// above them are removed.
    AllowRight,
}

/// Construction-time settings for an [`OrderedTree`](crate::OrderedTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Number of arena slots reserved up front, including the root slot
    pub initial_capacity: usize,
    /// Duplicate-key handling
    pub duplicates: DuplicatePolicy,
}

impl TreeConfig {
    /// Default number of arena slots reserved by [`TreeConfig::default`].
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Returns a copy with `initial_capacity` replaced.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - Arena slots to reserve; values below one are raised to one
    #[inline]
    pub const fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = if initial_capacity == 0 {
            1
        } else {
            initial_capacity
        };
        self
    }

    /// Returns a copy with the duplicate-key policy replaced.
    #[inline]
    pub const fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_CAPACITY,
            duplicates: DuplicatePolicy::default(),
        }
    }
}
