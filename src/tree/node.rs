/// Sentinel index for a missing parent or child link.
pub(crate) const NIL: usize = usize::MAX;

/// Arena slot of the root. The root never moves, so its handle is stable
/// across every insertion and removal.
pub(crate) const ROOT: usize = 0;

/// Opaque handle to a node slot inside an [`OrderedTree`](crate::OrderedTree).
///
/// A handle is only meaningful for the tree that produced it. Once the node it
/// names is removed the handle may dangle or be reused by a later insertion;
/// the root handle is the exception and always names the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw arena index behind this handle.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A populated node: one key, its value and its structural links.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,

    /// Index of the parent slot (NIL for the root). Non-owning.
    pub(crate) parent: usize,

    /// Index of the left child slot (NIL if none). Owning.
    pub(crate) left: usize,

    /// Index of the right child slot (NIL if none). Owning.
    pub(crate) right: usize,
}

impl<K, V> Node<K, V> {
    #[inline]
    pub(crate) const fn new(key: K, value: V, parent: usize) -> Self {
        Self {
            key,
            value,
            parent,
            left: NIL,
            right: NIL,
        }
    }

    #[inline]
    pub(crate) const fn is_leaf(&self) -> bool {
        self.left == NIL && self.right == NIL
    }
}

/// One cell of the node arena.
///
/// `Vacant` doubles as the empty-tree placeholder when it sits in the root
/// slot, so an empty tree can never be mistaken for a node holding some key.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    Vacant,
    Occupied(Node<K, V>),
}

impl<K, V> Default for Slot<K, V> {
    #[inline]
    fn default() -> Self {
        Slot::Vacant
    }
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub(crate) const fn as_node(&self) -> Option<&Node<K, V>> {
        match self {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant => None,
        }
    }

    #[inline]
    pub(crate) fn as_node_mut(&mut self) -> Option<&mut Node<K, V>> {
        match self {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant => None,
        }
    }

    #[inline]
    pub(crate) fn take(&mut self) -> Option<Node<K, V>> {
        match core::mem::take(self) {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant => None,
        }
    }
}
