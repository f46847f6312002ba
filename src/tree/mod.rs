use alloc::vec::Vec;
use core::cmp::Ordering;
use log::{debug, trace};
use ordered_float::OrderedFloat;

use crate::{DuplicatePolicy, Result, TreeConfig, TreeError};

mod node;
pub use node::NodeId;
use node::{NIL, Node, ROOT, Slot};

mod traversal;

/// An [`OrderedTree`] keyed by floating-point numbers.
///
/// Keys are wrapped in [`OrderedFloat`] so that every value, NaN included, has
/// a place in the total order.
pub type FloatTree<F, V> = OrderedTree<OrderedFloat<F>, V>;

/// An unbalanced binary search tree mapping ordered keys to values.
///
/// Nodes are stored in an index arena. Every node owns its left and right
/// child slots and keeps a non-owning back-index to its parent, which removal
/// uses to rewire the tree around the excised node. The root always lives in
/// slot 0: removing it copies a replacement's contents into that slot instead
/// of moving the root elsewhere, so the root's [`NodeId`] never changes.
///
/// Key features:
/// - Insert, find and remove in O(h) where h is the tree height
/// - No rebalancing; sorted insertion produces a chain of depth n
/// - Iterative traversals and queries, safe on degenerate chains
/// - Released slots are recycled through an internal free list
#[derive(Debug, Clone)]
pub struct OrderedTree<K, V> {
    /// Node arena; slot 0 is the root and is `Vacant` while the tree is empty
    nodes: Vec<Slot<K, V>>,

    /// Stack of released slot indices available for reuse. Never holds the root slot.
    free_list: Vec<usize>,

    /// Number of populated nodes
    len: usize,

    /// Construction-time settings
    config: TreeConfig,
}

impl<K, V> Default for OrderedTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OrderedTree<K, V> {
    /// Creates an empty tree with the default [`TreeConfig`].
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates an empty tree with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(TreeConfig::default().with_capacity(capacity))
    }

    /// Creates an empty tree with the given settings.
    pub fn with_config(config: TreeConfig) -> Self {
        let mut nodes = Vec::with_capacity(config.initial_capacity.max(1));
        nodes.push(Slot::Vacant);

        Self {
            nodes,
            free_list: Vec::new(),
            len: 0,
            config,
        }
    }

    /// Number of key-value pairs stored.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the root is still the empty placeholder.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The settings this tree was built with.
    #[inline]
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Removes every node and returns the root to the empty placeholder.
    ///
    /// The arena's allocation is kept for reuse.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[ROOT] = Slot::Vacant;
        self.free_list.clear();
        self.len = 0;
        debug!("tree cleared");
    }

    /// Handle of the root node, or `None` while the tree is empty.
    ///
    /// The returned handle is the same for the whole life of the tree.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.link(ROOT)
    }

    /// Key stored at `id`, or `None` if the slot is vacant or out of range.
    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.get_node(id).map(|node| &node.key)
    }

    /// Value stored at `id`, or `None` if the slot is vacant or out of range.
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.get_node(id).map(|node| &node.value)
    }

    /// Parent of the node at `id`. `None` for the root and for invalid handles.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|node| self.link(node.parent))
    }

    /// Left child of the node at `id`.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|node| self.link(node.left))
    }

    /// Right child of the node at `id`.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(|node| self.link(node.right))
    }

    /// Entry with the smallest key.
    pub fn min(&self) -> Option<(&K, &V)> {
        let root = self.root_slot();
        if root == NIL {
            return None;
        }
        let node = self.node_at(self.find_minimum(root));
        Some((&node.key, &node.value))
    }

    /// Entry with the largest key.
    pub fn max(&self) -> Option<(&K, &V)> {
        let root = self.root_slot();
        if root == NIL {
            return None;
        }
        let node = self.node_at(self.find_maximum(root));
        Some((&node.key, &node.value))
    }

    #[inline]
    fn get_node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.nodes.get(id.0).and_then(Slot::as_node)
    }

    #[inline]
    fn link(&self, idx: usize) -> Option<NodeId> {
        if idx == NIL || self.nodes.get(idx).and_then(Slot::as_node).is_none() {
            None
        } else {
            Some(NodeId(idx))
        }
    }

    /// Root slot index, or NIL for an empty tree.
    #[inline]
    fn root_slot(&self) -> usize {
        if self.is_empty() { NIL } else { ROOT }
    }

    #[inline]
    fn node_at(&self, idx: usize) -> &Node<K, V> {
        match self.nodes[idx].as_node() {
            Some(node) => node,
            None => unreachable!("link points at vacant slot {idx}"),
        }
    }

    #[inline]
    fn node_at_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        match self.nodes[idx].as_node_mut() {
            Some(node) => node,
            None => unreachable!("link points at vacant slot {idx}"),
        }
    }

    fn allocate_node(&mut self, node: Node<K, V>) -> usize {
        match self.free_list.pop() {
            Some(idx) => {
                self.nodes[idx] = Slot::Occupied(node);
                idx
            }
            None => {
                self.nodes.push(Slot::Occupied(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Empties a slot and hands back its node. The root slot is vacated but
    /// never offered for reuse.
    fn deallocate_node(&mut self, idx: usize) -> Node<K, V> {
        let node = match self.nodes[idx].take() {
            Some(node) => node,
            None => unreachable!("released vacant slot {idx}"),
        };
        if idx != ROOT {
            self.free_list.push(idx);
        }
        node
    }

    fn find_minimum(&self, mut idx: usize) -> usize {
        loop {
            let left = self.node_at(idx).left;
            if left == NIL {
                return idx;
            }
            idx = left;
        }
    }

    fn find_maximum(&self, mut idx: usize) -> usize {
        loop {
            let right = self.node_at(idx).right;
            if right == NIL {
                return idx;
            }
            idx = right;
        }
    }

    /// Excises `old` from the tree, putting `replacement` (or nothing) in its
    /// place, and returns the excised node.
    ///
    /// A non-root node is unlinked from its parent and the replacement is
    /// re-parented. The root is never unlinked: the replacement's contents are
    /// moved into the root slot, the replacement's slot is released, and its
    /// children are re-parented onto the root. With no replacement the root
    /// slot becomes the empty placeholder.
    fn transplant(&mut self, old: usize, replacement: usize) -> Node<K, V> {
        let parent = self.node_at(old).parent;

        if parent != NIL {
            let parent_node = self.node_at_mut(parent);
            if parent_node.left == old {
                parent_node.left = replacement;
            } else if parent_node.right == old {
                parent_node.right = replacement;
            }

            if replacement != NIL {
                self.node_at_mut(replacement).parent = parent;
            }

            return self.deallocate_node(old);
        }

        debug_assert_eq!(old, ROOT);

        if replacement == NIL {
            debug!("root removed, tree is now empty");
            return self.deallocate_node(ROOT);
        }

        let mut adopted = self.deallocate_node(replacement);
        adopted.parent = NIL;
        let (left, right) = (adopted.left, adopted.right);

        let removed = core::mem::replace(self.node_at_mut(ROOT), adopted);
        for child in [left, right] {
            if child != NIL {
                self.node_at_mut(child).parent = ROOT;
            }
        }

        trace!("root slot adopted contents of slot {replacement}");
        removed
    }

    /// Checks the parent-consistency invariant over every reachable node and
    /// that the reachable node count matches `len`.
    pub(crate) fn verify_links(&self) -> bool {
        let root = self.root_slot();
        if root == NIL {
            return self.nodes[ROOT].as_node().is_none();
        }
        if self.node_at(root).parent != NIL {
            return false;
        }

        let mut stack = vec![root];
        let mut seen = 0;

        while let Some(idx) = stack.pop() {
            seen += 1;
            let node = self.node_at(idx);
            for child in [node.left, node.right] {
                if child == NIL {
                    continue;
                }
                match self.nodes.get(child).and_then(Slot::as_node) {
                    Some(child_node) if child_node.parent == idx => stack.push(child),
                    _ => return false,
                }
            }
        }

        seen == self.len
    }
}

impl<K: Ord, V> OrderedTree<K, V> {
    /// Inserts `key` with `value`.
    ///
    /// An empty tree takes the pair into its root in place. Otherwise the key
    /// descends left while strictly smaller and right while greater, and a new
    /// leaf is attached at the first missing child slot. An equal key is
    /// handled according to the tree's [`DuplicatePolicy`].
    ///
    /// # Returns
    ///
    /// * `Ok(Some(old))` - The previous value, when an equal key was replaced
    /// * `Ok(None)` - A new node was created
    ///
    /// # Errors
    ///
    /// * [`TreeError::DuplicateKey`] - An equal key exists and the policy is `Reject`
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        if self.is_empty() {
            self.nodes[ROOT] = Slot::Occupied(Node::new(key, value, NIL));
            self.len = 1;
            trace!("insert populated the empty root");
            return Ok(None);
        }

        let mut current = ROOT;
        let go_left = loop {
            let (ordering, left, right) = {
                let node = self.node_at(current);
                (key.cmp(&node.key), node.left, node.right)
            };

            let next = match ordering {
                Ordering::Less => left,
                Ordering::Greater => right,
                Ordering::Equal => match self.config.duplicates {
                    DuplicatePolicy::Replace => {
                        trace!("insert replaced value in slot {current}");
                        let node = self.node_at_mut(current);
                        return Ok(Some(core::mem::replace(&mut node.value, value)));
                    }
                    DuplicatePolicy::Reject => return Err(TreeError::DuplicateKey),
                    DuplicatePolicy::AllowRight => right,
                },
            };

            if next == NIL {
                break ordering == Ordering::Less;
            }
            current = next;
        };

        let idx = self.allocate_node(Node::new(key, value, current));
        let parent = self.node_at_mut(current);
        if go_left {
            parent.left = idx;
        } else {
            parent.right = idx;
        }
        self.len += 1;

        trace!(
            "insert attached slot {idx} as {} child of slot {current}",
            if go_left { "left" } else { "right" }
        );

        debug_assert!(self.verify_links(), "links inconsistent after insertion");

        Ok(None)
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// * [`TreeError::KeyNotFound`] - Descent reached a missing child before an equal key
    pub fn find(&self, key: &K) -> Result<&V> {
        let idx = self.find_node(key).ok_or(TreeError::KeyNotFound)?;
        Ok(&self.node_at(idx).value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// * [`TreeError::KeyNotFound`] - Descent reached a missing child before an equal key
    pub fn find_mut(&mut self, key: &K) -> Result<&mut V> {
        let idx = self.find_node(key).ok_or(TreeError::KeyNotFound)?;
        Ok(&mut self.node_at_mut(idx).value)
    }

    /// Returns true if some node holds a key equal to `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Handle of the node holding `key`, if any.
    #[inline]
    pub fn node_id(&self, key: &K) -> Option<NodeId> {
        self.find_node(key).map(NodeId)
    }

    /// Removes the node holding `key` and returns its value.
    ///
    /// A node with two children takes the key and value of its in-order
    /// successor (the leftmost node of its right subtree), and the successor,
    /// which has no left child, is excised instead. A node with one child is
    /// replaced by that child; a leaf is simply unlinked.
    ///
    /// # Errors
    ///
    /// * [`TreeError::KeyNotFound`] - No node holds `key`; the tree is unchanged
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let idx = self.find_node(key).ok_or(TreeError::KeyNotFound)?;
        let (left, right) = {
            let node = self.node_at(idx);
            (node.left, node.right)
        };

        let value = if left != NIL && right != NIL {
            let successor = self.find_minimum(right);
            let successor_right = self.node_at(successor).right;
            trace!("remove slot {idx}: two children, successor slot {successor}");

            let detached = self.transplant(successor, successor_right);
            let node = self.node_at_mut(idx);
            node.key = detached.key;
            core::mem::replace(&mut node.value, detached.value)
        } else if left != NIL {
            trace!("remove slot {idx}: left child only");
            self.transplant(idx, left).value
        } else if right != NIL {
            trace!("remove slot {idx}: right child only");
            self.transplant(idx, right).value
        } else {
            trace!("remove slot {idx}: leaf");
            self.transplant(idx, NIL).value
        };

        self.len -= 1;

        debug_assert!(self.verify_links(), "links inconsistent after removal");

        Ok(value)
    }

    fn find_node(&self, key: &K) -> Option<usize> {
        let mut current = self.root_slot();

        while current != NIL {
            let node = self.node_at(current);
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(current),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }
}
