use alloc::vec::Vec;

use super::{NIL, OrderedTree};
use crate::{Queue, Result, TreeError};

impl<K, V> OrderedTree<K, V> {
    /// Values in ascending key order: left subtree, node, right subtree.
    pub fn dfs_in_order(&self) -> Vec<&V> {
        self.collect_values(self.in_order_slots())
    }

    /// Values in node, left subtree, right subtree order.
    pub fn dfs_pre_order(&self) -> Vec<&V> {
        let mut slots = Vec::with_capacity(self.len);
        let root = self.root_slot();
        if root == NIL {
            return Vec::new();
        }

        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            slots.push(idx);
            let node = self.node_at(idx);
            if node.right != NIL {
                stack.push(node.right);
            }
            if node.left != NIL {
                stack.push(node.left);
            }
        }

        self.collect_values(slots)
    }

    /// Values in left subtree, right subtree, node order.
    pub fn dfs_post_order(&self) -> Vec<&V> {
        let mut slots = Vec::with_capacity(self.len);
        let root = self.root_slot();
        if root == NIL {
            return Vec::new();
        }

        // node, right, left reversed is left, right, node
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            slots.push(idx);
            let node = self.node_at(idx);
            if node.left != NIL {
                stack.push(node.left);
            }
            if node.right != NIL {
                stack.push(node.right);
            }
        }
        slots.reverse();

        self.collect_values(slots)
    }

    /// Values level by level from the root, left to right within a level.
    pub fn bfs(&self) -> Vec<&V> {
        let mut values = Vec::with_capacity(self.len);
        let root = self.root_slot();
        if root == NIL {
            return values;
        }

        let mut queue = Queue::new(self.len.min(64));
        queue.enqueue(root);

        while let Some(idx) = queue.dequeue() {
            let node = self.node_at(idx);
            values.push(&node.value);

            if node.left != NIL {
                queue.enqueue(node.left);
            }
            if node.right != NIL {
                queue.enqueue(node.right);
            }
        }

        values
    }

    /// Keys in ascending order.
    pub fn keys_in_order(&self) -> Vec<&K> {
        self.in_order_slots()
            .into_iter()
            .map(|idx| &self.node_at(idx).key)
            .collect()
    }

    /// Number of edges on the longest root-to-leaf path.
    ///
    /// A single node, like an empty tree, has height 0.
    pub fn height(&self) -> usize {
        let root = self.root_slot();
        if root == NIL {
            return 0;
        }

        let mut height = 0;
        let mut stack = vec![(root, 0)];

        while let Some((idx, depth)) = stack.pop() {
            let node = self.node_at(idx);
            if node.is_leaf() {
                height = height.max(depth);
                continue;
            }
            for child in [node.left, node.right] {
                if child != NIL {
                    stack.push((child, depth + 1));
                }
            }
        }

        height
    }

    /// Returns the value whose key is the `k`-th largest (1-based).
    ///
    /// Walks the tree in descending key order and stops after `k` nodes.
    ///
    /// # Errors
    ///
    /// * [`TreeError::IndexOutOfRange`] - `k` is zero or greater than [`len`](Self::len)
    pub fn find_kth_largest_value(&self, k: usize) -> Result<&V> {
        if k == 0 || k > self.len {
            return Err(TreeError::IndexOutOfRange { k, len: self.len });
        }

        let mut stack = Vec::new();
        let mut current = self.root_slot();
        let mut seen = 0;

        loop {
            while current != NIL {
                stack.push(current);
                current = self.node_at(current).right;
            }
            let Some(idx) = stack.pop() else {
                break;
            };

            seen += 1;
            let node = self.node_at(idx);
            if seen == k {
                return Ok(&node.value);
            }
            current = node.left;
        }

        Err(TreeError::IndexOutOfRange { k, len: self.len })
    }

    fn in_order_slots(&self) -> Vec<usize> {
        let mut slots = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root_slot();

        loop {
            while current != NIL {
                stack.push(current);
                current = self.node_at(current).left;
            }
            let Some(idx) = stack.pop() else {
                break;
            };

            slots.push(idx);
            current = self.node_at(idx).right;
        }

        slots
    }

    #[inline]
    fn collect_values(&self, slots: Vec<usize>) -> Vec<&V> {
        slots
            .into_iter()
            .map(|idx| &self.node_at(idx).value)
            .collect()
    }
}

impl<K: Ord, V> OrderedTree<K, V> {
    /// Returns true if an in-order walk yields non-decreasing keys and every
    /// child's parent link points back at the node that owns it.
    pub fn is_bst(&self) -> bool {
        let keys = self.keys_in_order();
        keys.windows(2).all(|pair| pair[0] <= pair[1]) && self.verify_links()
    }
}
