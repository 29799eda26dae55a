//! Ordered identity set backed by a left-leaning red-black tree.
//!
//! Nodes live in a flat arena and link to each other by index. The set only
//! grows: there is no removal, which keeps the tree a plain 2-3 tree encoding
//! with an insert-only rebalancing path. Membership test and insert are
//! O(log n) and the structure can be checked with [`GuidSet::validate`].

use super::error::TrackerError;
use crate::queue::order::Guid;
use std::cmp::Ordering;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone)]
struct Node {
    guid: Guid,
    left: usize,
    right: usize,
    red: bool,
}

/// Insert-only ordered set of [`Guid`]s.
///
/// # Examples
///
/// ```
/// use orderqueue_rs::{Guid, GuidSet};
///
/// let mut set = GuidSet::new();
/// assert!(set.insert(Guid::new(7, 3)));
/// assert!(!set.insert(Guid::new(7, 3)));
/// assert!(set.contains(Guid::new(7, 3)));
/// assert!(set.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GuidSet {
    nodes: Vec<Node>,
    root: usize,
}

impl Default for GuidSet {
    fn default() -> Self {
        Self::new()
    }
}

impl GuidSet {
    #[must_use]
    pub fn new() -> Self {
        GuidSet {
            nodes: Vec::new(),
            root: NIL,
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        GuidSet {
            nodes: Vec::with_capacity(capacity),
            root: NIL,
        }
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `guid` is in the set.
    #[must_use]
    pub fn contains(&self, guid: Guid) -> bool {
        let mut h = self.root;
        while h != NIL {
            let node = &self.nodes[h];
            h = match guid.cmp(&node.guid) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Adds `guid`. Returns `false`, leaving the set untouched, if it was
    /// already present.
    pub fn insert(&mut self, guid: Guid) -> bool {
        let (root, inserted) = self.insert_at(self.root, guid);
        self.root = root;
        self.nodes[root].red = false;
        inserted
    }

    /// Identities in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            set: self,
            stack: Vec::new(),
        };
        iter.descend_left(self.root);
        iter
    }

    fn insert_at(&mut self, h: usize, guid: Guid) -> (usize, bool) {
        if h == NIL {
            self.nodes.push(Node {
                guid,
                left: NIL,
                right: NIL,
                red: true,
            });
            return (self.nodes.len() - 1, true);
        }
        let inserted = match guid.cmp(&self.nodes[h].guid) {
            Ordering::Less => {
                let (left, inserted) = self.insert_at(self.nodes[h].left, guid);
                self.nodes[h].left = left;
                inserted
            }
            Ordering::Greater => {
                let (right, inserted) = self.insert_at(self.nodes[h].right, guid);
                self.nodes[h].right = right;
                inserted
            }
            Ordering::Equal => false,
        };
        if !inserted {
            return (h, false);
        }
        (self.balance(h), true)
    }

    fn balance(&mut self, mut h: usize) -> usize {
        if self.is_red(self.nodes[h].right) && !self.is_red(self.nodes[h].left) {
            h = self.rotate_left(h);
        }
        let left = self.nodes[h].left;
        if self.is_red(left) && self.is_red(self.nodes[left].left) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.nodes[h].left) && self.is_red(self.nodes[h].right) {
            self.flip_colors(h);
        }
        h
    }

    #[inline]
    fn is_red(&self, h: usize) -> bool {
        h != NIL && self.nodes[h].red
    }

    fn rotate_left(&mut self, h: usize) -> usize {
        let x = self.nodes[h].right;
        self.nodes[h].right = self.nodes[x].left;
        self.nodes[x].left = h;
        self.nodes[x].red = self.nodes[h].red;
        self.nodes[h].red = true;
        x
    }

    fn rotate_right(&mut self, h: usize) -> usize {
        let x = self.nodes[h].left;
        self.nodes[h].left = self.nodes[x].right;
        self.nodes[x].right = h;
        self.nodes[x].red = self.nodes[h].red;
        self.nodes[h].red = true;
        x
    }

    fn flip_colors(&mut self, h: usize) {
        let (left, right) = (self.nodes[h].left, self.nodes[h].right);
        self.nodes[h].red = !self.nodes[h].red;
        self.nodes[left].red = !self.nodes[left].red;
        self.nodes[right].red = !self.nodes[right].red;
    }

    /// Number of black links on every root-to-leaf path.
    #[must_use]
    pub fn black_height(&self) -> usize {
        let mut h = self.root;
        let mut height = 0;
        while h != NIL {
            if !self.nodes[h].red {
                height += 1;
            }
            h = self.nodes[h].left;
        }
        height
    }

    /// Checks ordering and red-black balance of the whole tree.
    ///
    /// # Errors
    /// Returns the first [`TrackerError`] found.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.is_red(self.root) {
            return Err(TrackerError::RedRoot);
        }
        let (_, counted) = self.check(self.root, None, None)?;
        if counted != self.nodes.len() {
            return Err(TrackerError::SizeMismatch {
                recorded: self.nodes.len(),
                counted,
            });
        }
        Ok(())
    }

    /// Returns `(black height, node count)` of the subtree at `h`.
    fn check(
        &self,
        h: usize,
        low: Option<Guid>,
        high: Option<Guid>,
    ) -> Result<(usize, usize), TrackerError> {
        if h == NIL {
            return Ok((0, 0));
        }
        let node = self
            .nodes
            .get(h)
            .ok_or(TrackerError::DanglingLink { node: h })?;
        let guid = node.guid;
        if low.is_some_and(|low| guid <= low) || high.is_some_and(|high| guid >= high) {
            return Err(TrackerError::OrderViolated { guid });
        }
        if self.is_red(node.right) {
            return Err(TrackerError::RedRightLink { guid });
        }
        if node.red && self.is_red(node.left) {
            return Err(TrackerError::ConsecutiveRed { guid });
        }
        let (left, left_count) = self.check(node.left, low, Some(guid))?;
        let (right, right_count) = self.check(node.right, Some(guid), high)?;
        if left != right {
            return Err(TrackerError::BlackHeightMismatch { guid, left, right });
        }
        Ok((left + usize::from(!node.red), left_count + right_count + 1))
    }
}

impl Extend<Guid> for GuidSet {
    fn extend<I: IntoIterator<Item = Guid>>(&mut self, iter: I) {
        for guid in iter {
            self.insert(guid);
        }
    }
}

impl FromIterator<Guid> for GuidSet {
    fn from_iter<I: IntoIterator<Item = Guid>>(iter: I) -> Self {
        let mut set = GuidSet::new();
        set.extend(iter);
        set
    }
}

/// In-order iterator over a [`GuidSet`].
pub struct Iter<'a> {
    set: &'a GuidSet,
    stack: Vec<usize>,
}

impl Iter<'_> {
    fn descend_left(&mut self, mut h: usize) {
        while h != NIL {
            self.stack.push(h);
            h = self.set.nodes[h].left;
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = Guid;

    fn next(&mut self) -> Option<Guid> {
        let h = self.stack.pop()?;
        let node = &self.set.nodes[h];
        self.descend_left(node.right);
        Some(node.guid)
    }
}

impl<'a> IntoIterator for &'a GuidSet {
    type Item = Guid;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
