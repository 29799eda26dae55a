//! Binary heap repair moves shared by both queue strategies.
//!
//! Implementors keep their elements in an array laid out as a binary heap
//! (children of `i` at `2i + 1` and `2i + 2`) and expose a strict priority
//! comparison plus a swap that also maintains whatever back-references they
//! keep. The root always holds the highest-priority element.

pub(crate) trait HeapRepair {
    /// Number of elements in the heap array.
    fn heap_len(&self) -> usize;

    /// `true` when the element at `a` has strictly higher priority than the one at `b`.
    fn outranks(&self, a: usize, b: usize) -> bool;

    /// Swaps two heap slots, updating any position indexes.
    fn swap_slots(&mut self, a: usize, b: usize);

    /// Moves the element at `i` towards the root while it outranks its parent.
    /// Returns `true` if it moved.
    fn sift_up(&mut self, mut i: usize) -> bool {
        let start = i;
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.outranks(i, parent) {
                break;
            }
            self.swap_slots(i, parent);
            i = parent;
        }
        i != start
    }

    /// Moves the element at `i` towards the leaves while a child outranks it.
    /// The right child is taken whenever the left one does not outrank it.
    /// Returns `true` if it moved.
    fn sift_down(&mut self, mut i: usize) -> bool {
        let start = i;
        let n = self.heap_len();
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < n && !self.outranks(left, right) {
                child = right;
            }
            if !self.outranks(child, i) {
                break;
            }
            self.swap_slots(i, child);
            i = child;
        }
        i != start
    }

    /// Restores heap order after the element at `i` changed arbitrarily.
    fn repair(&mut self, i: usize) {
        if !self.sift_down(i) {
            self.sift_up(i);
        }
    }

    /// Returns the first `(parent, child)` pair where the child outranks the parent.
    fn first_violation(&self) -> Option<(usize, usize)> {
        let n = self.heap_len();
        (1..n)
            .map(|child| ((child - 1) / 2, child))
            .find(|&(parent, child)| self.outranks(child, parent))
    }
}
