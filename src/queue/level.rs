//! Price level FIFO built over an arena of order nodes.
//!
//! Orders live in a [`Slab`] owned by the queue. A level only keeps the
//! head/tail handles of a doubly linked run through that arena, which gives
//! O(1) append, pop-front and interior unlink without any shared ownership
//! between orders.

use super::order::Order;
use slab::Slab;

/// Arena node holding an order and its FIFO links.
#[derive(Debug)]
pub(crate) struct OrderNode {
    pub(crate) order: Order,
    prev: Option<usize>,
    next: Option<usize>,
}

impl OrderNode {
    pub(crate) fn new(order: Order) -> Self {
        OrderNode {
            order,
            prev: None,
            next: None,
        }
    }
}

/// All resting orders sharing one exact price, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    price: i64,
    head: Option<usize>,
    tail: Option<usize>,
    order_count: usize,
    total_amount: u64,
}

impl PriceLevel {
    pub(crate) fn new(price: i64) -> Self {
        PriceLevel {
            price,
            head: None,
            tail: None,
            order_count: 0,
            total_amount: 0,
        }
    }

    /// Price shared by every order in the level.
    #[must_use]
    #[inline]
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Number of resting orders.
    #[must_use]
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// Sum of the remaining amounts of every resting order.
    #[must_use]
    #[inline]
    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Arena handle of the oldest order, if any.
    #[inline]
    pub(crate) fn front(&self) -> Option<usize> {
        self.head
    }

    /// Links the node at `slot` behind the current tail.
    pub(crate) fn append(&mut self, orders: &mut Slab<OrderNode>, slot: usize) {
        match self.tail {
            Some(tail) => {
                orders[tail].next = Some(slot);
                orders[slot].prev = Some(tail);
            }
            None => {
                self.head = Some(slot);
                orders[slot].prev = None;
            }
        }
        orders[slot].next = None;
        self.tail = Some(slot);
        self.order_count += 1;
        self.total_amount = self.total_amount.saturating_add(orders[slot].order.amount());
    }

    /// Unlinks the oldest node and returns its handle. The node stays in the arena.
    pub(crate) fn pop_front(&mut self, orders: &mut Slab<OrderNode>) -> Option<usize> {
        let head = self.head?;
        self.unlink(orders, head);
        Some(head)
    }

    /// Unlinks the node at `slot`, which must currently belong to this level.
    pub(crate) fn unlink(&mut self, orders: &mut Slab<OrderNode>, slot: usize) {
        let (prev, next) = (orders[slot].prev, orders[slot].next);
        match prev {
            Some(p) => orders[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => orders[n].prev = prev,
            None => self.tail = prev,
        }
        orders[slot].prev = None;
        orders[slot].next = None;
        self.order_count -= 1;
        self.total_amount = self.total_amount.saturating_sub(orders[slot].order.amount());
    }

    /// Lowers the remaining amount of the node at `slot`, which must belong to
    /// this level, and returns what is left. The node keeps its place.
    pub(crate) fn reduce(
        &mut self,
        orders: &mut Slab<OrderNode>,
        slot: usize,
        quantity: u64,
    ) -> u64 {
        let order = &mut orders[slot].order;
        let before = order.amount();
        let remaining = order.reduce(quantity);
        self.total_amount = self.total_amount.saturating_sub(before - remaining);
        remaining
    }

    /// Walks the FIFO from oldest to newest, yielding `(slot, order)`.
    pub(crate) fn iter<'a>(&self, orders: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            orders,
            cursor: self.head,
            expected_prev: None,
        }
    }

    /// Handle of the newest order, if any.
    #[inline]
    pub(crate) fn back(&self) -> Option<usize> {
        self.tail
    }
}

/// Iterator over a level's FIFO.
///
/// Stops early if a back link disagrees with the walk, which lets the
/// validator detect corrupted links by comparing counts.
pub(crate) struct LevelIter<'a> {
    orders: &'a Slab<OrderNode>,
    cursor: Option<usize>,
    expected_prev: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = (usize, &'a Order);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let node = self.orders.get(slot)?;
        if node.prev != self.expected_prev {
            self.cursor = None;
            return None;
        }
        self.expected_prev = Some(slot);
        self.cursor = node.next;
        Some((slot, &node.order))
    }
}
