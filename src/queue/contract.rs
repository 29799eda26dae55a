//! The order queue contract and the strategy-selecting [`PriorityQueue`].

use super::error::QueueError;
use super::level_heap::LevelHeap;
use super::order::{Guid, Order, Side};
use super::sequence_heap::SequenceHeap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A side-tagged queue of resting orders in strict price-time priority.
///
/// Every implementation pops the best price for its side first and, among
/// orders at the same price, the one that arrived first. Absence is never an
/// error: an empty queue pops `None` and an unknown order removes `None`.
///
/// Implementations are single-writer structures; all mutation goes through
/// `&mut self`.
pub trait OrderQueue {
    /// Side this queue serves.
    fn side(&self) -> Side;

    /// Number of resident orders.
    fn len(&self) -> usize;

    /// Returns `true` when no order is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an order. Never rejects.
    ///
    /// Pushing an order for the other side, or an identity that is already
    /// resident, is a caller bug: it panics in debug builds and is logged in
    /// release builds. A duplicate pushed in a release build is still queued
    /// but only the first copy is indexed, so once that copy leaves the queue
    /// the duplicate can no longer be removed by identity; it only leaves
    /// through `pop` or `clear`.
    fn push(&mut self, order: Order);

    /// Removes and returns the highest-priority order.
    fn pop(&mut self) -> Option<Order>;

    /// Returns the highest-priority order without removing it.
    fn peek(&self) -> Option<&Order>;

    /// Lowers the remaining amount of the highest-priority order by
    /// `quantity` (saturating) without moving it, so a partial fill keeps its
    /// time priority. A head left with nothing to trade is popped.
    ///
    /// Returns the amount left on the head, `Some(0)` when it was filled and
    /// popped, or `None` on an empty queue.
    fn reduce_head(&mut self, quantity: u64) -> Option<u64>;

    /// Removes the order identified by `guid` resting at `price`.
    ///
    /// `None` means no such order rests at that price, typically because it
    /// already matched or was already cancelled. Callers treat it as benign.
    fn remove(&mut self, guid: Guid, price: i64) -> Option<Order>;

    /// Drops every resident order.
    fn clear(&mut self);

    /// Checks every structural invariant of the queue.
    ///
    /// # Errors
    /// Returns the first [`QueueError`] violation found.
    fn validate(&self) -> Result<(), QueueError>;

    /// Pops every resident order in priority order.
    fn drain(&mut self) -> Vec<Order> {
        let mut drained = Vec::with_capacity(self.len());
        while let Some(order) = self.pop() {
            drained.push(order);
        }
        drained
    }
}

/// Backing strategy for a [`PriorityQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStrategy {
    /// Heap of price levels, each a FIFO of orders. Cheapest when many
    /// orders share few prices.
    #[default]
    LevelHeap,

    /// Flat heap of orders keyed by price and arrival sequence.
    SequenceHeap,
}

impl fmt::Display for QueueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueStrategy::LevelHeap => write!(f, "level_heap"),
            QueueStrategy::SequenceHeap => write!(f, "sequence_heap"),
        }
    }
}

/// An [`OrderQueue`] whose backing strategy is chosen at construction time.
///
/// # Examples
///
/// ```
/// use orderqueue_rs::{Order, OrderQueue, PriorityQueue, QueueStrategy, Side};
///
/// let mut bids = PriorityQueue::new(Side::Buy, QueueStrategy::SequenceHeap);
/// bids.push(Order::new(100, 5, 1, 1, 1, Side::Buy));
/// bids.push(Order::new(101, 5, 2, 1, 1, Side::Buy));
///
/// assert_eq!(bids.pop().map(|o| o.price()), Some(101));
/// assert_eq!(bids.len(), 1);
/// ```
#[derive(Debug)]
pub enum PriorityQueue {
    /// Level+FIFO strategy.
    Levels(LevelHeap),
    /// Flat sequence-keyed strategy.
    Sequence(SequenceHeap),
}

macro_rules! dispatch {
    ($self:expr, $queue:ident => $body:expr) => {
        match $self {
            PriorityQueue::Levels($queue) => $body,
            PriorityQueue::Sequence($queue) => $body,
        }
    };
}

impl PriorityQueue {
    /// Creates an empty queue for `side` backed by `strategy`.
    #[must_use]
    pub fn new(side: Side, strategy: QueueStrategy) -> Self {
        Self::with_capacity(side, strategy, 0)
    }

    /// Creates an empty queue with room for `capacity` orders.
    #[must_use]
    pub fn with_capacity(side: Side, strategy: QueueStrategy, capacity: usize) -> Self {
        match strategy {
            QueueStrategy::LevelHeap => {
                PriorityQueue::Levels(LevelHeap::with_capacity(side, capacity))
            }
            QueueStrategy::SequenceHeap => {
                PriorityQueue::Sequence(SequenceHeap::with_capacity(side, capacity))
            }
        }
    }

    /// Strategy backing this queue.
    #[must_use]
    pub fn strategy(&self) -> QueueStrategy {
        match self {
            PriorityQueue::Levels(_) => QueueStrategy::LevelHeap,
            PriorityQueue::Sequence(_) => QueueStrategy::SequenceHeap,
        }
    }
}

impl OrderQueue for PriorityQueue {
    fn side(&self) -> Side {
        dispatch!(self, q => q.side())
    }

    fn len(&self) -> usize {
        dispatch!(self, q => q.len())
    }

    fn push(&mut self, order: Order) {
        dispatch!(self, q => q.push(order))
    }

    fn pop(&mut self) -> Option<Order> {
        dispatch!(self, q => q.pop())
    }

    fn peek(&self) -> Option<&Order> {
        dispatch!(self, q => q.peek())
    }

    fn reduce_head(&mut self, quantity: u64) -> Option<u64> {
        dispatch!(self, q => q.reduce_head(quantity))
    }

    fn remove(&mut self, guid: Guid, price: i64) -> Option<Order> {
        dispatch!(self, q => q.remove(guid, price))
    }

    fn clear(&mut self) {
        dispatch!(self, q => q.clear())
    }

    fn validate(&self) -> Result<(), QueueError> {
        dispatch!(self, q => q.validate())
    }
}
