//! Order queue error types

use super::order::{Guid, Side};
use thiserror::Error;

/// Errors reported by the order queues.
///
/// Steady-state operations never fail: an empty queue or an unknown order is
/// modelled as `None`. These variants describe broken structural invariants,
/// as found by `validate()`, and configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QueueError {
    /// A heap parent has lower priority than one of its children.
    #[error("heap invariant violated on {side} queue: [{parent}] = {parent_key} is worse than [{child}] = {child_key}")]
    HeapOrderViolated {
        /// Side of the queue.
        side: Side,
        /// Index of the parent slot.
        parent: usize,
        /// Index of the child slot.
        child: usize,
        /// Sort key (price or composite key) held by the parent.
        parent_key: i128,
        /// Sort key held by the child.
        child_key: i128,
    },

    /// A price level holds an order at a different price.
    #[error("price level {level_price} contains order {guid} priced at {order_price}")]
    MixedPriceLevel {
        /// Price of the level.
        level_price: i64,
        /// Offending order.
        guid: Guid,
        /// Price of the offending order.
        order_price: i64,
    },

    /// A price level with no orders was left in the heap.
    #[error("empty price level {price} left in the heap")]
    EmptyPriceLevel {
        /// Price of the empty level.
        price: i64,
    },

    /// The same identity is resident more than once.
    #[error("order {0} is resident more than once")]
    DuplicateGuid(Guid),

    /// A resident order sits on the wrong side of the book.
    #[error("{side} queue holds order {guid} for the opposite side")]
    WrongSide {
        /// Side of the queue.
        side: Side,
        /// Offending order.
        guid: Guid,
    },

    /// An auxiliary index disagrees with the heap or the FIFO links.
    #[error("index corrupted: {message}")]
    IndexCorrupted {
        /// Description of the disagreement.
        message: String,
    },

    /// Counted orders disagree with the recorded size.
    #[error("size mismatch: recorded {recorded}, counted {counted}")]
    SizeMismatch {
        /// Size the queue reports.
        recorded: usize,
        /// Orders actually reachable.
        counted: usize,
    },

    /// The queue configuration could not be parsed.
    #[error("invalid queue configuration: {message}")]
    InvalidConfig {
        /// Underlying parser message.
        message: String,
    },
}

impl From<serde_json::Error> for QueueError {
    #[cold]
    fn from(err: serde_json::Error) -> Self {
        QueueError::InvalidConfig {
            message: err.to_string(),
        }
    }
}
