//! Side-specific order queues in strict price-time priority.

pub mod config;
/// The queue contract and strategy selection.
pub mod contract;
pub mod error;
mod heap;
/// Price level FIFO over the order arena.
pub mod level;
pub mod level_heap;
pub mod maker;
/// Order identity, side and the resting order record.
pub mod order;
pub mod sequence_heap;
#[cfg(test)]
mod tests;

pub use config::{DEFAULT_INITIAL_CAPACITY, QueueConfig};
pub use contract::{OrderQueue, PriorityQueue, QueueStrategy};
pub use error::QueueError;
pub use level::PriceLevel;
pub use level_heap::LevelHeap;
pub use maker::OrderMaker;
pub use order::{Guid, Order, Side};
pub use sequence_heap::SequenceHeap;
