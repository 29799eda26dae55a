//! # Price-Time Priority Order Queues
//!
//! The admission-and-ordering core of an order-matching engine, written in
//! Rust. The crate answers two questions for a single instrument: which
//! resting order trades next, and whether an inbound message has already been
//! seen.
//!
//! ## Key Features
//!
//! - **Strict Price-Time Priority**: Every queue pops the best price for its
//!   side first and, among equal prices, the earliest arrival.
//!
//! - **Two Interchangeable Strategies**: A heap of price levels, each holding
//!   a FIFO run of orders, and a flat heap of orders keyed by price and
//!   arrival sequence. Both implement [`OrderQueue`] and produce identical pop
//!   sequences for identical input.
//!
//! - **Sub-Linear Cancellation**: Resting orders are removed by identity and
//!   price in logarithmic time without disturbing the order of the others.
//!
//! - **Idempotent Ingestion**: [`MessageTracker`] admits each
//!   `(kind, trader, trade)` triple exactly once, backed by a per-kind
//!   red-black tree.
//!
//! - **Self-Checking Structures**: Queues and trackers expose `validate()`
//!   returning typed errors for every broken invariant.
//!
//! ## Usage
//!
//! ```
//! use orderqueue_rs::{MessageKind, MessageTracker, Order, OrderQueue, QueueConfig, Side};
//!
//! let mut tracker = MessageTracker::new();
//! let (mut bids, _asks) = QueueConfig::default().build_book();
//!
//! if tracker.admit(MessageKind::NewOrder, 7, 3) {
//!     bids.push(Order::new(101, 10, 7, 3, 1, Side::Buy));
//! }
//! // A resent message is ignored.
//! assert!(!tracker.admit(MessageKind::NewOrder, 7, 3));
//!
//! bids.push(Order::new(102, 5, 8, 1, 1, Side::Buy));
//! assert_eq!(bids.pop().map(|o| o.price()), Some(102));
//! assert_eq!(bids.pop().map(|o| o.price()), Some(101));
//! assert!(bids.is_empty());
//! ```
//!
//! ## Order Identity
//!
//! An order is identified by a [`Guid`], the trader id in the high 32 bits
//! and the trade id in the low 32 bits. This layout is stable and may be used
//! as a key by callers.
//!
//! ## Strategies
//!
//! | Strategy | Push | Pop | Remove | Best when |
//! |----------|------|-----|--------|-----------|
//! | [`QueueStrategy::LevelHeap`] | O(log L) | O(log L) | O(log L) | many orders share few prices |
//! | [`QueueStrategy::SequenceHeap`] | O(log N) | O(log N) | O(log N) | prices are mostly distinct |
//!
//! `L` is the number of distinct resting prices and `N` the number of
//! resting orders.
//!
//! ## Threading
//!
//! All structures are single-writer: every mutation takes `&mut self`. A
//! queue or tracker can be moved to the worker that owns it, but nothing here
//! locks.
//!
//! ## Observability
//!
//! Operations emit `tracing` events. Enable the `metrics` feature to export
//! push, pop, remove and admission counters through the `metrics` facade.

pub mod prelude;
pub mod queue;
mod telemetry;
pub mod tracker;

pub use queue::{
    DEFAULT_INITIAL_CAPACITY, Guid, LevelHeap, Order, OrderMaker, OrderQueue, PriceLevel,
    PriorityQueue, QueueConfig, QueueError, QueueStrategy, SequenceHeap, Side,
};
pub use tracker::{GuidSet, Message, MessageKind, MessageTracker, TrackerError};
