/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Prelude module that re-exports commonly used types and traits.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use orderqueue_rs::prelude::*;
//! ```
//!
//! This imports everything needed to build queues and admit messages.

// Queue contract and strategies
pub use crate::queue::{LevelHeap, OrderQueue, PriorityQueue, QueueStrategy, SequenceHeap};

// Orders and identities
pub use crate::queue::{Guid, Order, OrderMaker, PriceLevel, Side};

// Configuration
pub use crate::queue::{DEFAULT_INITIAL_CAPACITY, QueueConfig};

// Message deduplication
pub use crate::tracker::{GuidSet, Message, MessageKind, MessageTracker};

// Errors
pub use crate::queue::QueueError;
pub use crate::tracker::TrackerError;
