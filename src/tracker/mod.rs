//! Deduplication of inbound messages by kind and order identity.

pub mod error;
pub mod guid_set;
pub mod kind;
pub mod message_tracker;

pub use error::TrackerError;
pub use guid_set::GuidSet;
pub use kind::{Message, MessageKind};
pub use message_tracker::MessageTracker;
