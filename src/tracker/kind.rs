//! Message kinds and the admission key carried by every inbound message.

use crate::queue::order::Guid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of inbound message kinds.
///
/// Each kind is its own deduplication namespace: the same trader and trade
/// ids may be admitted once per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MessageKind {
    /// A new order to rest in the book.
    NewOrder = 0,
    /// Request to cancel a resting order.
    Cancel = 1,
    /// Request to change a resting order.
    Amend = 2,
    /// An order was partially filled.
    PartialFill = 3,
    /// An order was completely filled.
    Fill = 4,
    /// A cancel request succeeded.
    Cancelled = 5,
    /// A cancel request found nothing to cancel.
    NotCancelled = 6,
    /// An order or request was rejected.
    Rejected = 7,
}

impl MessageKind {
    /// Number of kinds.
    pub const COUNT: usize = 8;

    /// Every kind, in discriminant order.
    pub const ALL: [MessageKind; MessageKind::COUNT] = [
        MessageKind::NewOrder,
        MessageKind::Cancel,
        MessageKind::Amend,
        MessageKind::PartialFill,
        MessageKind::Fill,
        MessageKind::Cancelled,
        MessageKind::NotCancelled,
        MessageKind::Rejected,
    ];

    /// Dense index in `0..COUNT`.
    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::NewOrder => "new_order",
            MessageKind::Cancel => "cancel",
            MessageKind::Amend => "amend",
            MessageKind::PartialFill => "partial_fill",
            MessageKind::Fill => "fill",
            MessageKind::Cancelled => "cancelled",
            MessageKind::NotCancelled => "not_cancelled",
            MessageKind::Rejected => "rejected",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of an inbound message that decides whether it was seen before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub trader_id: u32,
    pub trade_id: u32,
}

impl Message {
    #[must_use]
    pub fn new(kind: MessageKind, trader_id: u32, trade_id: u32) -> Self {
        Message {
            kind,
            trader_id,
            trade_id,
        }
    }

    /// Identity of the order this message refers to.
    #[must_use]
    #[inline]
    pub fn guid(&self) -> Guid {
        Guid::new(self.trader_id, self.trade_id)
    }
}
