//! Order identity, side and the resting order record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique order identity packing a trader and a trade identifier.
///
/// The layout is `(trader_id as u64) << 32 | trade_id as u64`. Components that
/// persist or compare identities outside this crate rely on that exact layout.
///
/// # Examples
///
/// ```
/// use orderqueue_rs::Guid;
///
/// let guid = Guid::new(7, 3);
/// assert_eq!(guid.as_u64(), (7u64 << 32) | 3);
/// assert_eq!(guid.trader_id(), 7);
/// assert_eq!(guid.trade_id(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(u64);

impl Guid {
    /// Packs `trader_id` into the high word and `trade_id` into the low word.
    #[must_use]
    #[inline]
    pub const fn new(trader_id: u32, trade_id: u32) -> Self {
        Guid(((trader_id as u64) << 32) | trade_id as u64)
    }

    /// Returns the raw 64-bit identity.
    #[must_use]
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the trader component.
    #[must_use]
    #[inline]
    pub const fn trader_id(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns the trade component.
    #[must_use]
    #[inline]
    pub const fn trade_id(self) -> u32 {
        self.0 as u32
    }
}

impl From<u64> for Guid {
    fn from(raw: u64) -> Self {
        Guid(raw)
    }
}

impl From<Guid> for u64 {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.trader_id(), self.trade_id())
    }
}

/// Side of the market a queue or order belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Bids. Higher prices have priority.
    Buy,
    /// Asks. Lower prices have priority.
    Sell,
}

impl Side {
    /// Returns the other side of the market.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Strict price comparator for this side.
    ///
    /// Returns `true` only when `a` has strictly higher priority than `b`:
    /// a higher price for [`Side::Buy`], a lower price for [`Side::Sell`].
    /// Every structural operation and every validator uses this comparator.
    #[must_use]
    #[inline]
    pub fn better(self, a: i64, b: i64) -> bool {
        match self {
            Side::Buy => a > b,
            Side::Sell => a < b,
        }
    }

    /// Orients a raw composite key so that a max-heap serves this side.
    ///
    /// Sell keys are bit-complemented, which reverses the order like a sign
    /// flip but cannot overflow. The mapping is its own inverse.
    #[inline]
    pub(crate) fn orient_key(self, raw: i128) -> i128 {
        match self {
            Side::Buy => raw,
            Side::Sell => !raw,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resting order.
///
/// Identity, price, stock and side are fixed at construction. Only the
/// remaining `amount` changes: through [`Order::reduce`] on an order the
/// matching layer owns, or through `OrderQueue::reduce_head` while it rests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    guid: Guid,
    price: i64,
    amount: u64,
    stock_id: u32,
    side: Side,
}

impl Order {
    /// Creates a new order; the identity is derived from `trader_id` and `trade_id`.
    #[must_use]
    pub fn new(
        price: i64,
        amount: u64,
        trader_id: u32,
        trade_id: u32,
        stock_id: u32,
        side: Side,
    ) -> Self {
        Order {
            guid: Guid::new(trader_id, trade_id),
            price,
            amount,
            stock_id,
            side,
        }
    }

    #[must_use]
    #[inline]
    pub fn guid(&self) -> Guid {
        self.guid
    }

    #[must_use]
    #[inline]
    pub fn trader_id(&self) -> u32 {
        self.guid.trader_id()
    }

    #[must_use]
    #[inline]
    pub fn trade_id(&self) -> u32 {
        self.guid.trade_id()
    }

    #[must_use]
    #[inline]
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Remaining quantity.
    #[must_use]
    #[inline]
    pub fn amount(&self) -> u64 {
        self.amount
    }

    #[must_use]
    #[inline]
    pub fn stock_id(&self) -> u32 {
        self.stock_id
    }

    #[must_use]
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Reduces the remaining amount by `quantity`, saturating at zero, and
    /// returns what is left.
    pub fn reduce(&mut self, quantity: u64) -> u64 {
        self.amount = self.amount.saturating_sub(quantity);
        self.amount
    }

    /// Returns `true` once nothing remains to be traded.
    #[must_use]
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}@{} (stock {})",
            self.side, self.guid, self.amount, self.price, self.stock_id
        )
    }
}
