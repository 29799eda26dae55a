//! Order factory for simulations, benchmarks and tests.

use super::order::{Order, Side};

/// Builds orders with fresh, unique identities.
///
/// Each order gets a new trader id while the trade id stays fixed, so every
/// identity is distinct for the lifetime of one maker. A maker is an ordinary
/// value: create one per test or workload and pass it where it is needed.
///
/// # Examples
///
/// ```
/// use orderqueue_rs::{OrderMaker, Side};
///
/// let mut maker = OrderMaker::new();
/// let a = maker.priced_buy(100);
/// let b = maker.priced_buy(100);
/// assert_ne!(a.guid(), b.guid());
/// assert_eq!(a.side(), Side::Buy);
/// ```
#[derive(Debug, Clone)]
pub struct OrderMaker {
    next_trader_id: u32,
    trade_id: u32,
    stock_id: u32,
    amount: u64,
}

impl Default for OrderMaker {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderMaker {
    /// Maker starting at trader 1, trading stock 1 in lots of 1.
    #[must_use]
    pub fn new() -> Self {
        OrderMaker {
            next_trader_id: 1,
            trade_id: 1,
            stock_id: 1,
            amount: 1,
        }
    }

    /// Uses `stock_id` for every subsequent order.
    #[must_use]
    pub fn with_stock(mut self, stock_id: u32) -> Self {
        self.stock_id = stock_id;
        self
    }

    /// Uses `amount` for every subsequent order.
    #[must_use]
    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// Builds an order at `price` for `side`.
    pub fn priced(&mut self, price: i64, side: Side) -> Order {
        let trader_id = self.next_trader_id;
        self.next_trader_id = self.next_trader_id.wrapping_add(1);
        Order::new(
            price,
            self.amount,
            trader_id,
            self.trade_id,
            self.stock_id,
            side,
        )
    }

    pub fn priced_buy(&mut self, price: i64) -> Order {
        self.priced(price, Side::Buy)
    }

    pub fn priced_sell(&mut self, price: i64) -> Order {
        self.priced(price, Side::Sell)
    }
}
