//! Level+FIFO queue strategy.
//!
//! The heap is ordered over distinct prices only. Each heap element is a
//! [`PriceLevel`] whose FIFO carries time priority, so push, pop and remove
//! cost O(log L) heap work (L distinct prices) plus O(1) list work. This is
//! the better fit when many orders share few prices.

use super::contract::OrderQueue;
use super::error::QueueError;
use super::heap::HeapRepair;
use super::level::{OrderNode, PriceLevel};
use super::order::{Guid, Order, Side};
use crate::telemetry;
use slab::Slab;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace, warn};

/// Heap of price levels for one side of the book.
#[derive(Debug)]
pub struct LevelHeap {
    side: Side,

    /// Binary heap of levels ordered by the side's price preference.
    levels: Vec<PriceLevel>,

    /// Heap index of every level, keyed by price.
    positions: HashMap<i64, usize>,

    /// Arena owning every resident order and its FIFO links.
    orders: Slab<OrderNode>,

    /// Arena slot of every resident order, keyed by identity.
    index: HashMap<Guid, usize>,
}

impl LevelHeap {
    /// Creates an empty queue for `side`.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self::with_capacity(side, 0)
    }

    /// Creates an empty queue with arena room for `capacity` orders.
    #[must_use]
    pub fn with_capacity(side: Side, capacity: usize) -> Self {
        LevelHeap {
            side,
            levels: Vec::new(),
            positions: HashMap::new(),
            orders: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Number of distinct price levels.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Best resting price, if any.
    #[must_use]
    pub fn best_price(&self) -> Option<i64> {
        self.levels.first().map(PriceLevel::price)
    }

    /// The level resting at `price`, if one exists.
    #[must_use]
    pub fn level(&self, price: i64) -> Option<&PriceLevel> {
        self.positions.get(&price).map(|&i| &self.levels[i])
    }

    /// Orders resting at `price`, oldest first.
    pub fn orders_at(&self, price: i64) -> impl Iterator<Item = &Order> + '_ {
        self.level(price)
            .into_iter()
            .flat_map(move |level| level.iter(&self.orders).map(|(_, order)| order))
    }

    fn check_push(&self, order: &Order) {
        let guid = order.guid();
        debug_assert_eq!(
            order.side(),
            self.side,
            "order {guid} pushed onto the {} queue",
            self.side
        );
        debug_assert!(
            !self.index.contains_key(&guid),
            "order {guid} is already resident"
        );
        if order.side() != self.side {
            warn!("Order {} for {} pushed onto {} queue", guid, order.side(), self.side);
        }
        if self.index.contains_key(&guid) {
            warn!("Order {} pushed while already resident", guid);
        }
    }

    /// Frees an arena slot and forgets its identity.
    fn release(&mut self, slot: usize) -> Order {
        let order = self.orders.remove(slot).order;
        let guid = order.guid();
        if self.index.get(&guid) == Some(&slot) {
            self.index.remove(&guid);
        }
        order
    }

    /// Takes the level at heap index `i` out of the heap and restores order.
    fn retire_level(&mut self, i: usize) {
        let last = self.levels.len() - 1;
        self.swap_slots(i, last);
        if let Some(level) = self.levels.pop() {
            self.positions.remove(&level.price());
            debug!("Retired {} price level {}", self.side, level.price());
        }
        if i < self.levels.len() {
            self.repair(i);
        }
    }
}

impl HeapRepair for LevelHeap {
    fn heap_len(&self) -> usize {
        self.levels.len()
    }

    fn outranks(&self, a: usize, b: usize) -> bool {
        self.side
            .better(self.levels[a].price(), self.levels[b].price())
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.levels.swap(a, b);
        self.positions.insert(self.levels[a].price(), a);
        self.positions.insert(self.levels[b].price(), b);
    }
}

impl OrderQueue for LevelHeap {
    fn side(&self) -> Side {
        self.side
    }

    fn len(&self) -> usize {
        self.orders.len()
    }

    fn push(&mut self, order: Order) {
        self.check_push(&order);
        let (guid, price) = (order.guid(), order.price());
        trace!("Pushing {} order {} at {}", self.side, guid, price);

        let slot = self.orders.insert(OrderNode::new(order));
        self.index.entry(guid).or_insert(slot);

        match self.positions.get(&price).copied() {
            Some(i) => self.levels[i].append(&mut self.orders, slot),
            None => {
                let mut level = PriceLevel::new(price);
                level.append(&mut self.orders, slot);
                let i = self.levels.len();
                self.levels.push(level);
                self.positions.insert(price, i);
                self.sift_up(i);
                debug!("Created {} price level {}", self.side, price);
            }
        }
        telemetry::record_push(self.side);
    }

    fn pop(&mut self) -> Option<Order> {
        let slot = self.levels.first_mut()?.pop_front(&mut self.orders)?;
        if self.levels[0].is_empty() {
            self.retire_level(0);
        }
        let order = self.release(slot);
        trace!("Popped {} order {} at {}", self.side, order.guid(), order.price());
        telemetry::record_pop(self.side);
        Some(order)
    }

    fn peek(&self) -> Option<&Order> {
        let slot = self.levels.first()?.front()?;
        self.orders.get(slot).map(|node| &node.order)
    }

    fn reduce_head(&mut self, quantity: u64) -> Option<u64> {
        let level = self.levels.first_mut()?;
        let slot = level.front()?;
        let remaining = level.reduce(&mut self.orders, slot, quantity);
        trace!(
            "Reduced head {} order {} by {} to {}",
            self.side, self.orders[slot].order.guid(), quantity, remaining
        );
        if remaining == 0 {
            self.pop();
        }
        Some(remaining)
    }

    fn remove(&mut self, guid: Guid, price: i64) -> Option<Order> {
        let located = self
            .index
            .get(&guid)
            .copied()
            .filter(|&slot| self.orders[slot].order.price() == price)
            .zip(self.positions.get(&price).copied());
        let Some((slot, i)) = located else {
            trace!("Remove of {} order {} at {}: not found", self.side, guid, price);
            telemetry::record_remove_miss(self.side);
            return None;
        };

        self.levels[i].unlink(&mut self.orders, slot);
        if self.levels[i].is_empty() {
            self.retire_level(i);
        }
        let order = self.release(slot);
        trace!("Removed {} order {} at {}", self.side, guid, price);
        telemetry::record_remove(self.side);
        Some(order)
    }

    fn clear(&mut self) {
        debug!(
            "Clearing {} queue: {} orders across {} levels",
            self.side,
            self.orders.len(),
            self.levels.len()
        );
        self.levels.clear();
        self.positions.clear();
        self.orders.clear();
        self.index.clear();
    }

    fn validate(&self) -> Result<(), QueueError> {
        if let Some((parent, child)) = self.first_violation() {
            return Err(QueueError::HeapOrderViolated {
                side: self.side,
                parent,
                child,
                parent_key: i128::from(self.levels[parent].price()),
                child_key: i128::from(self.levels[child].price()),
            });
        }
        if self.positions.len() != self.levels.len() {
            return Err(QueueError::IndexCorrupted {
                message: format!(
                    "{} price positions for {} levels",
                    self.positions.len(),
                    self.levels.len()
                ),
            });
        }

        let mut seen = HashSet::with_capacity(self.orders.len());
        let mut counted = 0usize;
        for (i, level) in self.levels.iter().enumerate() {
            let price = level.price();
            if self.positions.get(&price) != Some(&i) {
                return Err(QueueError::IndexCorrupted {
                    message: format!("level {price} is at heap index {i} but indexed elsewhere"),
                });
            }
            if level.is_empty() {
                return Err(QueueError::EmptyPriceLevel { price });
            }

            let mut in_level = 0usize;
            let mut amount = 0u64;
            let mut last = None;
            for (slot, order) in level.iter(&self.orders) {
                let guid = order.guid();
                if order.price() != price {
                    return Err(QueueError::MixedPriceLevel {
                        level_price: price,
                        guid,
                        order_price: order.price(),
                    });
                }
                if order.side() != self.side {
                    return Err(QueueError::WrongSide {
                        side: self.side,
                        guid,
                    });
                }
                if !seen.insert(guid) {
                    return Err(QueueError::DuplicateGuid(guid));
                }
                if self.index.get(&guid) != Some(&slot) {
                    return Err(QueueError::IndexCorrupted {
                        message: format!("order {guid} is not indexed at slot {slot}"),
                    });
                }
                in_level += 1;
                amount = amount.saturating_add(order.amount());
                last = Some(slot);
            }
            if in_level != level.order_count() || last != level.back() {
                return Err(QueueError::IndexCorrupted {
                    message: format!(
                        "level {price} links reach {in_level} of {} orders",
                        level.order_count()
                    ),
                });
            }
            if amount != level.total_amount() {
                return Err(QueueError::IndexCorrupted {
                    message: format!(
                        "level {price} totals {} but orders sum to {amount}",
                        level.total_amount()
                    ),
                });
            }
            counted += in_level;
        }

        if counted != self.orders.len() {
            return Err(QueueError::SizeMismatch {
                recorded: self.orders.len(),
                counted,
            });
        }
        if self.index.len() != counted {
            return Err(QueueError::IndexCorrupted {
                message: format!("{} identities indexed for {counted} orders", self.index.len()),
            });
        }
        Ok(())
    }
}
