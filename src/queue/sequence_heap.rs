//! Flat sequence-keyed queue strategy.
//!
//! A single binary heap over individual orders. Every push stamps the order
//! with a side-specific sequence number and folds price and sequence into one
//! `i128` key, so a single integer comparison captures both price priority
//! and time priority:
//!
//! ```text
//! raw = (price << 64) + seq
//! key = raw        for BUY,  seq counts down from u64::MAX
//! key = !raw       for SELL, seq counts up from 0
//! ```
//!
//! Within one price an earlier arrival always ends up with the larger key, and
//! the heap is a max-heap on keys for both sides.
//!
//! Orders live in a [`Slab`]; heap entries carry the key and the arena slot,
//! and each arena entry records its current heap position so that removal by
//! identity is O(log n).

use super::contract::OrderQueue;
use super::error::QueueError;
use super::heap::HeapRepair;
use super::order::{Guid, Order, Side};
use crate::telemetry;
use slab::Slab;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    key: i128,
    slot: usize,
}

#[derive(Debug)]
struct Resident {
    order: Order,
    pos: usize,
}

/// Flat heap of orders for one side of the book.
#[derive(Debug)]
pub struct SequenceHeap {
    side: Side,

    /// Next sequence number to hand out.
    seq: u64,

    entries: Vec<HeapEntry>,
    residents: Slab<Resident>,

    /// Arena slot of every resident order, keyed by identity.
    index: HashMap<Guid, usize>,
}

fn initial_sequence(side: Side) -> u64 {
    match side {
        Side::Buy => u64::MAX,
        Side::Sell => 0,
    }
}

fn compose_key(side: Side, price: i64, seq: u64) -> i128 {
    side.orient_key((i128::from(price) << 64) + i128::from(seq))
}

fn key_price(side: Side, key: i128) -> i64 {
    // raw = price * 2^64 + seq with 0 <= seq < 2^64, so the shift floors to price.
    (side.orient_key(key) >> 64) as i64
}

impl SequenceHeap {
    /// Creates an empty queue for `side`.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self::with_capacity(side, 0)
    }

    /// Creates an empty queue with room for `capacity` orders.
    #[must_use]
    pub fn with_capacity(side: Side, capacity: usize) -> Self {
        SequenceHeap {
            side,
            seq: initial_sequence(side),
            entries: Vec::with_capacity(capacity),
            residents: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Starts the sequence counter at `seq` instead of its initial value.
    #[cfg(test)]
    pub(crate) fn with_sequence_start(side: Side, seq: u64) -> Self {
        let mut heap = Self::new(side);
        heap.seq = seq;
        heap
    }

    /// Hands out the next sequence number, re-stamping residents first when
    /// the counter is exhausted.
    fn next_sequence(&mut self) -> u64 {
        loop {
            let advanced = match self.side {
                Side::Buy => self.seq.checked_sub(1),
                Side::Sell => self.seq.checked_add(1),
            };
            if let Some(next) = advanced {
                return std::mem::replace(&mut self.seq, next);
            }
            self.resequence();
        }
    }

    /// Re-stamps every resident in current priority order, starting again
    /// from the side's initial sequence. Relative order is unchanged.
    fn resequence(&mut self) {
        info!(
            "Sequence exhausted on {} queue, re-stamping {} orders",
            self.side,
            self.entries.len()
        );
        // Descending keys form a valid max-heap, and the new stamps keep them descending.
        self.entries.sort_unstable_by(|a, b| b.key.cmp(&a.key));
        self.seq = initial_sequence(self.side);
        for pos in 0..self.entries.len() {
            let stamp = self.seq;
            self.seq = match self.side {
                Side::Buy => stamp - 1,
                Side::Sell => stamp + 1,
            };
            let slot = self.entries[pos].slot;
            let resident = &mut self.residents[slot];
            resident.pos = pos;
            self.entries[pos].key = compose_key(self.side, resident.order.price(), stamp);
        }
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

    /// Removes the entry at heap position `pos` and restores heap order.
    fn remove_at(&mut self, pos: usize) -> Option<Order> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap_slots(pos, last);
        let slot = self.entries.pop()?.slot;
        if pos < self.entries.len() {
            self.repair(pos);
        }
        let order = self.residents.try_remove(slot)?.order;
        let guid = order.guid();
        if self.index.get(&guid) == Some(&slot) {
            self.index.remove(&guid);
        }
        Some(order)
    }
}

impl HeapRepair for SequenceHeap {
    fn heap_len(&self) -> usize {
        self.entries.len()
    }

    fn outranks(&self, a: usize, b: usize) -> bool {
        self.entries[a].key > self.entries[b].key
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        self.residents[self.entries[a].slot].pos = a;
        self.residents[self.entries[b].slot].pos = b;
    }
}

impl OrderQueue for SequenceHeap {
    fn side(&self) -> Side {
        self.side
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, order: Order) {
        self.check_push(&order);
        let seq = self.next_sequence();
        let (guid, price) = (order.guid(), order.price());
        trace!("Pushing {} order {} at {} seq {}", self.side, guid, price, seq);

        let pos = self.entries.len();
        let slot = self.residents.insert(Resident { order, pos });
        self.index.entry(guid).or_insert(slot);
        self.entries.push(HeapEntry {
            key: compose_key(self.side, price, seq),
            slot,
        });
        self.sift_up(pos);
        telemetry::record_push(self.side);
    }

    fn pop(&mut self) -> Option<Order> {
        let order = self.remove_at(0)?;
        trace!("Popped {} order {} at {}", self.side, order.guid(), order.price());
        telemetry::record_pop(self.side);
        Some(order)
    }

    fn peek(&self) -> Option<&Order> {
        let entry = self.entries.first()?;
        self.residents.get(entry.slot).map(|r| &r.order)
    }

    fn reduce_head(&mut self, quantity: u64) -> Option<u64> {
        // Price is unchanged, so the head keeps its key.
        let slot = self.entries.first()?.slot;
        let order = &mut self.residents[slot].order;
        let remaining = order.reduce(quantity);
        trace!(
            "Reduced head {} order {} by {} to {}",
            self.side, order.guid(), quantity, remaining
        );
        if remaining == 0 {
            self.pop();
        }
        Some(remaining)
    }

    fn remove(&mut self, guid: Guid, price: i64) -> Option<Order> {
        let pos = self
            .index
            .get(&guid)
            .map(|&slot| &self.residents[slot])
            .filter(|resident| resident.order.price() == price)
            .map(|resident| resident.pos);
        let Some(pos) = pos else {
            trace!("Remove of {} order {} at {}: not found", self.side, guid, price);
            telemetry::record_remove_miss(self.side);
            return None;
        };
        let order = self.remove_at(pos)?;
        trace!("Removed {} order {} at {}", self.side, guid, price);
        telemetry::record_remove(self.side);
        Some(order)
    }

    fn clear(&mut self) {
        debug!("Clearing {} queue: {} orders", self.side, self.entries.len());
        self.entries.clear();
        self.residents.clear();
        self.index.clear();
        self.seq = initial_sequence(self.side);
    }

    fn validate(&self) -> Result<(), QueueError> {
        if let Some((parent, child)) = self.first_violation() {
            return Err(QueueError::HeapOrderViolated {
                side: self.side,
                parent,
                child,
                parent_key: self.entries[parent].key,
                child_key: self.entries[child].key,
            });
        }
        if self.residents.len() != self.entries.len() {
            return Err(QueueError::SizeMismatch {
                recorded: self.entries.len(),
                counted: self.residents.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        let mut keys = HashSet::with_capacity(self.entries.len());
        for (pos, entry) in self.entries.iter().enumerate() {
            let Some(resident) = self.residents.get(entry.slot) else {
                return Err(QueueError::IndexCorrupted {
                    message: format!("heap position {pos} points at empty slot {}", entry.slot),
                });
            };
            let order = &resident.order;
            let guid = order.guid();
            if resident.pos != pos {
                return Err(QueueError::IndexCorrupted {
                    message: format!("order {guid} at heap position {pos} records {}", resident.pos),
                });
            }
            if key_price(self.side, entry.key) != order.price() {
                return Err(QueueError::IndexCorrupted {
                    message: format!("order {guid} priced {} keyed {}", order.price(), entry.key),
                });
            }
            if !keys.insert(entry.key) {
                return Err(QueueError::IndexCorrupted {
                    message: format!("key {} stamped twice", entry.key),
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
            if self.index.get(&guid) != Some(&entry.slot) {
                return Err(QueueError::IndexCorrupted {
                    message: format!("order {guid} is not indexed at slot {}", entry.slot),
                });
            }
        }
        if self.index.len() != self.entries.len() {
            return Err(QueueError::IndexCorrupted {
                message: format!(
                    "{} identities indexed for {} orders",
                    self.index.len(),
                    self.entries.len()
                ),
            });
        }
        Ok(())
    }
}
