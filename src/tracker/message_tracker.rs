//! Per-kind deduplication of inbound messages.

use super::error::TrackerError;
use super::guid_set::GuidSet;
use super::kind::{Message, MessageKind};
use crate::queue::order::Guid;
use crate::telemetry;
use tracing::{debug, trace};

/// Remembers which `(kind, trader, trade)` triples have been admitted.
///
/// Each [`MessageKind`] owns an independent [`GuidSet`], created the first
/// time that kind is seen. Sets only grow; there is no expiry.
///
/// # Examples
///
/// ```
/// use orderqueue_rs::{MessageKind, MessageTracker};
///
/// let mut tracker = MessageTracker::new();
/// assert!(tracker.admit(MessageKind::NewOrder, 7, 3));
/// assert!(!tracker.admit(MessageKind::NewOrder, 7, 3));
/// assert!(tracker.admit(MessageKind::Cancel, 7, 3));
/// ```
#[derive(Debug, Clone)]
pub struct MessageTracker {
    sets: [Option<GuidSet>; MessageKind::COUNT],
}

impl Default for MessageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageTracker {
    #[must_use]
    pub fn new() -> Self {
        MessageTracker {
            sets: std::array::from_fn(|_| None),
        }
    }

    /// Records the message identity under `kind`.
    ///
    /// Returns `true` the first time a triple is seen and `false` for every
    /// repeat. A rejected repeat leaves the tracker unchanged.
    pub fn admit(&mut self, kind: MessageKind, trader_id: u32, trade_id: u32) -> bool {
        let guid = Guid::new(trader_id, trade_id);
        let set = self.sets[kind.index()].get_or_insert_with(|| {
            debug!("Creating tracker set for {}", kind);
            GuidSet::new()
        });
        let admitted = set.insert(guid);
        if admitted {
            trace!("Admitted {} message {}", kind, guid);
        } else {
            trace!("Duplicate {} message {}", kind, guid);
        }
        telemetry::record_admission(kind, admitted);
        admitted
    }

    pub fn admit_message(&mut self, message: &Message) -> bool {
        self.admit(message.kind, message.trader_id, message.trade_id)
    }

    /// Returns `true` if the triple was admitted before. Never records.
    #[must_use]
    pub fn is_admitted(&self, kind: MessageKind, trader_id: u32, trade_id: u32) -> bool {
        self.set(kind)
            .is_some_and(|set| set.contains(Guid::new(trader_id, trade_id)))
    }

    /// Admitted messages across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.iter().flatten().map(GuidSet::len).sum()
    }

    #[must_use]
    pub fn len_for(&self, kind: MessageKind) -> usize {
        self.set(kind).map_or(0, GuidSet::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.iter().flatten().all(GuidSet::is_empty)
    }

    /// Identities admitted under `kind`, ascending.
    pub fn admitted(&self, kind: MessageKind) -> impl Iterator<Item = Guid> + '_ {
        self.set(kind).into_iter().flat_map(GuidSet::iter)
    }

    #[must_use]
    #[inline]
    pub fn set(&self, kind: MessageKind) -> Option<&GuidSet> {
        self.sets[kind.index()].as_ref()
    }

    /// Validates every per-kind set.
    ///
    /// # Errors
    /// Returns [`TrackerError::InKind`] wrapping the first violation found.
    pub fn validate(&self) -> Result<(), TrackerError> {
        for kind in MessageKind::ALL {
            if let Some(set) = self.set(kind) {
                set.validate().map_err(|source| TrackerError::InKind {
                    kind,
                    source: Box::new(source),
                })?;
            }
        }
        Ok(())
    }
}
