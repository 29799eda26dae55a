//! Queue construction settings.

use super::contract::{PriorityQueue, QueueStrategy};
use super::error::QueueError;
use super::order::Side;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of orders a new queue reserves room for.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Settings used to build [`PriorityQueue`]s.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
///
/// # Examples
///
/// ```
/// use orderqueue_rs::{OrderQueue, QueueConfig, QueueStrategy, Side};
///
/// let config = QueueConfig::from_json(r#"{ "strategy": "sequence_heap" }"#).unwrap();
/// assert_eq!(config.strategy, QueueStrategy::SequenceHeap);
///
/// let asks = config.build(Side::Sell);
/// assert_eq!(asks.side(), Side::Sell);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Backing strategy.
    pub strategy: QueueStrategy,
    /// Orders to reserve room for up front.
    pub initial_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig {
            strategy: QueueStrategy::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl QueueConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    /// Returns [`QueueError::InvalidConfig`] when the text is not valid JSON or
    /// names an unknown strategy.
    pub fn from_json(text: &str) -> Result<Self, QueueError> {
        let config: QueueConfig = serde_json::from_str(text)?;
        debug!(
            "Loaded queue config: strategy {} capacity {}",
            config.strategy, config.initial_capacity
        );
        Ok(config)
    }

    /// Serializes the configuration to JSON.
    ///
    /// # Errors
    /// Returns [`QueueError::InvalidConfig`] if serialization fails.
    pub fn to_json(&self) -> Result<String, QueueError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Builds an empty queue for `side`.
    #[must_use]
    pub fn build(&self, side: Side) -> PriorityQueue {
        PriorityQueue::with_capacity(side, self.strategy, self.initial_capacity)
    }

    /// Builds the `(bids, asks)` pair for one instrument.
    #[must_use]
    pub fn build_book(&self) -> (PriorityQueue, PriorityQueue) {
        (self.build(Side::Buy), self.build(Side::Sell))
    }
}
