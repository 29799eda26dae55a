//! Message tracker error types

use super::kind::MessageKind;
use crate::queue::order::Guid;
use thiserror::Error;

/// Structural violations found by the tracker validators.
///
/// Admission itself never fails; a duplicate is reported as `false`. These
/// variants only describe a corrupted red-black tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TrackerError {
    /// The root node is red.
    #[error("root node is red")]
    RedRoot,

    /// A node has a red right child, which a left-leaning tree forbids.
    #[error("node {guid} has a red right link")]
    RedRightLink {
        /// Key of the parent node.
        guid: Guid,
    },

    /// A red node has a red left child.
    #[error("red node {guid} has a red child")]
    ConsecutiveRed {
        /// Key of the parent node.
        guid: Guid,
    },

    /// The two subtrees of a node have different black heights.
    #[error("black height differs under {guid}: left {left}, right {right}")]
    BlackHeightMismatch {
        /// Key of the node.
        guid: Guid,
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// A key sits outside the range its ancestors allow.
    #[error("key {guid} breaks search tree ordering")]
    OrderViolated {
        /// Misplaced key.
        guid: Guid,
    },

    /// A link points outside the node arena.
    #[error("link to missing node {node}")]
    DanglingLink {
        /// Arena index the link points to.
        node: usize,
    },

    /// Reachable nodes disagree with the arena size.
    #[error("size mismatch: recorded {recorded}, reachable {counted}")]
    SizeMismatch {
        /// Nodes in the arena.
        recorded: usize,
        /// Nodes reachable from the root.
        counted: usize,
    },

    /// A violation inside the set for one message kind.
    #[error("{kind} set: {source}")]
    InKind {
        /// Kind whose set is broken.
        kind: MessageKind,
        /// The underlying violation.
        #[source]
        source: Box<TrackerError>,
    },
}
