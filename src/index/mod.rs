//! Ordered in-memory index for gatorlib
//!
//! A red-black tree keyed by integer identifiers. Nodes live in an arena
//! and refer to each other by slot index; the shared sentinel is slot 0 of
//! each tree, so independent trees never share state.
//!
//! # Invariants
//!
//! - Root and sentinel are black
//! - No red node has a red child
//! - Every root-to-sentinel path carries the same number of black nodes
//! - The color-flip counter never decreases

mod errors;
mod node;
mod tree;

pub use errors::{IndexError, IndexErrorCode, IndexResult};
pub use node::Color;
pub use tree::{Key, Neighbors, Range, RedBlackTree};
