//! Arena node layout for the red-black tree.
//!
//! Links are slot indices into the owning tree's arena. Slot 0 is the
//! sentinel: always black, never holds a payload, terminates every leaf path.

use std::fmt;

use super::tree::Key;

/// Arena slot index
pub(crate) type NodeId = usize;

/// The sentinel slot
pub(crate) const NIL: NodeId = 0;

/// Node color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    pub(crate) key: Key,
    pub(crate) color: Color,
    /// Non-owning back-link, NIL at the root
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    /// None for the sentinel and for recycled slots
    pub(crate) value: Option<V>,
}

impl<V> Node<V> {
    pub(crate) fn sentinel() -> Self {
        Self {
            key: 0,
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
            value: None,
        }
    }

    /// A fresh red leaf hanging below `parent`
    pub(crate) fn leaf(key: Key, value: V, parent: NodeId) -> Self {
        Self {
            key,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
            value: Some(value),
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.value.is_some()
    }
}
