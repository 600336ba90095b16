//! Index error types
//!
//! Error codes:
//! - GATOR_INDEX_ROOT_NOT_BLACK
//! - GATOR_INDEX_SENTINEL_NOT_BLACK
//! - GATOR_INDEX_RED_RED
//! - GATOR_INDEX_BLACK_HEIGHT
//! - GATOR_INDEX_ORDER
//! - GATOR_INDEX_PARENT_LINK
//! - GATOR_INDEX_COUNT
//!
//! These are only produced by structural validation. Normal tree operations
//! never fail.

use std::fmt;

use super::tree::Key;

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// Root node is red
    RootNotBlack,
    /// The shared sentinel was recolored
    SentinelNotBlack,
    /// A red node has a red child
    RedRed,
    /// Two sentinel paths disagree on black count
    BlackHeight,
    /// In-order keys are not strictly increasing
    Order,
    /// A child does not point back at its parent
    ParentLink,
    /// Reachable node count disagrees with the tree length
    Count,
}

impl IndexErrorCode {
    /// Returns the stable code string
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::RootNotBlack => "GATOR_INDEX_ROOT_NOT_BLACK",
            IndexErrorCode::SentinelNotBlack => "GATOR_INDEX_SENTINEL_NOT_BLACK",
            IndexErrorCode::RedRed => "GATOR_INDEX_RED_RED",
            IndexErrorCode::BlackHeight => "GATOR_INDEX_BLACK_HEIGHT",
            IndexErrorCode::Order => "GATOR_INDEX_ORDER",
            IndexErrorCode::ParentLink => "GATOR_INDEX_PARENT_LINK",
            IndexErrorCode::Count => "GATOR_INDEX_COUNT",
        }
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Structural violation found by `RedBlackTree::validate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexError {
    code: IndexErrorCode,
    message: String,
    key: Option<Key>,
}

impl IndexError {
    /// Create a violation anchored at a specific key
    pub fn at_key(code: IndexErrorCode, key: Key, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            key: Some(key),
        }
    }

    /// Create a violation that is not tied to one node
    pub fn tree_wide(code: IndexErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            key: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Key of the offending node, if any
    pub fn key(&self) -> Option<Key> {
        self.key
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(key) = self.key {
            write!(f, " (key {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for IndexError {}

/// Result type for index validation
pub type IndexResult<T> = Result<T, IndexError>;
