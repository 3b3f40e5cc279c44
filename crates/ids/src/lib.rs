//! Inventory item identifiers.
//!
//! Every inventory record carries an integer [`ItemId`]. Identifiers are issued by an
//! [`IdGenerator`], which the core service receives by injection so that uniqueness is a property
//! of the generator rather than of wall-clock luck.
//!
//! Two generators are provided:
//! - [`TimestampIdGenerator`]: epoch milliseconds, bumped past the previous id when the clock has
//!   not advanced. This keeps ids readable as creation times.
//! - [`SequentialIdGenerator`]: `1, 2, 3, ...` continuing from the previous id. Used in tests and
//!   anywhere deterministic ids are wanted.
//!
//! Both take the highest id already in use, so a restarted process never reissues an id that
//! exists in the store.

mod generator;

pub use generator::{IdGenerator, SequentialIdGenerator, TimestampIdGenerator};

use std::fmt;
use std::str::FromStr;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Input could not be parsed as an item id
    #[error("Invalid item id: '{0}'")]
    InvalidInput(String),
    /// No id above this one fits in an `i64`
    #[error("No item id left after {0}")]
    Exhausted(ItemId),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;

/// Identifier of a single inventory item.
///
/// Serialises as a bare JSON integer so the on-disk store stays a plain array of objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(i64);

impl ItemId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the id that immediately follows this one.
    ///
    /// # Errors
    ///
    /// `IdError::Exhausted` if this is `i64::MAX`.
    pub fn next(self) -> IdResult<Self> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(IdError::Exhausted(self))
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = IdError;

    /// Parses a decimal id, ignoring surrounding whitespace.
    fn from_str(s: &str) -> IdResult<Self> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| IdError::InvalidInput(s.to_string()))
    }
}
