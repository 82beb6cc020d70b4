//! Strongly-typed identifiers for simulation entities.
//!
//! Springs refer to their endpoints through `PointMassId`s into the
//! cloth's contiguous point-mass store, never through references.

use serde::{Deserialize, Serialize};

/// Index into the point-mass store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointMassId(pub u32);

/// Index into the spring store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpringId(pub u32);

impl PointMassId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl SpringId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PointMassId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for SpringId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
