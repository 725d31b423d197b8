//! Edge key types.
//!
//! The store allows at most one edge per unordered vertex pair, whatever its direction, so
//! edges are keyed by the pair with its endpoints sorted.

use super::VertexId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey {
    lo: VertexId,
    hi: VertexId,
}

impl EdgeKey {
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Endpoints in ascending identifier order.
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.lo, self.hi)
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}
