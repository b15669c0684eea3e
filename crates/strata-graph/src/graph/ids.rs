//! Dense arena identities.

use serde::Serialize;
use std::fmt;

/// Index of a node in its [`Subgraph`](crate::Subgraph) arena.
///
/// The graph source is always `NodeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const SOURCE: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(ix: usize) -> Self {
        Self(u32::try_from(ix).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Index of an edge in its [`Subgraph`](crate::Subgraph) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(ix: usize) -> Self {
        Self(u32::try_from(ix).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}
