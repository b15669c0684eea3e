#![forbid(unsafe_code)]

//! Graph container APIs used by `strata`.
//!
//! A [`Subgraph`] is a dense arena of nodes and edges drawn from the full assembly graph for the
//! currently visible window. Node and edge identities are arena slots ([`NodeId`], [`EdgeId`]),
//! which keeps lookups O(1) and lets layout passes keep side tables in plain `Vec`s.

mod graph;

pub use graph::edge::{Edge, EdgeKind};
pub use graph::ids::{EdgeId, NodeId};
pub use graph::node::{
    AggregateData, DummyData, HasLength, HasMetadata, MIN_LENGTH, Node, NodeKind, SegmentData,
};
pub use graph::Subgraph;
