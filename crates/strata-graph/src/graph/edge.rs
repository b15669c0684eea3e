//! Edge records.

use super::ids::{EdgeId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// An edge of the assembly graph.
    Real,
    /// One hop of a dummy chain standing in for `original` while a layout pass runs.
    Dummy { original: EdgeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub(crate) id: EdgeId,
    pub(crate) from: NodeId,
    pub(crate) to: NodeId,
    pub(crate) kind: EdgeKind,
    pub(crate) retired: bool,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// The edge this one replaces, if it is part of a dummy chain.
    pub fn original(&self) -> Option<EdgeId> {
        match self.kind {
            EdgeKind::Real => None,
            EdgeKind::Dummy { original } => Some(original),
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, EdgeKind::Dummy { .. })
    }

    /// Retired edges are unlinked from their endpoints but still resolvable by id.
    pub fn is_retired(&self) -> bool {
        self.retired
    }
}
