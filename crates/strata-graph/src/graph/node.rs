//! Node variants and the capability traits they implement.
//!
//! Only segments and aggregates carry assembly metadata. Dummy and fill nodes exist for the
//! duration of a single layout pass and expose nothing beyond their (zero) length and, for dummy
//! nodes, the edge they are routing.

use super::ids::{EdgeId, NodeId};

/// Shortest length, in pixels, a sequence node is drawn with.
pub const MIN_LENGTH: u32 = 10;

pub trait HasLength {
    fn length(&self) -> u32;
}

pub trait HasMetadata {
    fn name(&self) -> &str;
    fn sequence_length(&self) -> u64;
    /// Ids of the genomes passing through this node, sorted and deduplicated.
    fn genomes(&self) -> &[u32];
}

fn clamp_length(sequence_length: u64) -> u32 {
    u32::try_from(sequence_length)
        .unwrap_or(u32::MAX)
        .max(MIN_LENGTH)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentData {
    pub segment_id: u32,
    pub name: String,
    pub sequence_length: u64,
    pub genomes: Vec<u32>,
}

impl SegmentData {
    pub fn new(segment_id: u32, name: impl Into<String>, sequence_length: u64) -> Self {
        Self {
            segment_id,
            name: name.into(),
            sequence_length,
            genomes: Vec::new(),
        }
    }

    pub fn with_genomes(mut self, mut genomes: Vec<u32>) -> Self {
        genomes.sort_unstable();
        genomes.dedup();
        self.genomes = genomes;
        self
    }
}

impl HasLength for SegmentData {
    fn length(&self) -> u32 {
        clamp_length(self.sequence_length)
    }
}

impl HasMetadata for SegmentData {
    fn name(&self) -> &str {
        &self.name
    }

    fn sequence_length(&self) -> u64 {
        self.sequence_length
    }

    fn genomes(&self) -> &[u32] {
        &self.genomes
    }
}

/// A routing placeholder for an edge that skips one or more layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DummyData {
    /// Where the diverted edge really starts.
    pub source: NodeId,
    /// Where the diverted edge really ends.
    pub destination: NodeId,
    pub original: EdgeId,
}

impl HasLength for DummyData {
    fn length(&self) -> u32 {
        0
    }
}

/// Several segments collapsed into one node for zoomed-out views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateData {
    members: Vec<SegmentData>,
    name: String,
    sequence_length: u64,
    genomes: Vec<u32>,
}

impl AggregateData {
    pub fn new(members: Vec<SegmentData>) -> Self {
        let name = members
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let sequence_length = members
            .iter()
            .fold(0u64, |acc, m| acc.saturating_add(m.sequence_length));
        let mut genomes: Vec<u32> = members.iter().flat_map(|m| m.genomes.iter().copied()).collect();
        genomes.sort_unstable();
        genomes.dedup();
        Self {
            members,
            name,
            sequence_length,
            genomes,
        }
    }

    pub fn members(&self) -> &[SegmentData] {
        &self.members
    }
}

impl HasLength for AggregateData {
    fn length(&self) -> u32 {
        self.members
            .iter()
            .map(HasLength::length)
            .max()
            .unwrap_or(MIN_LENGTH)
    }
}

impl HasMetadata for AggregateData {
    fn name(&self) -> &str {
        &self.name
    }

    fn sequence_length(&self) -> u64 {
        self.sequence_length
    }

    fn genomes(&self) -> &[u32] {
        &self.genomes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Segment(SegmentData),
    Dummy(DummyData),
    Fill,
    Aggregate(AggregateData),
}

impl HasLength for NodeKind {
    fn length(&self) -> u32 {
        match self {
            NodeKind::Segment(s) => s.length(),
            NodeKind::Dummy(d) => d.length(),
            NodeKind::Fill => 0,
            NodeKind::Aggregate(a) => a.length(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    pub(crate) length: u32,
    pub(crate) incoming: Vec<EdgeId>,
    pub(crate) outgoing: Vec<EdgeId>,
    /// Pixel offset along the layout axis; `None` until positioned.
    pub x_position: Option<i64>,
    /// Row index within the node's first layer; `None` until a layout completes.
    pub y_position: Option<usize>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        let length = kind.length();
        Self {
            id,
            kind,
            length,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            x_position: None,
            y_position: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Incoming edges in insertion order.
    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    /// Outgoing edges in insertion order.
    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    pub fn as_dummy(&self) -> Option<&DummyData> {
        match &self.kind {
            NodeKind::Dummy(d) => Some(d),
            _ => None,
        }
    }

    pub fn metadata(&self) -> Option<&dyn HasMetadata> {
        match &self.kind {
            NodeKind::Segment(s) => Some(s),
            NodeKind::Aggregate(a) => Some(a),
            NodeKind::Dummy(_) | NodeKind::Fill => None,
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, NodeKind::Dummy(_))
    }

    pub fn is_fill(&self) -> bool {
        matches!(self.kind, NodeKind::Fill)
    }

    /// Dummy and fill nodes only live for one layout pass.
    pub fn is_transient(&self) -> bool {
        self.is_dummy() || self.is_fill()
    }
}

impl HasLength for Node {
    fn length(&self) -> u32 {
        self.length
    }
}
