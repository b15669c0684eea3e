//! The [`Subgraph`] arena.

pub(crate) mod edge;
pub(crate) mod ids;
pub(crate) mod node;

use edge::{Edge, EdgeKind};
use ids::{EdgeId, NodeId};
use node::{AggregateData, DummyData, Node, NodeKind, SegmentData};

/// Nodes and edges of one visible window.
///
/// Edges are never physically removed while a layout pass runs: [`Subgraph::retire_edge`]
/// unlinks an edge from its endpoints but keeps the record so dummy edges can still resolve the
/// edge they replace.
#[derive(Debug, Clone, Default)]
pub struct Subgraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Subgraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(id, kind));
        id
    }

    pub fn add_segment(&mut self, data: SegmentData) -> NodeId {
        self.add_node(NodeKind::Segment(data))
    }

    pub fn add_aggregate(&mut self, data: AggregateData) -> NodeId {
        self.add_node(NodeKind::Aggregate(data))
    }

    pub fn add_dummy(&mut self, data: DummyData) -> NodeId {
        self.add_node(NodeKind::Dummy(data))
    }

    pub fn add_fill(&mut self) -> NodeId {
        self.add_node(NodeKind::Fill)
    }

    /// Adds an assembly edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a node of this subgraph.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> EdgeId {
        self.push_edge(from, to, EdgeKind::Real)
    }

    /// Adds one hop of a dummy chain standing in for `original`.
    pub fn add_dummy_edge(&mut self, from: NodeId, to: NodeId, original: EdgeId) -> EdgeId {
        self.push_edge(from, to, EdgeKind::Dummy { original })
    }

    fn push_edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) -> EdgeId {
        assert!(
            self.contains(from) && self.contains(to),
            "edge {from} -> {to} has an endpoint outside the subgraph"
        );
        let id = EdgeId::from_index(self.edges.len());
        self.edges.push(Edge {
            id,
            from,
            to,
            kind,
            retired: false,
        });
        self.nodes[from.index()].outgoing.push(id);
        self.nodes[to.index()].incoming.push(id);
        id
    }

    /// Unlinks `id` from its endpoints. Returns `false` if it was unknown or already retired.
    pub fn retire_edge(&mut self, id: EdgeId) -> bool {
        let Some(edge) = self.edges.get_mut(id.index()) else {
            return false;
        };
        if edge.retired {
            return false;
        }
        edge.retired = true;
        let (from, to) = (edge.from, edge.to);
        self.nodes[from.index()].outgoing.retain(|e| *e != id);
        self.nodes[to.index()].incoming.retain(|e| *e != id);
        true
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Any edge ever added, retired or not.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// Live (non-retired) edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| !e.retired)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn source(&self) -> Option<NodeId> {
        self.contains(NodeId::SOURCE).then_some(NodeId::SOURCE)
    }

    pub fn in_edges(&self, id: NodeId) -> &[EdgeId] {
        self.node(id).map(|n| n.incoming.as_slice()).unwrap_or(&[])
    }

    pub fn out_edges(&self, id: NodeId) -> &[EdgeId] {
        self.node(id).map(|n| n.outgoing.as_slice()).unwrap_or(&[])
    }

    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.in_edges(id)
            .iter()
            .map(move |e| self.edges[e.index()].from)
    }

    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(id).iter().map(move |e| self.edges[e.index()].to)
    }

    pub fn clear_positions(&mut self) {
        for n in &mut self.nodes {
            n.x_position = None;
            n.y_position = None;
        }
    }

    /// Drops everything a layout pass added: dummy edges are removed, retired assembly edges are
    /// re-linked, and trailing dummy/fill nodes are truncated away.
    ///
    /// Transient nodes that are followed by real nodes cannot be removed without renumbering;
    /// they are left in place but edgeless.
    pub fn discard_transient(&mut self) {
        let keep_edges = self
            .edges
            .iter()
            .rposition(|e| !e.is_dummy())
            .map_or(0, |ix| ix + 1);
        self.edges.truncate(keep_edges);

        let keep_nodes = self
            .nodes
            .iter()
            .rposition(|n| !n.is_transient())
            .map_or(0, |ix| ix + 1);
        self.nodes.truncate(keep_nodes);

        for n in &mut self.nodes {
            n.incoming.clear();
            n.outgoing.clear();
        }
        let node_count = self.nodes.len();
        for e in &mut self.edges {
            e.retired =
                e.is_dummy() || e.from.index() >= node_count || e.to.index() >= node_count;
            if e.retired {
                continue;
            }
            self.nodes[e.from.index()].outgoing.push(e.id);
            self.nodes[e.to.index()].incoming.push(e.id);
        }
    }
}
