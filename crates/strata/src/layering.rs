//! Layer assignment.
//!
//! Quantizes horizontal positions into fixed-width bands and materializes routing placeholders:
//! every edge that skips one or more layers is retired and replaced by a chain of dummy nodes, one
//! per skipped layer, so crossing reduction and the renderer can treat long edges as chains of
//! layer-adjacent hops.
//!
//! Slot order inside a layer is first-fit by node scan order; the crossing reducer and edge
//! optimizer refine it afterwards. A node spanning several layers takes the same slot index in
//! each of them, and the later passes keep it that way.

use crate::cancel::CancellationToken;
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::util::ceil_div;
use serde::Serialize;
use std::ops::Range;
use strata_graph::{DummyData, EdgeId, HasLength, NodeId, Subgraph};

/// A dense, pre-sized array of node slots. `None` entries are unfilled capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Layer {
    pub(crate) slots: Vec<Option<NodeId>>,
}

impl Layer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn from_slots(slots: Vec<Option<NodeId>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<NodeId>] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<NodeId> {
        self.slots.get(slot).copied().flatten()
    }

    /// Occupied slots, in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(node))
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.position(node).is_some()
    }

    fn insert_first_open(&mut self, node: NodeId) -> Option<usize> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(node);
        Some(slot)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Layering {
    pub(crate) layers: Vec<Layer>,
    pub(crate) origin: i64,
    pub(crate) dummy_chains: Vec<NodeId>,
}

impl Layering {
    /// Wraps externally built layers; no dummy chains are recorded.
    pub fn from_layers(layers: Vec<Layer>, origin: i64) -> Self {
        Self {
            layers,
            origin,
            dummy_chains: Vec::new(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Absolute band index (`⌈x / layer_width⌉`) of layer 0.
    pub fn origin(&self) -> i64 {
        self.origin
    }

    /// First dummy node of every chain spliced in by [`run`].
    pub fn dummy_chains(&self) -> &[NodeId] {
        &self.dummy_chains
    }

    /// Indices of the layers holding `node`, ascending.
    pub fn layers_of(&self, node: NodeId) -> Vec<usize> {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, l)| l.contains(node))
            .map(|(ix, _)| ix)
            .collect()
    }
}

/// Closed range of layer indices a positioned node spans, relative to `origin`.
fn span_of(x: i64, length: u32, width: i64, origin: i64) -> (usize, usize) {
    let start = ceil_div(x, width) - origin;
    let end = ceil_div(x.saturating_add(i64::from(length)), width) - origin - 1;
    let start = usize::try_from(start).unwrap_or(0);
    let end = usize::try_from(end).unwrap_or(0).max(start);
    (start, end)
}

/// Puts `node` into the lowest slot index open in every layer of `span`, growing the layers
/// that are too short. A lengthy node thus sits in the same row across its whole span.
fn place_span(layers: &mut [Layer], span: (usize, usize), node: NodeId) {
    let band = &mut layers[span.0..=span.1];
    let width = band.iter().map(Layer::len).max().unwrap_or(0);
    let slot = (0..width)
        .find(|&k| band.iter().all(|l| l.slots.get(k).is_none_or(Option::is_none)))
        .unwrap_or(width);
    for layer in band {
        if layer.slots.len() <= slot {
            layer.slots.resize(slot + 1, None);
        }
        layer.slots[slot] = Some(node);
    }
}

fn place(layers: &mut [Layer], layer: usize, node: NodeId) -> Result<usize> {
    let target = &mut layers[layer];
    target
        .insert_first_open(node)
        .ok_or(Error::LayerCapacityExhausted {
            layer,
            capacity: target.len(),
        })
}

struct SkippingEdge {
    edge: EdgeId,
    skipped: Range<usize>,
}

/// Builds the layering for a horizontally positioned subgraph.
///
/// Returns `Ok(None)` if `cancel` fired; the subgraph may then hold a partial set of dummy
/// chains and must be discarded (or cleaned with [`Subgraph::discard_transient`]).
///
/// Fails with [`Error::EmptyCollection`] when the subgraph has nodes but none of them has been
/// positioned yet.
#[tracing::instrument(skip_all, fields(nodes = g.node_count()))]
pub fn run(
    g: &mut Subgraph,
    config: &LayoutConfig,
    cancel: &CancellationToken,
) -> Result<Option<Layering>> {
    config.validate()?;
    let width = i64::from(config.layer_width);

    if g.is_empty() {
        return Ok(Some(Layering::default()));
    }
    let positioned: Vec<(NodeId, i64, u32)> = g
        .nodes()
        .filter_map(|n| n.x_position.map(|x| (n.id(), x, n.length())))
        .collect();

    let origin = positioned
        .iter()
        .map(|&(_, x, _)| ceil_div(x, width))
        .min()
        .ok_or(Error::EmptyCollection {
            what: "minimum layer",
        })?;

    let mut spans: Vec<Option<(usize, usize)>> = vec![None; g.node_count()];
    let mut layer_count: usize = 0;
    for &(v, x, length) in &positioned {
        let span = span_of(x, length, width, origin);
        layer_count = layer_count.max(span.1 + 1);
        spans[v.index()] = Some(span);
    }

    let mut skipping: Vec<SkippingEdge> = Vec::new();
    for &(v, _, _) in &positioned {
        let Some((_, from_end)) = spans[v.index()] else {
            continue;
        };
        for &e in g.out_edges(v) {
            let Some(edge) = g.edge(e) else {
                continue;
            };
            let Some((to_start, _)) = spans[edge.to().index()] else {
                continue;
            };
            if to_start > from_end + 1 {
                skipping.push(SkippingEdge {
                    edge: e,
                    skipped: from_end + 1..to_start,
                });
            }
        }
    }

    let mut capacity: Vec<usize> = vec![0; layer_count];
    for &(start, end) in spans.iter().flatten() {
        for c in &mut capacity[start..=end] {
            *c += 1;
        }
    }
    for s in &skipping {
        for c in &mut capacity[s.skipped.clone()] {
            *c += 1;
        }
    }

    let mut layers: Vec<Layer> = capacity.iter().map(|&c| Layer::with_capacity(c)).collect();
    for &(v, _, _) in &positioned {
        if cancel.is_cancelled() {
            return Ok(None);
        }
        let Some(span) = spans[v.index()] else {
            continue;
        };
        place_span(&mut layers, span, v);
    }

    let mut dummy_chains: Vec<NodeId> = Vec::with_capacity(skipping.len());
    for s in skipping {
        if cancel.is_cancelled() {
            return Ok(None);
        }
        if let Some(head) = splice_dummy_chain(g, &mut layers, s, origin, width)? {
            dummy_chains.push(head);
        }
    }

    tracing::debug!(
        layers = layers.len(),
        origin,
        dummy_chains = dummy_chains.len(),
        "assigned layers"
    );

    Ok(Some(Layering {
        layers,
        origin,
        dummy_chains,
    }))
}

/// Replaces `s.edge` with `source -> d_1 -> ... -> d_k -> destination`, one dummy per skipped
/// layer. Returns the first dummy node.
fn splice_dummy_chain(
    g: &mut Subgraph,
    layers: &mut [Layer],
    s: SkippingEdge,
    origin: i64,
    width: i64,
) -> Result<Option<NodeId>> {
    let Some(edge) = g.edge(s.edge) else {
        return Ok(None);
    };
    let (source, destination) = (edge.from(), edge.to());
    let original = s.edge;
    g.retire_edge(original);

    let mut head: Option<NodeId> = None;
    let mut prev = source;
    for layer in s.skipped {
        let d = g.add_dummy(DummyData {
            source,
            destination,
            original,
        });
        if let Some(n) = g.node_mut(d) {
            let band = i64::try_from(layer).unwrap_or(i64::MAX).saturating_add(origin);
            n.x_position = Some(band.saturating_mul(width));
        }
        g.add_dummy_edge(prev, d, original);
        place(layers, layer, d)?;
        head.get_or_insert(d);
        prev = d;
    }
    g.add_dummy_edge(prev, destination, original);
    Ok(head)
}
