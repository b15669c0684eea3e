//! Local edge straightening.
//!
//! After ordering, a child often sits a few rows above its parent, which draws as a zigzag. This
//! pass slides such children down to their parent's row when that row is free (unfilled or a fill
//! node), growing the layer with fill nodes when the parent's row is past its end. Only the first
//! incoming edge is consulted for nodes with several parents.

use crate::layering::Layering;
use strata_graph::{Node, NodeId, Subgraph};

/// Straightens every layer against its predecessor, left to right.
#[tracing::instrument(skip_all, fields(layers = layering.len()))]
pub fn run(g: &mut Subgraph, layering: &mut Layering) {
    let mut moved: usize = 0;
    for layer in 1..layering.len() {
        moved += straighten_layer(g, layering, layer);
    }
    tracing::debug!(moved, "straightened edges");
}

/// Straightens layer `layer` against layer `layer - 1`. Returns the number of nodes moved.
///
/// A node only ever moves to a higher slot index. A lengthy node starting in `layer` moves in
/// every layer it spans or not at all; one continuing from `layer - 1` stays put.
pub fn straighten_layer(g: &mut Subgraph, layering: &mut Layering, layer: usize) -> usize {
    if layer == 0 || layer >= layering.layers.len() {
        return 0;
    }

    let mut moved: usize = 0;
    for ix in (0..layering.layers[layer].slots.len()).rev() {
        let Some(v) = layering.layers[layer].slots[ix] else {
            continue;
        };
        if g.node(v).is_none_or(Node::is_fill) {
            continue;
        }
        let prev = &layering.layers[layer - 1];
        if prev.contains(v) {
            continue;
        }
        let Some(target) = first_parent(g, v).and_then(|p| prev.position(p)) else {
            continue;
        };
        if target <= ix {
            continue;
        }

        let depth = layering.layers[layer..]
            .iter()
            .take_while(|l| l.get(ix) == Some(v))
            .count();
        let span = layer..layer + depth;
        let free = layering.layers[span.clone()]
            .iter()
            .all(|l| match l.slots.get(target) {
                None | Some(None) => true,
                Some(Some(w)) => g.node(*w).is_some_and(Node::is_fill),
            });
        if !free {
            continue;
        }

        for l in &mut layering.layers[span] {
            while l.slots.len() <= target {
                l.slots.push(Some(g.add_fill()));
            }
            l.slots.swap(ix, target);
        }
        moved += 1;
    }
    moved
}

fn first_parent(g: &Subgraph, v: NodeId) -> Option<NodeId> {
    g.predecessors(v).next()
}
