//! Lengthy-node detection.
//!
//! A lengthy node spans several consecutive layers. For every node we record how many layers it
//! occupies itself, and for every ancestor the sum of those counts over its descendants, so the
//! renderer can tell how much horizontal room a subtree is forced to reserve.

use crate::layering::Layering;
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;
use strata_graph::{NodeId, Subgraph};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LengthyNodes {
    own: Vec<usize>,
    total: Vec<u64>,
}

impl LengthyNodes {
    /// Consecutive layers `node` occupies, starting at the layer it was reached at.
    pub fn own(&self, node: NodeId) -> usize {
        self.own.get(node.index()).copied().unwrap_or(0)
    }

    /// Sum of [`own`](Self::own) over the descendants of `node` along the discovery tree.
    pub fn total(&self, node: NodeId) -> u64 {
        self.total.get(node.index()).copied().unwrap_or(0)
    }

    /// Nodes spanning more than one layer, by arena index.
    pub fn lengthy(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.own
            .iter()
            .enumerate()
            .filter(|(_, len)| **len > 1)
            .map(|(ix, _)| NodeId(u32::try_from(ix).unwrap_or(u32::MAX)))
    }
}

/// Explicit-stack DFS seeded from every node of layer 0.
pub fn find(g: &Subgraph, layering: &Layering) -> LengthyNodes {
    let n = g.node_count();
    let mut out = LengthyNodes {
        own: vec![0; n],
        total: vec![0; n],
    };
    let Some(first) = layering.layers().first() else {
        return out;
    };

    let members: Vec<HashSet<NodeId>> = layering
        .layers()
        .iter()
        .map(|l| l.nodes().collect())
        .collect();

    let mut visited: Vec<bool> = vec![false; n];
    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    let mut stack: Vec<(NodeId, usize)> = first.nodes().map(|v| (v, 0)).collect();
    stack.reverse();

    while let Some((v, layer)) = stack.pop() {
        let Some(seen) = visited.get_mut(v.index()) else {
            continue;
        };
        if *seen {
            continue;
        }
        *seen = true;

        let len = members
            .get(layer..)
            .unwrap_or(&[])
            .iter()
            .take_while(|m| m.contains(&v))
            .count();
        out.own[v.index()] = len;

        let mut cursor = parent[v.index()];
        while let Some(p) = cursor {
            out.total[p.index()] += len as u64;
            cursor = parent[p.index()];
        }

        let next = layer + len.max(1);
        for w in g.successors(v) {
            if visited.get(w.index()).copied().unwrap_or(true) {
                continue;
            }
            parent[w.index()].get_or_insert(v);
            stack.push((w, next));
        }
    }

    tracing::debug!(
        lengthy = out.lengthy().count(),
        "measured lengthy nodes"
    );
    out
}
