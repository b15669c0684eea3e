//! Barycenter computation and single-layer reordering.

use super::Relationship;
use crate::layering::Layer;
use rustc_hash::FxHashMap as HashMap;
use strata_graph::{NodeId, Subgraph};

fn slot_index(layer: &Layer) -> HashMap<NodeId, usize> {
    layer
        .slots()
        .iter()
        .enumerate()
        .filter_map(|(ix, s)| s.map(|v| (v, ix)))
        .collect()
}

/// Mean slot position, in `fixed`, of each slot's neighbours.
///
/// A node that also occupies `fixed` (a lengthy node) takes its own slot there. Empty slots and
/// nodes without neighbours in `fixed` get `None`.
pub fn barycenters(
    g: &Subgraph,
    fixed: &Layer,
    free: &Layer,
    relationship: Relationship,
) -> Vec<Option<f64>> {
    let pos = slot_index(fixed);

    free.slots()
        .iter()
        .map(|slot| {
            let v = (*slot)?;
            if let Some(&own) = pos.get(&v) {
                return Some(own as f64);
            }
            let neighbours: Vec<NodeId> = match relationship {
                Relationship::InEdges => g.predecessors(v).collect(),
                Relationship::OutEdges => g.successors(v).collect(),
            };
            let mut sum: f64 = 0.0;
            let mut count: usize = 0;
            for u in neighbours {
                if let Some(&p) = pos.get(&u) {
                    sum += p as f64;
                    count += 1;
                }
            }
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}

/// Reorders `free` by barycenter against `fixed`. Returns whether anything moved.
///
/// A node that also occupies `fixed` is pinned to its slot there, growing `free` if needed, so a
/// lengthy node keeps one row across its span. The other nodes fill the remaining slots in
/// barycenter order; a node without a barycenter keeps its current index as sort key and ties
/// keep the original slot order. Unfilled capacity ends up in the slots left over.
pub fn reorder_layer(
    g: &Subgraph,
    fixed: &Layer,
    free: &mut Layer,
    relationship: Relationship,
) -> bool {
    let keys = barycenters(g, fixed, free, relationship);
    let rows = slot_index(fixed);

    let mut pinned: Vec<(usize, NodeId)> = Vec::new();
    let mut movable: Vec<(f64, usize, NodeId)> = Vec::new();
    for (ix, slot) in free.slots.iter().enumerate() {
        let Some(v) = *slot else {
            continue;
        };
        match rows.get(&v) {
            Some(&row) => pinned.push((row, v)),
            None => movable.push((keys[ix].unwrap_or(ix as f64), ix, v)),
        }
    }
    movable.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let len = pinned
        .iter()
        .map(|&(row, _)| row + 1)
        .fold(free.slots.len(), usize::max);
    let mut slots: Vec<Option<NodeId>> = vec![None; len];
    for &(row, v) in &pinned {
        slots[row] = Some(v);
    }
    let open = slots.iter_mut().filter(|s| s.is_none());
    for (slot, (_, _, v)) in open.zip(movable) {
        *slot = Some(v);
    }

    let changed = slots != free.slots;
    free.slots = slots;
    changed
}
