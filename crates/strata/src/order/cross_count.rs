use crate::layering::{Layer, Layering};
use rustc_hash::FxHashMap as HashMap;
use strata_graph::Subgraph;

/// Number of edge crossings between every pair of adjacent layers.
///
/// A lengthy node present in both layers of a pair counts as an edge to itself.
pub fn cross_count(g: &Subgraph, layering: &Layering) -> u64 {
    layering
        .layers()
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[0], &pair[1]))
        .sum()
}

fn two_layer_cross_count(g: &Subgraph, north: &Layer, south: &Layer) -> u64 {
    if south.is_empty() {
        return 0;
    }

    let mut south_pos: HashMap<_, usize> = HashMap::default();
    for (i, slot) in south.slots().iter().enumerate() {
        if let Some(v) = slot {
            south_pos.insert(*v, i);
        }
    }

    let mut south_entries: Vec<usize> = Vec::new();
    for v in north.nodes() {
        let mut entries: Vec<usize> = g
            .successors(v)
            .chain(std::iter::once(v))
            .filter_map(|w| south_pos.get(&w).copied())
            .collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<u64> = vec![0; tree_size];

    let mut cc: u64 = 0;
    for pos in south_entries {
        let mut index = pos + first_index;
        tree[index] += 1;
        let mut weight_sum: u64 = 0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }

    cc
}
