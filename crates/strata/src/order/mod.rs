//! Node ordering / crossing reduction.
//!
//! Layers are reordered with the barycenter heuristic: each slot moves to the mean position of
//! its neighbours in the adjacent, already-fixed layer. A bilayer accumulator-tree crossing count
//! scores each sweep, and the best layering seen is kept. A node present in both layers of a
//! step is pinned to its row in the fixed layer, so lengthy nodes move as one unit.

mod barycenter;
pub use barycenter::{barycenters, reorder_layer};

mod cross_count;
pub use cross_count::cross_count;

use crate::cancel::CancellationToken;
use crate::config::{LayoutConfig, SweepMode};
use crate::error::{Error, Result};
use crate::layering::Layering;
use strata_graph::Subgraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Average over predecessors in the layer before.
    InEdges,
    /// Average over successors in the layer after.
    OutEdges,
}

/// Reduces crossings in place. Returns the number of sweeps run, or `None` if cancelled (the
/// layering is then left in an arbitrary, still valid order).
#[tracing::instrument(skip_all, fields(layers = layering.len()))]
pub fn reduce_crossings(
    g: &Subgraph,
    layering: &mut Layering,
    config: &LayoutConfig,
    cancel: &CancellationToken,
) -> Result<Option<usize>> {
    if config.sweep_mode == SweepMode::Exhaustive {
        return Err(Error::NotImplemented {
            what: "exhaustive crossing minimization",
        });
    }
    if layering.len() < 2 || config.crossing_sweeps == 0 {
        return Ok(Some(0));
    }

    let mut best_cc = cross_count(g, layering);
    let mut best = layering.layers.clone();
    let mut sweeps: usize = 0;

    for i in 0..config.crossing_sweeps {
        let upward = config.sweep_mode == SweepMode::Alternating && i % 2 == 1;
        let Some(changed) = sweep(g, layering, upward, cancel) else {
            return Ok(None);
        };
        sweeps += 1;

        let cc = cross_count(g, layering);
        if cc <= best_cc {
            best_cc = cc;
            best.clone_from(&layering.layers);
        }
        if !changed {
            break;
        }
    }

    layering.layers = best;
    tracing::debug!(sweeps, crossings = best_cc, "reduced crossings");
    Ok(Some(sweeps))
}

/// One pass over every movable layer. Returns whether any slot moved.
fn sweep(
    g: &Subgraph,
    layering: &mut Layering,
    upward: bool,
    cancel: &CancellationToken,
) -> Option<bool> {
    let layers = &mut layering.layers;
    let mut changed = false;
    if upward {
        for ix in (0..layers.len() - 1).rev() {
            if cancel.is_cancelled() {
                return None;
            }
            let (head, tail) = layers.split_at_mut(ix + 1);
            changed |= reorder_layer(g, &tail[0], &mut head[ix], Relationship::OutEdges);
        }
    } else {
        for ix in 1..layers.len() {
            if cancel.is_cancelled() {
                return None;
            }
            let (head, tail) = layers.split_at_mut(ix);
            changed |= reorder_layer(g, &head[ix - 1], &mut tail[0], Relationship::InEdges);
        }
    }
    Some(changed)
}
