//! Layout pipeline.
//!
//! `position -> layer -> reduce crossings -> straighten -> lengthy nodes -> rows`. The
//! cancellation token is polled between steps (and inside the long ones); y positions are only
//! written once every step has finished, so a superseded pass never leaves half-assigned rows.

use crate::cancel::CancellationToken;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layering::{self, Layering};
use crate::lengthy::{self, LengthyNodes};
use crate::{order, position, straighten};
use serde::Serialize;
use strata_graph::{NodeId, Subgraph};

/// Immutable result of a completed pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// Final slot contents per layer; `None` is unfilled capacity.
    pub layers: Vec<Vec<Option<NodeId>>>,
    /// Absolute band index of layer 0.
    pub origin: i64,
    /// First dummy node of each spliced edge.
    pub dummy_chains: Vec<NodeId>,
    pub lengthy: LengthyNodes,
    pub crossings: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOutcome {
    Complete(Layout),
    /// The token fired; the subgraph holds partial work and must not be drawn.
    Cancelled,
}

impl LayoutOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LayoutOutcome::Cancelled)
    }

    pub fn completed(self) -> Option<Layout> {
        match self {
            LayoutOutcome::Complete(layout) => Some(layout),
            LayoutOutcome::Cancelled => None,
        }
    }
}

/// Lays out `g` in place and returns the layer structure.
///
/// Dummy and fill nodes left by a previous pass are discarded first. Only those at the end of
/// the arena can be dropped: ids are arena indices, so transient nodes followed by nodes the
/// caller added afterwards stay in the arena, edgeless and unpositioned. Callers that keep
/// adding nodes to a laid-out subgraph should call [`Subgraph::discard_transient`] before doing
/// so.
#[tracing::instrument(skip_all, fields(nodes = g.node_count()))]
pub fn layout(
    g: &mut Subgraph,
    config: &LayoutConfig,
    cancel: &CancellationToken,
) -> Result<LayoutOutcome> {
    config.validate()?;
    g.discard_transient();

    if cancel.is_cancelled() {
        return Ok(LayoutOutcome::Cancelled);
    }
    position::run(g, config)?;

    if cancel.is_cancelled() {
        return Ok(LayoutOutcome::Cancelled);
    }
    let Some(mut layering) = layering::run(g, config, cancel)? else {
        return Ok(LayoutOutcome::Cancelled);
    };

    if cancel.is_cancelled() {
        return Ok(LayoutOutcome::Cancelled);
    }
    if order::reduce_crossings(g, &mut layering, config, cancel)?.is_none() {
        return Ok(LayoutOutcome::Cancelled);
    }

    if cancel.is_cancelled() {
        return Ok(LayoutOutcome::Cancelled);
    }
    if config.straighten_edges {
        straighten::run(g, &mut layering);
    }

    if cancel.is_cancelled() {
        return Ok(LayoutOutcome::Cancelled);
    }
    let lengthy = lengthy::find(g, &layering);
    let crossings = order::cross_count(g, &layering);

    if cancel.is_cancelled() {
        return Ok(LayoutOutcome::Cancelled);
    }
    assign_rows(g, &layering);

    tracing::debug!(
        layers = layering.len(),
        crossings,
        "layout complete"
    );

    Ok(LayoutOutcome::Complete(Layout {
        layers: layering
            .layers()
            .iter()
            .map(|l| l.slots().to_vec())
            .collect(),
        origin: layering.origin(),
        dummy_chains: layering.dummy_chains().to_vec(),
        lengthy,
        crossings,
    }))
}

/// Each node's row is its slot in the first layer it occupies.
fn assign_rows(g: &mut Subgraph, layering: &Layering) {
    for n in g.nodes_mut() {
        n.y_position = None;
    }
    for layer in layering.layers() {
        for (row, slot) in layer.slots().iter().enumerate() {
            let Some(v) = *slot else {
                continue;
            };
            if let Some(n) = g.node_mut(v) {
                n.y_position.get_or_insert(row);
            }
        }
    }
}
