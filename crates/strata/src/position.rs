//! Horizontal positioning (FAFOSP-X).
//!
//! Nodes are drawn with a pixel length proportional to their sequence length, so the usual
//! "one rank per hop" assignment wastes space on short segments and overlaps long ones. Instead
//! every node is placed right after the furthest-reaching end of its predecessors, plus an edge
//! gap, rounded up to the column grid.
//!
//! The pass is a breadth-first relaxation from the source (`NodeId(0)`). A node is finalized the
//! first time it is dequeued with all predecessors positioned; later dequeues are no-ops, which
//! keeps converging paths ("bubbles") from looping.

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::util::round_up;
use std::collections::VecDeque;
use strata_graph::{HasLength, NodeId, Subgraph};

#[tracing::instrument(skip_all, fields(nodes = g.node_count()))]
pub fn run(g: &mut Subgraph, config: &LayoutConfig) -> Result<()> {
    config.validate()?;

    for n in g.nodes_mut() {
        n.x_position = None;
    }
    let Some(source) = g.source() else {
        return Ok(());
    };

    let column = i64::from(config.column_width);
    let gap = i64::from(config.edge_gap);

    if let Some(n) = g.node_mut(source) {
        n.x_position = Some(0);
    }
    let mut positioned: usize = 1;
    let mut queue: VecDeque<NodeId> = g.successors(source).collect();

    while let Some(v) = queue.pop_front() {
        if g.node(v).is_none_or(|n| n.x_position.is_some()) {
            continue;
        }

        let Some(end) = furthest_predecessor_end(g, v) else {
            // Re-enqueued by the missing predecessor once it is placed.
            continue;
        };
        let x = round_up(end.saturating_add(gap), column);
        if let Some(n) = g.node_mut(v) {
            n.x_position = Some(x);
        }
        positioned += 1;

        queue.extend(
            g.successors(v)
                .filter(|w| g.node(*w).is_some_and(|n| n.x_position.is_none())),
        );
    }

    tracing::debug!(positioned, "assigned horizontal positions");
    Ok(())
}

/// `max(x(p) + length(p))` over the predecessors of `v`, or `None` while any is unpositioned.
fn furthest_predecessor_end(g: &Subgraph, v: NodeId) -> Option<i64> {
    let mut end: i64 = 0;
    for u in g.predecessors(v) {
        let p = g.node(u)?;
        let x = p.x_position?;
        end = end.max(x.saturating_add(i64::from(p.length())));
    }
    Some(end)
}
