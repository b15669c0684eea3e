//! Edge routes for the renderer.
//!
//! Walks each dummy chain of a completed layout and collects the dummy positions as waypoints of
//! the assembly edge the chain replaced.

use crate::pipeline::Layout;
use serde::Serialize;
use strata_graph::{EdgeId, NodeId, Subgraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Waypoint {
    pub x: i64,
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeRoute {
    pub edge: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub waypoints: Vec<Waypoint>,
}

pub fn edge_routes(g: &Subgraph, layout: &Layout) -> Vec<EdgeRoute> {
    let mut routes = Vec::with_capacity(layout.dummy_chains.len());
    for &head in &layout.dummy_chains {
        let Some(first) = g.node(head).and_then(|n| n.as_dummy()).copied() else {
            continue;
        };

        let mut waypoints: Vec<Waypoint> = Vec::new();
        let mut v = head;
        while let Some(node) = g.node(v) {
            if !node.is_dummy() {
                break;
            }
            if let (Some(x), Some(row)) = (node.x_position, node.y_position) {
                waypoints.push(Waypoint { x, row });
            }
            let Some(next) = g.successors(v).next() else {
                break;
            };
            v = next;
        }

        routes.push(EdgeRoute {
            edge: first.original,
            from: first.source,
            to: first.destination,
            waypoints,
        });
    }
    routes
}
