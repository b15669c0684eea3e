#![forbid(unsafe_code)]

//! Layered layout for sequence graphs.
//!
//! Nodes of an assembly graph are drawn with a length proportional to their sequence, so the
//! layout differs from a textbook Sugiyama pipeline in two places: horizontal positions come
//! first (see [`position`]) and layers are derived from them by quantization (see [`layering`]),
//! which makes long segments span several layers.
//!
//! Entry point: [`layout`].

pub use strata_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cancel;
pub mod config;
pub mod error;
pub mod layering;
pub mod lengthy;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod routes;
pub mod straighten;
mod util;

pub use cancel::CancellationToken;
pub use config::{LayoutConfig, SweepMode};
pub use error::{Error, Result};
pub use layering::{Layer, Layering};
pub use lengthy::LengthyNodes;
pub use pipeline::{Layout, LayoutOutcome, layout};
pub use routes::{EdgeRoute, Waypoint, edge_routes};
