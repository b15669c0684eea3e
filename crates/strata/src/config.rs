//! Layout configuration.
//!
//! Defaults carry the reference constants the renderer is tuned for. Callers usually start from
//! [`LayoutConfig::default`] and override individual keys from JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SweepMode {
    /// Left-to-right sweeps only, averaging over predecessors.
    #[default]
    Forward,
    /// Alternate left-to-right (predecessors) and right-to-left (successors) sweeps.
    Alternating,
    /// Exact crossing minimization. Not available.
    Exhaustive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Pixel quantum x positions are rounded up to. Must be a multiple of `layer_width`, so every
    /// node starts on a layer boundary and an edge never stays inside one layer.
    pub column_width: u32,
    /// Pixel width of one layer band.
    pub layer_width: u32,
    /// Clearance reserved between a node's end and its successors' start.
    pub edge_gap: u32,
    /// Upper bound on barycenter sweeps; `0` disables crossing reduction.
    pub crossing_sweeps: usize,
    pub sweep_mode: SweepMode,
    /// Run the edge optimizer after crossing reduction.
    pub straighten_edges: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 1000,
            layer_width: 1000,
            edge_gap: 1000,
            crossing_sweeps: 1,
            sweep_mode: SweepMode::Forward,
            straighten_edges: true,
        }
    }
}

impl LayoutConfig {
    /// Parses a (possibly partial) JSON object; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.column_width == 0 {
            return Err(Error::InvalidConfig {
                message: "columnWidth must be positive".to_string(),
            });
        }
        if self.layer_width == 0 {
            return Err(Error::InvalidConfig {
                message: "layerWidth must be positive".to_string(),
            });
        }
        if self.column_width % self.layer_width != 0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "columnWidth ({}) must be a multiple of layerWidth ({})",
                    self.column_width, self.layer_width
                ),
            });
        }
        Ok(())
    }
}
