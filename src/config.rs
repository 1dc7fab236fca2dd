//! Configuration for the layout engine.

use serde::{Deserialize, Serialize};

/// Box metrics and spacing used by the layered layout.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Lower bound for a node's width.
    pub min_node_width: f64,
    /// Upper bound for a node's width.
    pub max_node_width: f64,
    /// Width budget per label character.
    pub char_width: f64,
    /// Horizontal room around the label text.
    pub label_padding: f64,
    pub node_height: f64,
    /// Height of Diamond nodes.
    pub diamond_height: f64,
    /// Gap between neighbouring boxes in one rank.
    pub horizontal_gap: f64,
    /// Gap between consecutive ranks.
    pub vertical_gap: f64,
    /// Empty border around the whole drawing.
    pub margin: f64,
    /// Width reserved for an edge passing through a rank.
    pub dummy_width: f64,
    /// Upper bound on barycenter sweeps during crossing reduction.
    pub max_crossing_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_node_width: 150.0,
            max_node_width: 300.0,
            char_width: 8.0,
            label_padding: 40.0,
            node_height: 50.0,
            diamond_height: 80.0,
            horizontal_gap: 80.0,
            vertical_gap: 100.0,
            margin: 40.0,
            dummy_width: 20.0,
            max_crossing_passes: 24,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config document; absent fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
