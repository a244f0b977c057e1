use serde::{Deserialize, Serialize};
use topology_model::NodeCategory;

/// Which placement runs after layering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    /// One column per index in the layer, one row per layer
    #[default]
    Grid,
    /// Service nodes on lanes, auxiliary nodes packed around them
    HappyPath,
}

/// Per-call options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Keep positions pinned by the user instead of computing them
    pub respect_ui_positions: bool,
    pub mode: LayoutMode,
}

impl LayoutOptions {
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn respecting_ui_positions(mut self) -> Self {
        self.respect_ui_positions = true;
        self
    }
}

/// Layout configuration
///
/// All distances are in pixels. Factors are relative to one of the two
/// spacings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between two consecutive layers.
    pub vertical_spacing: f64,
    /// Distance between two lanes, or two service columns in grid mode.
    pub horizontal_spacing: f64,
    /// Horizontal spacing factor of expression and constant nodes in grid mode.
    pub grid_auxiliary_spacing: f64,

    /// How many lanes away from its preferred lane a service node may move
    /// when the preferred one is taken.
    pub lane_search_radius: i32,

    /// Height of an auxiliary row, relative to the vertical spacing.
    pub row_height_factor: f64,
    /// Minimum gap above the dependents of an auxiliary node, relative to the
    /// vertical spacing.
    pub clearance_factor: f64,

    // Vertical targets of auxiliary nodes, in layers. The per-column terms
    // are multiplied by the distance of the grid column to the lane center.
    pub downstream_gap: f64,
    pub downstream_gap_per_column: f64,
    pub upstream_gap: f64,
    pub upstream_gap_per_column: f64,
    /// Below the deepest service layer, for nodes without any edge.
    pub isolated_gap: f64,
    /// Below the deepest service layer, for nodes only linked to unplaced nodes.
    pub detached_gap: f64,
    /// Per-column term of both fallbacks above.
    pub fallback_gap_per_column: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertical_spacing: 140.0,
            horizontal_spacing: 240.0,
            grid_auxiliary_spacing: 0.7,
            lane_search_radius: 8,
            row_height_factor: 0.55,
            clearance_factor: 0.35,
            downstream_gap: 0.45,
            downstream_gap_per_column: 0.06,
            upstream_gap: 0.35,
            upstream_gap_per_column: 0.05,
            isolated_gap: 0.8,
            detached_gap: 0.5,
            fallback_gap_per_column: 0.05,
        }
    }
}

impl LayoutConfig {
    pub fn row_height(&self) -> f64 {
        self.row_height_factor * self.vertical_spacing
    }

    pub fn clearance(&self) -> f64 {
        self.clearance_factor * self.vertical_spacing
    }

    /// Horizontal step between two nodes of a grid layer
    pub fn grid_spacing(&self, category: NodeCategory) -> f64 {
        match category {
            NodeCategory::Service => self.horizontal_spacing,
            NodeCategory::Expression | NodeCategory::Constant => {
                self.horizontal_spacing * self.grid_auxiliary_spacing
            }
        }
    }
}
