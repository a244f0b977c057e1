//! Layered layout of service topology graphs
//!
//! This crate turns a [`GraphDescription`] of service, expression and
//! constant nodes into a [`Topology`]: every node with its layer, its index
//! in the layer and a pixel position. The computation is a pure function of
//! the description, node order included.
//!
//! # Placements
//!
//! - [`GridPlacement`]: one row per layer, nodes side by side
//! - [`HappyPathPlacement`]: service nodes on vertical lanes, auxiliary
//!   nodes packed around the lane they feed
//!
//! # Example
//!
//! ```
//! use topology_layout::{build_topology, LayoutMode, LayoutOptions, TopologyLayout};
//! use topology_model::{GraphDescription, GraphEdge, GraphNode};
//!
//! let graph: GraphDescription = GraphDescription::new()
//!     .with_node(GraphNode::new("rate", "const"))
//!     .with_node(GraphNode::new("api", "service"))
//!     .with_edge(GraphEdge::new("e1", "rate:out", "api"));
//!
//! // In one call
//! let options = LayoutOptions::new(LayoutMode::HappyPath);
//! let topology = build_topology(Some(&graph), &options).unwrap();
//! assert_eq!(topology.nodes.len(), 2);
//!
//! // Or step by step, reusing the layers for several placements
//! let engine = TopologyLayout::default();
//! let layers = engine.compute_layers(&graph);
//! let grid = engine.compute_positions(&layers, LayoutMode::Grid);
//! let lanes = engine.compute_positions(&layers, LayoutMode::HappyPath);
//! assert_eq!(grid.len(), lanes.len());
//! ```

mod assemble;
mod config;
mod engine;
mod error;
mod geometry;
mod grid;
mod happy_path;
mod intake;

pub mod layered;

pub use config::{LayoutConfig, LayoutMode, LayoutOptions};
pub use engine::Placement;
pub use error::LayoutError;
pub use geometry::LayoutPoint;
pub use grid::GridPlacement;
pub use happy_path::HappyPathPlacement;
pub use intake::Adjacency;
pub use layered::Layers;

pub use topology_model::{
    GraphDescription, GraphEdge, GraphNode, NodeCategory, Topology, TopologyNode,
};

use assemble::assemble;
use tracing::debug;

/// Layout engine holding a configuration
#[derive(Debug, Clone, Default)]
pub struct TopologyLayout {
    pub config: LayoutConfig,
}

impl TopologyLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Read the description and compute its layers
    ///
    /// Only depends on the graph shape, the result can be placed several
    /// times.
    pub fn compute_layers<S>(&self, graph: &GraphDescription<S>) -> Layers {
        Layers::new(Adjacency::from_description(graph))
    }

    /// Compute one point per node of the layers, indexed by ordinal
    pub fn compute_positions(&self, layers: &Layers, mode: LayoutMode) -> Vec<LayoutPoint> {
        match mode {
            LayoutMode::Grid => GridPlacement.place(layers, &self.config),
            LayoutMode::HappyPath => HappyPathPlacement.place(layers, &self.config),
        }
    }

    /// Lay out a graph
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidArgument`] when no graph is given. Any
    /// graph, however malformed, is laid out.
    pub fn build<S: Clone>(
        &self,
        graph: Option<&GraphDescription<S>>,
        options: &LayoutOptions,
    ) -> Result<Topology<S>, LayoutError> {
        let graph = graph.ok_or(LayoutError::InvalidArgument("graph is required"))?;
        let topology = match options.mode {
            LayoutMode::Grid => {
                self.build_with(graph, &GridPlacement, options.respect_ui_positions)
            }
            LayoutMode::HappyPath => {
                self.build_with(graph, &HappyPathPlacement, options.respect_ui_positions)
            }
        };
        Ok(topology)
    }

    /// Lay out a graph with a custom placement
    pub fn build_with<S: Clone, P: Placement>(
        &self,
        graph: &GraphDescription<S>,
        placement: &P,
        respect_ui_positions: bool,
    ) -> Topology<S> {
        let layers = self.compute_layers(graph);
        debug!(
            "{} layout of {} nodes, {} edges in {} layers",
            std::any::type_name::<P>(),
            layers.len(),
            layers.adjacency.edge_count(),
            layers.nodes.len()
        );

        let points = placement.place(&layers, &self.config);
        assemble(graph, &layers, &points, respect_ui_positions)
    }
}

/// Lay out a graph with the default configuration
///
/// # Errors
/// Returns [`LayoutError::InvalidArgument`] when no graph is given.
pub fn build_topology<S: Clone>(
    graph: Option<&GraphDescription<S>>,
    options: &LayoutOptions,
) -> Result<Topology<S>, LayoutError> {
    TopologyLayout::default().build(graph, options)
}
