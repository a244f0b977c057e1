//! Data model for service topology graphs
//!
//! The input side is a [`GraphDescription`]: typed nodes and weighted edges
//! as they arrive from a model description. The output side is a
//! [`Topology`]: the same nodes with their layer, index and pixel position,
//! ready to be handed to a renderer.
//!
//! Both sides carry an opaque semantics payload `S` per node that is passed
//! through untouched.

mod category;
mod graph;
mod topology;

pub use category::NodeCategory;
pub use graph::{strip_port, GraphDescription, GraphEdge, GraphNode, UiPosition};
pub use topology::{Bounds, Topology, TopologyNode};
