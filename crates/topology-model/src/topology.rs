use crate::{GraphEdge, NodeCategory};
use serde::{Deserialize, Serialize};

/// A laid-out node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyNode<S = ()> {
    pub id: String,
    pub kind: NodeCategory,
    /// Distinct upstream node ids, in input order
    pub inputs: Vec<String>,
    /// Distinct downstream node ids, in input order
    pub outputs: Vec<String>,
    pub layer: usize,
    /// Position within the layer
    pub index: usize,
    pub x: f64,
    pub y: f64,
    /// Horizontal ordering key for renderers that sort siblings
    pub order_hint: i32,
    /// The position was supplied by the caller and not computed
    pub is_position_fixed: bool,
    pub semantics: S,
}

/// Axis-aligned box enclosing node positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// The result of a layout run
///
/// Nodes are ordered by layer, then by index within the layer. Edges only
/// reference nodes of the topology and carry bare node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology<S = ()> {
    pub nodes: Vec<TopologyNode<S>>,
    pub edges: Vec<GraphEdge>,
}

impl<S> Default for Topology<S> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<S> Topology<S> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by id, ignoring case
    pub fn node(&self, id: &str) -> Option<&TopologyNode<S>> {
        let id = id.to_lowercase();
        self.nodes.iter().find(|n| n.id.to_lowercase() == id)
    }

    /// Number of layers spanned by the nodes
    pub fn layer_count(&self) -> usize {
        self.nodes.iter().map(|n| n.layer + 1).max().unwrap_or(0)
    }

    /// Bounding box of all node positions, `None` for an empty topology
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.nodes.first()?;
        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.nodes.iter().fold(init, |b, n| Bounds {
            min_x: b.min_x.min(n.x),
            min_y: b.min_y.min(n.y),
            max_x: b.max_x.max(n.x),
            max_y: b.max_y.max(n.y),
        }))
    }
}
