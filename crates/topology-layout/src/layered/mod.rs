mod layers;

use crate::intake::Adjacency;
use petgraph::Direction;
use topology_model::NodeCategory;

use layers::{assign_indices, assign_layers};

/// Layer structure shared by every placement
///
/// Nodes are addressed by their ordinal: the dense index given to them when
/// the description was read. This only depends on the graph shape and can be
/// reused across placements.
#[derive(Debug, Clone, Default)]
pub struct Layers {
    pub(crate) adjacency: Adjacency,

    inputs: Vec<Vec<usize>>,
    outputs: Vec<Vec<usize>>,

    /// Layer of each node
    pub layer: Vec<usize>,

    /// Position of each node within its layer
    pub index: Vec<usize>,

    /// Nodes organized into layers, in ordinal order
    pub nodes: Vec<Vec<usize>>,
}

impl Layers {
    pub fn new(adjacency: Adjacency) -> Self {
        let count = adjacency.node_count();
        let inputs = (0..count)
            .map(|n| adjacency.neighbors(n, Direction::Incoming))
            .collect();
        let outputs = (0..count)
            .map(|n| adjacency.neighbors(n, Direction::Outgoing))
            .collect();

        let layer = assign_layers(&adjacency);
        let (index, nodes) = assign_indices(&layer);

        Self {
            adjacency,
            inputs,
            outputs,
            layer,
            index,
            nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.layer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layer.is_empty()
    }

    pub fn category(&self, node: usize) -> NodeCategory {
        self.adjacency.category(node)
    }

    /// Distinct upstream nodes, in ordinal order
    pub fn inputs(&self, node: usize) -> &[usize] {
        &self.inputs[node]
    }

    /// Distinct downstream nodes, in ordinal order
    pub fn outputs(&self, node: usize) -> &[usize] {
        &self.outputs[node]
    }

    /// Deepest layer holding a service node
    pub fn max_service_layer(&self) -> Option<usize> {
        (0..self.len())
            .filter(|&n| self.category(n).is_service())
            .map(|n| self.layer[n])
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topology_model::{GraphDescription, GraphEdge, GraphNode};

    #[test]
    fn test_layers_of_description() {
        let description: GraphDescription = GraphDescription::new()
            .with_node(GraphNode::new("A", "const"))
            .with_node(GraphNode::new("B", "expr"))
            .with_node(GraphNode::new("C", "service"))
            .with_node(GraphNode::new("D", "const"))
            .with_edge(GraphEdge::new("e1", "A", "B"))
            .with_edge(GraphEdge::new("e2", "B", "C"))
            .with_edge(GraphEdge::new("e3", "D", "C"));

        let layers = Layers::new(Adjacency::from_description(&description));

        assert_eq!(layers.layer, vec![0, 1, 2, 0]);
        assert_eq!(layers.index, vec![0, 0, 0, 1]);
        assert_eq!(layers.nodes, vec![vec![0, 3], vec![1], vec![2]]);
        assert_eq!(layers.inputs(2), &[1, 3]);
        assert_eq!(layers.outputs(0), &[1]);
        assert_eq!(layers.max_service_layer(), Some(2));
    }

    #[test]
    fn test_empty() {
        let layers = Layers::new(Adjacency::default());
        assert!(layers.is_empty());
        assert!(layers.nodes.is_empty());
        assert_eq!(layers.max_service_layer(), None);
    }
}
