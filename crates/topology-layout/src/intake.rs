use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use topology_model::{GraphDescription, GraphEdge, NodeCategory};
use tracing::trace;

/// A node of the adjacency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeSlot {
    /// Index of the winning definition in the description
    pub source: usize,
    pub category: NodeCategory,
}

/// Nodes and de-duplicated edges of a description
///
/// Node indices are dense and follow the order in which ids first appear in
/// the description, so comparing two indices compares ordinal positions.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    pub(crate) graph: DiGraph<NodeSlot, ()>,
    /// Kept edges with bare, canonical endpoint ids
    pub(crate) edges: Vec<GraphEdge>,
}

impl Adjacency {
    pub fn from_description<S>(description: &GraphDescription<S>) -> Self {
        let mut graph = DiGraph::new();
        let mut lookup: HashMap<String, NodeIndex> = HashMap::new();

        for (source, node) in description.nodes.iter().enumerate() {
            let slot = NodeSlot {
                source,
                category: NodeCategory::from_kind(&node.kind),
            };
            let key = node.id.to_lowercase();
            match lookup.get(&key) {
                // Last definition wins, the ordinal of the first one is kept
                Some(&existing) => graph[existing] = slot,
                None => {
                    let index = graph.add_node(slot);
                    lookup.insert(key, index);
                }
            }
        }

        let mut edges = Vec::with_capacity(description.edges.len());
        for edge in &description.edges {
            let from = lookup.get(&edge.source_id().to_lowercase()).copied();
            let to = lookup.get(&edge.target_id().to_lowercase()).copied();
            let (Some(from), Some(to)) = (from, to) else {
                trace!(
                    "Dropping edge {:?} from {:?} to {:?}: unknown endpoint",
                    edge.id,
                    edge.from,
                    edge.to
                );
                continue;
            };

            graph.update_edge(from, to, ());
            edges.push(GraphEdge {
                from: description.nodes[graph[from].source].id.clone(),
                to: description.nodes[graph[to].source].id.clone(),
                ..edge.clone()
            });
        }

        Self { graph, edges }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn slot(&self, node: usize) -> NodeSlot {
        self.graph[NodeIndex::new(node)]
    }

    pub fn category(&self, node: usize) -> NodeCategory {
        self.slot(node).category
    }

    /// Distinct neighbors in the given direction, in ordinal order
    pub(crate) fn neighbors(&self, node: usize, direction: Direction) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(node), direction)
            .map(|n| n.index())
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topology_model::GraphNode;

    fn description(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> GraphDescription {
        GraphDescription {
            nodes: nodes
                .iter()
                .map(|(id, kind)| GraphNode::new(*id, *kind))
                .collect(),
            edges: edges
                .iter()
                .enumerate()
                .map(|(i, (from, to))| GraphEdge::new(format!("e{i}"), *from, *to))
                .collect(),
        }
    }

    #[test]
    fn test_ports_and_case_are_ignored() {
        let adjacency = Adjacency::from_description(&description(
            &[("Rate", "const"), ("api", "service")],
            &[("rate:out", "API:in")],
        ));

        assert_eq!(adjacency.node_count(), 2);
        assert_eq!(adjacency.neighbors(0, Direction::Outgoing), vec![1]);
        assert_eq!(adjacency.neighbors(1, Direction::Incoming), vec![0]);
        assert_eq!(adjacency.edges[0].from, "Rate");
        assert_eq!(adjacency.edges[0].to, "api");
    }

    #[test]
    fn test_unknown_endpoint_drops_edge() {
        let adjacency = Adjacency::from_description(&description(
            &[("a", "service")],
            &[("a", "ghost"), ("ghost", "a")],
        ));

        assert_eq!(adjacency.edge_count(), 0);
        assert!(adjacency.neighbors(0, Direction::Outgoing).is_empty());
    }

    #[test]
    fn test_duplicate_id_keeps_first_ordinal() {
        let adjacency = Adjacency::from_description(&description(
            &[("a", "service"), ("b", "service"), ("A", "expr")],
            &[],
        ));

        assert_eq!(adjacency.node_count(), 2);
        assert_eq!(adjacency.slot(0).source, 2);
        assert_eq!(adjacency.category(0), NodeCategory::Expression);
    }

    #[test]
    fn test_parallel_edges_are_deduplicated() {
        let adjacency = Adjacency::from_description(&description(
            &[("a", "const"), ("b", "expr"), ("c", "service")],
            &[("a", "b"), ("a:x", "B:y"), ("b", "c"), ("a", "c")],
        ));

        assert_eq!(adjacency.edge_count(), 4);
        assert_eq!(adjacency.neighbors(0, Direction::Outgoing), vec![1, 2]);
        assert_eq!(adjacency.neighbors(2, Direction::Incoming), vec![0, 1]);
    }
}
