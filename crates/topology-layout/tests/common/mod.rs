#![allow(dead_code)]

use topology_layout::{GraphDescription, GraphEdge, GraphNode};

pub fn graph(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> GraphDescription {
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

/// Small deterministic generator, good enough to shuffle test graphs
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

/// A random DAG mixing the three kinds, listed in shuffled order
///
/// Edges always go from a lower to a higher rank, so the graph is acyclic
/// whatever the listing order.
pub fn random_dag(seed: u64) -> GraphDescription {
    let mut rng = Lcg::new(seed);
    let count = 4 + rng.below(12) as usize;

    let mut nodes: Vec<GraphNode> = (0..count)
        .map(|rank| {
            let kind = match rng.below(3) {
                0 => "service",
                1 => "expr",
                _ => "const",
            };
            GraphNode::new(format!("n{rank}"), kind)
        })
        .collect();

    let mut edges = Vec::new();
    for to in 1..count {
        for _ in 0..rng.below(3) {
            let from = rng.below(to as u64) as usize;
            let port = if rng.below(2) == 0 { ":out" } else { "" };
            edges.push(GraphEdge::new(
                format!("e{}", edges.len()),
                format!("n{from}{port}"),
                format!("N{to}"),
            ));
        }
    }

    for i in (1..nodes.len()).rev() {
        let j = rng.below(i as u64 + 1) as usize;
        nodes.swap(i, j);
    }

    GraphDescription { nodes, edges }
}
