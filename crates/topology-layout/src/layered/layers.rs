use crate::intake::Adjacency;
use petgraph::Direction;
use std::collections::VecDeque;
use tracing::trace;

/// Assign layers to nodes with a breadth-first topological sweep
///
/// Roots are seeded in ordinal order. Each node sits at least one layer
/// below every predecessor popped before it. Members of a cycle never reach
/// in-degree zero, they keep the layer accumulated so far (0 if none) and do
/// not push their successors further down.
pub(crate) fn assign_layers(adjacency: &Adjacency) -> Vec<usize> {
    let count = adjacency.node_count();
    let mut in_degree: Vec<usize> = (0..count)
        .map(|node| adjacency.neighbors(node, Direction::Incoming).len())
        .collect();
    let mut layers = vec![0i64; count];

    let mut queue: VecDeque<usize> = (0..count).filter(|&n| in_degree[n] == 0).collect();
    while let Some(node) = queue.pop_front() {
        let next = layers[node] + 1;
        for succ in adjacency.neighbors(node, Direction::Outgoing) {
            layers[succ] = layers[succ].max(next);
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                queue.push_back(succ);
            }
        }
    }

    let unresolved: Vec<usize> = (0..count).filter(|&n| in_degree[n] > 0).collect();
    if !unresolved.is_empty() {
        trace!("Nodes left in cycles, layering is partial: {unresolved:?}");
    }

    normalize_layers(&layers)
}

/// Shift layers so that the smallest one is 0 when any is negative
fn normalize_layers(layers: &[i64]) -> Vec<usize> {
    let min = layers.iter().copied().min().unwrap_or(0);
    let offset = if min < 0 { -min } else { 0 };
    layers.iter().map(|&l| (l + offset) as usize).collect()
}

/// Index of each node within its layer, in ordinal order
pub(crate) fn assign_indices(layers: &[usize]) -> (Vec<usize>, Vec<Vec<usize>>) {
    let layer_count = layers.iter().max().map_or(0, |&max| max + 1);
    let mut nodes: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    let mut indices = vec![0; layers.len()];

    for (node, &layer) in layers.iter().enumerate() {
        indices[node] = nodes[layer].len();
        nodes[layer].push(node);
    }

    (indices, nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use topology_model::{GraphDescription, GraphEdge, GraphNode};

    fn adjacency(ids: &[&str], edges: &[(&str, &str)]) -> Adjacency {
        let description: GraphDescription = GraphDescription {
            nodes: ids.iter().map(|id| GraphNode::new(*id, "service")).collect(),
            edges: edges
                .iter()
                .map(|(from, to)| GraphEdge::new(format!("{from}-{to}"), *from, *to))
                .collect(),
        };
        Adjacency::from_description(&description)
    }

    #[test]
    fn test_chain() {
        let layers = assign_layers(&adjacency(&["a", "b", "c"], &[("a", "b"), ("b", "c")]));
        assert_eq!(layers, vec![0, 1, 2]);
    }

    #[test]
    fn test_longest_path_wins() {
        // a -> b -> c and a -> c: c sits below b
        let layers = assign_layers(&adjacency(
            &["c", "b", "a"],
            &[("a", "b"), ("b", "c"), ("a", "c")],
        ));
        assert_eq!(layers, vec![2, 1, 0]);
    }

    #[test]
    fn test_cycle_keeps_partial_layers() {
        // root -> x <-> y, x gets relaxed once, y is never reached
        let layers = assign_layers(&adjacency(
            &["root", "x", "y", "alone"],
            &[("root", "x"), ("x", "y"), ("y", "x")],
        ));
        assert_eq!(layers, vec![0, 1, 0, 0]);
    }

    #[test]
    fn test_self_loop() {
        let layers = assign_layers(&adjacency(&["a", "b"], &[("a", "a"), ("a", "b")]));
        assert_eq!(layers, vec![0, 0]);
    }

    #[test]
    fn test_normalize_negative() {
        assert_eq!(normalize_layers(&[-2, 0, 1]), vec![0, 2, 3]);
        assert_eq!(normalize_layers(&[0, 3]), vec![0, 3]);
        assert!(normalize_layers(&[]).is_empty());
    }

    #[test]
    fn test_indices_follow_ordinal() {
        let (indices, nodes) = assign_indices(&[1, 0, 1, 0, 2]);
        assert_eq!(indices, vec![0, 0, 1, 1, 0]);
        assert_eq!(nodes, vec![vec![1, 3], vec![0, 2], vec![4]]);
    }
}
