use crate::{LayoutPoint, Layers};
use topology_model::{GraphDescription, Topology, TopologyNode};

/// Merge layers and points back into topology nodes
///
/// Nodes come out sorted by layer then index. Positions pinned in the
/// description replace computed ones when `respect_ui_positions` is set.
pub(crate) fn assemble<S: Clone>(
    description: &GraphDescription<S>,
    layers: &Layers,
    points: &[LayoutPoint],
    respect_ui_positions: bool,
) -> Topology<S> {
    let id_of = |node: usize| description.nodes[layers.adjacency.slot(node).source].id.clone();

    let mut order: Vec<usize> = (0..layers.len()).collect();
    order.sort_by_key(|&n| (layers.layer[n], layers.index[n]));

    let nodes = order
        .into_iter()
        .map(|node| {
            let source = &description.nodes[layers.adjacency.slot(node).source];
            let point = points[node];
            let pinned = source.ui.filter(|_| respect_ui_positions);
            let point = pinned.map_or(point, |ui| point.moved_to(ui.x, ui.y));

            TopologyNode {
                id: source.id.clone(),
                kind: layers.category(node),
                inputs: layers.inputs(node).iter().map(|&n| id_of(n)).collect(),
                outputs: layers.outputs(node).iter().map(|&n| id_of(n)).collect(),
                layer: layers.layer[node],
                index: layers.index[node],
                x: point.x,
                y: point.y,
                order_hint: point.order_hint,
                is_position_fixed: pinned.is_some(),
                semantics: source.semantics.clone(),
            }
        })
        .collect();

    Topology {
        nodes,
        edges: layers.adjacency.edges.clone(),
    }
}
