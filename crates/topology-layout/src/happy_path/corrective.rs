use super::PlacementState;
use crate::{LayoutConfig, Layers};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::trace;

/// Lift every supporting node clear above its dependents
///
/// `order` lists auxiliary nodes deepest first. Nodes without dependents are
/// left alone and may hang below the backbone.
pub(super) fn enforce_elevation(
    layers: &Layers,
    config: &LayoutConfig,
    order: &[usize],
    state: &mut PlacementState,
) {
    for &node in order {
        let (Some(limit), Some(y)) = (state.ceiling(layers, config, node), state.y(node)) else {
            continue;
        };
        if y > limit {
            trace!("Lifting node {node} from {y} to {limit}");
            state.move_y(node, limit, config);
        }
    }
}

fn is_leaf(layers: &Layers, node: usize) -> bool {
    layers.category(node).is_auxiliary() && layers.outputs(node).is_empty()
}

/// Snap auxiliary leaves onto the service lanes
///
/// Each leaf goes to the nearest lane. Leaves competing for the same lane
/// are dealt round-robin over all lanes, starting from that one.
pub(super) fn align_leaves(layers: &Layers, config: &LayoutConfig, state: &mut PlacementState) {
    let lanes: BTreeSet<i32> = (0..layers.len())
        .filter(|&n| layers.category(n).is_service())
        .filter_map(|n| state.lane(n))
        .collect();
    let lane_xs: Vec<f64> = lanes
        .iter()
        .map(|&lane| f64::from(lane) * config.horizontal_spacing)
        .collect();
    if lane_xs.is_empty() {
        return;
    }

    let mut dealt: HashMap<usize, usize> = HashMap::new();
    for leaf in (0..layers.len()).filter(|&n| is_leaf(layers, n)) {
        let Some(x) = state.x(leaf) else {
            continue;
        };
        let nearest = nearest_lane(&lane_xs, x);
        let count = dealt.entry(nearest).or_insert(0);
        let lane = (nearest + *count) % lane_xs.len();
        *count += 1;
        state.move_x(leaf, lane_xs[lane]);
    }
}

/// Index of the closest x, the smaller one on ties
fn nearest_lane(lane_xs: &[f64], x: f64) -> usize {
    let mut best = 0;
    for (index, &lane_x) in lane_xs.iter().enumerate().skip(1) {
        if (lane_x - x).abs() < (lane_xs[best] - x).abs() {
            best = index;
        }
    }
    best
}

/// Give supporting nodes of a same band distinct rows
///
/// Nodes are visited from the bottom up. A node keeps its position when its
/// row is free and otherwise climbs to the nearest free row above, so it
/// never moves closer to its dependents, which are settled before it.
pub(super) fn resolve_collisions(
    layers: &Layers,
    config: &LayoutConfig,
    state: &mut PlacementState,
) {
    let row_height = config.row_height();
    let mut supporting: Vec<usize> = (0..layers.len())
        .filter(|&n| layers.category(n).is_auxiliary() && !layers.outputs(n).is_empty())
        .collect();
    supporting.sort_by(|&a, &b| {
        let ya = state.y(a).unwrap_or_default();
        let yb = state.y(b).unwrap_or_default();
        yb.total_cmp(&ya).then(a.cmp(&b))
    });

    let mut bands: HashMap<i64, HashSet<i64>> = HashMap::new();
    for node in supporting {
        let Some(placement) = state.get(node).copied() else {
            continue;
        };

        let mut y = placement.y;
        if let Some(limit) = state.ceiling(layers, config, node) {
            y = y.min(limit);
        }

        let band = (placement.x / config.horizontal_spacing).round() as i64;
        let occupied = bands.entry(band).or_default();
        let desired = (y / row_height).round() as i64;
        let mut row = desired;
        while occupied.contains(&row) {
            row -= 1;
        }
        occupied.insert(row);

        if row != desired {
            trace!("Node {node} collides in band {band}, moving from row {desired} to {row}");
            y = row as f64 * row_height;
        }
        if y != placement.y {
            state.move_y(node, y, config);
        }
    }
}
