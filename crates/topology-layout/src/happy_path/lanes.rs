use super::{rounded_average, NodePlacement, PlacementState};
use crate::{LayoutConfig, Layers};
use std::collections::HashSet;
use tracing::trace;

/// Lanes handed to service chains with no placed predecessor
///
/// Yields 0, 1, -1, 2, -2, ... so that unrelated chains spread on both sides
/// of the first one.
#[derive(Debug, Default)]
struct ZigZag {
    step: i32,
}

impl Iterator for ZigZag {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let step = self.step;
        self.step += 1;
        Some(if step % 2 == 1 {
            (step + 1) / 2
        } else {
            -(step / 2)
        })
    }
}

/// Give every service node a lane, unique within its layer
pub(super) fn assign_lanes(layers: &Layers, config: &LayoutConfig, state: &mut PlacementState) {
    let mut services: Vec<usize> = (0..layers.len())
        .filter(|&n| layers.category(n).is_service())
        .collect();
    services.sort_by_key(|&n| (layers.layer[n], n));

    let mut seeds = ZigZag::default();
    let mut taken: HashSet<(usize, i32)> = HashSet::new();

    for node in services {
        let layer = layers.layer[node];
        let upstream: Vec<i32> = layers
            .inputs(node)
            .iter()
            .filter(|&&n| layers.category(n).is_service())
            .filter_map(|&n| state.lane(n))
            .collect();

        let candidate = match rounded_average(&upstream) {
            Some(lane) => lane,
            None => seeds.next().unwrap_or_default(),
        };
        let lane = free_lane(&taken, layer, candidate, config.lane_search_radius);
        taken.insert((layer, lane));

        state.set(
            node,
            NodePlacement {
                lane,
                column: None,
                x: f64::from(lane) * config.horizontal_spacing,
                y: layer as f64 * config.vertical_spacing,
                depth: layer as f64,
            },
        );
    }
}

/// Closest free lane around `candidate`, left before right at each distance
///
/// Falls back to sharing `candidate` when nothing is free within `radius`.
fn free_lane(taken: &HashSet<(usize, i32)>, layer: usize, candidate: i32, radius: i32) -> i32 {
    if !taken.contains(&(layer, candidate)) {
        return candidate;
    }

    for distance in 1..=radius {
        for lane in [candidate - distance, candidate + distance] {
            if !taken.contains(&(layer, lane)) {
                return lane;
            }
        }
    }

    trace!("No free lane within {radius} of {candidate} in layer {layer}, sharing it");
    candidate
}
