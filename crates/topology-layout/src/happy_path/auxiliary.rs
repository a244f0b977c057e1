use super::{rounded_average, GridColumn, NodePlacement, PlacementState, Side};
use crate::{LayoutConfig, Layers};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Auxiliary columns available on each side of a lane
const SLOTS_PER_SIDE: usize = 2;

/// Place expression and constant nodes around the service lanes
///
/// `order` must list auxiliary nodes deepest first, so that a node's
/// auxiliary dependents are already placed when it is visited.
pub(super) fn place_auxiliary(
    layers: &Layers,
    config: &LayoutConfig,
    order: &[usize],
    state: &mut PlacementState,
) {
    let max_service_layer = layers.max_service_layer().unwrap_or(0) as f64;
    let row_height = config.row_height();
    let mut columns = ColumnAllocator::default();
    let mut rows = RowAllocator::default();

    for &node in order {
        let voted = vote_side(layers, state, node);
        let lane = anchor_lane(layers, state, node);
        let column =
            sibling_column(layers, state, node).unwrap_or_else(|| columns.allocate(lane, voted));
        columns.occupy(lane, column);

        let target = vertical_target(layers, config, state, node, column, max_service_layer);
        let preferred = (target * config.vertical_spacing / row_height).round().max(0.0) as i64;
        let max_row = state
            .ceiling(layers, config, node)
            .map(|y| (y / row_height).floor() as i64);
        let row = rows.allocate(lane, column, preferred, max_row);

        let y = row as f64 * row_height;
        trace!("Auxiliary node {node}: lane {lane}, {column:?}, row {row}");
        state.set(
            node,
            NodePlacement {
                lane,
                column: Some(column),
                x: f64::from(lane + column.offset()) * config.horizontal_spacing,
                y,
                depth: y / config.vertical_spacing,
            },
        );
    }
}

/// Majority side of placed auxiliary neighbors, ties go left
fn majority(sides: impl Iterator<Item = Side>) -> Option<Side> {
    let (mut left, mut right) = (0, 0);
    for side in sides {
        match side {
            Side::Left => left += 1,
            Side::Right => right += 1,
        }
    }
    match (left, right) {
        (0, 0) => None,
        (left, right) if right > left => Some(Side::Right),
        _ => Some(Side::Left),
    }
}

fn vote_side(layers: &Layers, state: &PlacementState, node: usize) -> Side {
    let outputs = layers.outputs(node);
    let inputs = layers.inputs(node);

    majority(outputs.iter().filter_map(|&n| state.side(n)))
        .or_else(|| majority(inputs.iter().filter_map(|&n| state.side(n))))
        .unwrap_or_else(|| {
            let feeds_service = outputs.iter().any(|&n| layers.category(n).is_service());
            let fed_by_service = inputs.iter().any(|&n| layers.category(n).is_service());
            if !feeds_service && fed_by_service {
                Side::Right
            } else {
                Side::Left
            }
        })
}

/// Lane the node gathers around: its service dependents, else its service
/// sources, else lane 0
fn anchor_lane(layers: &Layers, state: &PlacementState, node: usize) -> i32 {
    let service_lanes = |neighbors: &[usize]| -> Vec<i32> {
        neighbors
            .iter()
            .filter(|&&n| layers.category(n).is_service())
            .filter_map(|&n| state.lane(n))
            .collect()
    };

    rounded_average(&service_lanes(layers.outputs(node)))
        .or_else(|| rounded_average(&service_lanes(layers.inputs(node))))
        .unwrap_or(0)
}

/// Column of a placed auxiliary node feeding one of the same dependents
fn sibling_column(layers: &Layers, state: &PlacementState, node: usize) -> Option<GridColumn> {
    layers
        .outputs(node)
        .iter()
        .flat_map(|&target| layers.inputs(target).iter())
        .filter(|&&sibling| sibling != node && layers.category(sibling).is_auxiliary())
        .find_map(|&sibling| state.column(sibling))
}

/// Vertical target of a node, in layers
///
/// Service neighbors are always placed by now, so the own-layer fallback is
/// only kept for completeness. A node whose neighbors are all unplaced
/// auxiliary nodes sits below the deepest service layer.
fn vertical_target(
    layers: &Layers,
    config: &LayoutConfig,
    state: &PlacementState,
    node: usize,
    column: GridColumn,
    max_service_layer: f64,
) -> f64 {
    let distance = column.distance();
    let inputs = layers.inputs(node);
    let outputs = layers.outputs(node);

    let downstream = outputs
        .iter()
        .filter(|&&n| n != node)
        .filter_map(|&n| state.depth(n))
        .min_by(f64::total_cmp);
    if let Some(depth) = downstream {
        return depth - (config.downstream_gap + config.downstream_gap_per_column * distance);
    }

    let upstream = inputs
        .iter()
        .filter(|&&n| n != node)
        .filter_map(|&n| state.depth(n))
        .max_by(f64::total_cmp);
    if let Some(depth) = upstream {
        return depth + config.upstream_gap + config.upstream_gap_per_column * distance;
    }

    if inputs.is_empty() && outputs.is_empty() {
        return max_service_layer + config.isolated_gap + config.fallback_gap_per_column * distance;
    }

    let only_services = inputs
        .iter()
        .chain(outputs)
        .all(|&n| layers.category(n).is_service());
    if only_services {
        layers.layer[node] as f64
    } else {
        max_service_layer + config.detached_gap + config.fallback_gap_per_column * distance
    }
}

/// Auxiliary nodes per side of each lane
#[derive(Debug, Default)]
struct ColumnAllocator {
    occupancy: HashMap<(i32, Side), usize>,
}

impl ColumnAllocator {
    fn count(&self, lane: i32, side: Side) -> usize {
        self.occupancy.get(&(lane, side)).copied().unwrap_or(0)
    }

    /// Pick a column on the emptier side of the lane
    ///
    /// Ties go left. A full side hands over to the other one, and when both
    /// are full the voted side is kept.
    fn allocate(&self, lane: i32, voted: Side) -> GridColumn {
        let left = self.count(lane, Side::Left);
        let right = self.count(lane, Side::Right);
        let mut side = if right < left { Side::Right } else { Side::Left };

        if self.count(lane, side) >= SLOTS_PER_SIDE {
            side = if self.count(lane, side.opposite()) < SLOTS_PER_SIDE {
                side.opposite()
            } else {
                voted
            };
        }

        GridColumn::on(side, self.count(lane, side).min(1))
    }

    fn occupy(&mut self, lane: i32, column: GridColumn) {
        *self.occupancy.entry((lane, column.side())).or_insert(0) += 1;
    }
}

/// Occupied rows of each (lane, column) bucket
#[derive(Debug, Default)]
struct RowAllocator {
    buckets: HashMap<(i32, GridColumn), HashSet<i64>>,
}

impl RowAllocator {
    /// Reserve the row closest to `preferred` in a bucket
    ///
    /// `max_row` is the deepest row keeping clear of the node's dependents.
    fn allocate(
        &mut self,
        lane: i32,
        column: GridColumn,
        preferred: i64,
        max_row: Option<i64>,
    ) -> i64 {
        let occupied = self.buckets.entry((lane, column)).or_default();
        let row = first_free_row(occupied, preferred, max_row);
        occupied.insert(row);
        row
    }
}

/// Search down from `preferred` to row 0, then up to `max_row`, then past it
fn first_free_row(occupied: &HashSet<i64>, preferred: i64, max_row: Option<i64>) -> i64 {
    let is_free = |row: &i64| !occupied.contains(row);
    let start = max_row.map_or(preferred, |max| preferred.min(max)).max(0);

    if let Some(row) = (0..=start).rev().find(is_free) {
        return row;
    }

    let upper = max_row.unwrap_or(i64::MAX);
    if let Some(row) = (start..=upper).find(is_free) {
        return row;
    }

    let past = max_row.map_or(start, |max| max + 1).max(0);
    trace!("No free row up to {upper}, settling past it");
    (past..).find(is_free).unwrap_or(past)
}
