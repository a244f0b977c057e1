//! Happy-path placement
//!
//! Service nodes form the backbone: each one gets a lane, a vertical track
//! shared with its service predecessors. Expression and constant nodes are
//! then packed into a small grid around the lane they feed, above their
//! dependents. Three passes finally fix what greedy placement gets wrong:
//! - elevation: supporting nodes stay clear above their dependents
//! - leaf alignment: nodes without dependents snap onto a lane
//! - collisions: supporting nodes sharing a band get distinct rows

mod auxiliary;
mod corrective;
mod lanes;

use crate::{LayoutConfig, LayoutPoint, Layers, Placement};
use std::cmp::Reverse;

/// Side of a lane an auxiliary node sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Auxiliary slot around a lane
///
/// A lane has five columns, the center one is reserved for the lane's own
/// service nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum GridColumn {
    LeftOuter,
    LeftInner,
    RightInner,
    RightOuter,
}

impl GridColumn {
    /// Slot 0 is the outer column of a side, slot 1 the inner one
    fn on(side: Side, slot: usize) -> Self {
        match (side, slot) {
            (Side::Left, 0) => GridColumn::LeftOuter,
            (Side::Left, _) => GridColumn::LeftInner,
            (Side::Right, 0) => GridColumn::RightOuter,
            (Side::Right, _) => GridColumn::RightInner,
        }
    }

    fn side(self) -> Side {
        match self {
            GridColumn::LeftOuter | GridColumn::LeftInner => Side::Left,
            GridColumn::RightInner | GridColumn::RightOuter => Side::Right,
        }
    }

    /// Horizontal offset from the lane, in lanes
    fn offset(self) -> i32 {
        match self {
            GridColumn::LeftOuter => -2,
            GridColumn::LeftInner => -1,
            GridColumn::RightInner => 1,
            GridColumn::RightOuter => 2,
        }
    }

    fn distance(self) -> f64 {
        f64::from(self.offset().abs())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NodePlacement {
    /// Lane of a service node, anchor lane of an auxiliary node
    pub lane: i32,
    /// `None` for service nodes
    pub column: Option<GridColumn>,
    pub x: f64,
    pub y: f64,
    /// Vertical position expressed in layers
    pub depth: f64,
}

/// Placements made so far, indexed by ordinal
#[derive(Debug, Clone)]
pub(crate) struct PlacementState {
    placed: Vec<Option<NodePlacement>>,
}

impl PlacementState {
    fn new(count: usize) -> Self {
        Self {
            placed: vec![None; count],
        }
    }

    fn get(&self, node: usize) -> Option<&NodePlacement> {
        self.placed[node].as_ref()
    }

    fn set(&mut self, node: usize, placement: NodePlacement) {
        self.placed[node] = Some(placement);
    }

    fn x(&self, node: usize) -> Option<f64> {
        self.get(node).map(|p| p.x)
    }

    fn y(&self, node: usize) -> Option<f64> {
        self.get(node).map(|p| p.y)
    }

    fn depth(&self, node: usize) -> Option<f64> {
        self.get(node).map(|p| p.depth)
    }

    fn lane(&self, node: usize) -> Option<i32> {
        self.get(node).map(|p| p.lane)
    }

    fn column(&self, node: usize) -> Option<GridColumn> {
        self.get(node).and_then(|p| p.column)
    }

    fn side(&self, node: usize) -> Option<Side> {
        self.column(node).map(GridColumn::side)
    }

    fn move_x(&mut self, node: usize, x: f64) {
        if let Some(placement) = self.placed[node].as_mut() {
            placement.x = x;
        }
    }

    fn move_y(&mut self, node: usize, y: f64, config: &LayoutConfig) {
        if let Some(placement) = self.placed[node].as_mut() {
            placement.y = y;
            placement.depth = y / config.vertical_spacing;
        }
    }

    /// Lowest y allowed for a node given its placed dependents
    fn ceiling(&self, layers: &Layers, config: &LayoutConfig, node: usize) -> Option<f64> {
        layers
            .outputs(node)
            .iter()
            .filter(|&&n| n != node)
            .filter_map(|&n| self.y(n))
            .min_by(f64::total_cmp)
            .map(|y| y - config.clearance())
    }

    fn into_points(self, config: &LayoutConfig) -> Vec<LayoutPoint> {
        self.placed
            .into_iter()
            .map(|placement| {
                placement.map_or(LayoutPoint::new(0.0, 0.0, 0), |p| {
                    let column = (p.x / config.horizontal_spacing).round() as i32;
                    LayoutPoint::new(p.x, p.y, column * 10)
                })
            })
            .collect()
    }
}

/// Expression and constant nodes, deepest layer first then by ordinal
fn auxiliary_order(layers: &Layers) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layers.len())
        .filter(|&n| layers.category(n).is_auxiliary())
        .collect();
    order.sort_by_key(|&n| (Reverse(layers.layer[n]), n));
    order
}

/// Average rounded half away from zero, `None` when empty
fn rounded_average(values: &[i32]) -> Option<i32> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
    Some((sum as f64 / values.len() as f64).round() as i32)
}

/// Lane-based placement privileging service nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct HappyPathPlacement;

impl Placement for HappyPathPlacement {
    fn place(&self, layers: &Layers, config: &LayoutConfig) -> Vec<LayoutPoint> {
        let mut state = PlacementState::new(layers.len());
        let order = auxiliary_order(layers);

        lanes::assign_lanes(layers, config, &mut state);
        auxiliary::place_auxiliary(layers, config, &order, &mut state);

        corrective::enforce_elevation(layers, config, &order, &mut state);
        corrective::align_leaves(layers, config, &mut state);
        corrective::resolve_collisions(layers, config, &mut state);

        state.into_points(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_average() {
        assert_eq!(rounded_average(&[]), None);
        assert_eq!(rounded_average(&[0, 1]), Some(1));
        assert_eq!(rounded_average(&[0, -1]), Some(-1));
        assert_eq!(rounded_average(&[-2, 1, 4]), Some(1));
    }

    #[test]
    fn test_columns() {
        assert_eq!(GridColumn::on(Side::Left, 0), GridColumn::LeftOuter);
        assert_eq!(GridColumn::on(Side::Left, 1), GridColumn::LeftInner);
        assert_eq!(GridColumn::on(Side::Right, 0), GridColumn::RightOuter);
        assert_eq!(GridColumn::on(Side::Right, 1), GridColumn::RightInner);

        assert_eq!(GridColumn::LeftOuter.offset(), -2);
        assert_eq!(GridColumn::RightInner.offset(), 1);
        assert_eq!(GridColumn::RightOuter.side(), Side::Right);
        assert_eq!(GridColumn::LeftInner.distance(), 1.0);
        assert_eq!(Side::Left.opposite(), Side::Right);
    }
}
