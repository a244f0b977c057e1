use crate::{LayoutConfig, LayoutPoint, Layers};

/// A strategy turning layers into node positions
///
/// Both built-in placements, [`GridPlacement`](crate::GridPlacement) and
/// [`HappyPathPlacement`](crate::HappyPathPlacement), consume the same
/// [`Layers`]. Other strategies can be plugged in through
/// [`TopologyLayout::build_with`](crate::TopologyLayout::build_with).
pub trait Placement {
    /// Compute one point per node, indexed by ordinal
    ///
    /// Must be deterministic: the same layers and configuration always give
    /// the same points.
    fn place(&self, layers: &Layers, config: &LayoutConfig) -> Vec<LayoutPoint>;
}
