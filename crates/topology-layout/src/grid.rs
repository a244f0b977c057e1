use crate::{LayoutConfig, LayoutPoint, Layers, Placement};

/// Plain grid: one row per layer, nodes side by side in layer order
///
/// Expression and constant nodes are packed tighter than services.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridPlacement;

impl Placement for GridPlacement {
    fn place(&self, layers: &Layers, config: &LayoutConfig) -> Vec<LayoutPoint> {
        (0..layers.len())
            .map(|node| {
                let index = layers.index[node];
                let spacing = config.grid_spacing(layers.category(node));
                LayoutPoint::new(
                    index as f64 * spacing,
                    layers.layer[node] as f64 * config.vertical_spacing,
                    index as i32,
                )
            })
            .collect()
    }
}
