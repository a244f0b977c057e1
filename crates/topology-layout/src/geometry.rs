use derive_more::Constructor;

/// Computed position of a node, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
    /// Horizontal ordering key, grows from left to right
    pub order_hint: i32,
}

impl LayoutPoint {
    /// Same point with another position, keeping the order hint
    pub fn moved_to(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }
}
