//! Fixed grid layout for displays and their resistor fan-out.

/// Resistors consumed from the sorted resistor list per display.
pub const RESISTORS_PER_DISPLAY: usize = 15;

/// Relative (dx, dy, rotation) of each resistor slot around its display.
///
/// Slot order matches the order resistors are consumed in, and the rotation
/// replaces whatever the resistor had before.
pub const RESISTOR_OFFSETS: [(f64, f64, f64); RESISTORS_PER_DISPLAY] = [
    (-5.7, -4.0, 90.0),
    (-5.7, -1.4, 90.0),
    (-5.7, 1.2, -90.0),
    (-5.7, 3.8, -90.0),
    (-5.7, 6.5, -90.0),
    (-5.7, -9.2, 90.0),
    (-5.7, -6.6, 90.0),
    (-2.5, -11.0, 0.0),
    (1.5, -11.0, 0.0),
    (3.9, -11.0, 0.0),
    (1.3, 10.9, 0.0),
    (-1.0, 10.9, 0.0),
    (-3.3, 10.9, 0.0),
    (-5.7, 9.2, -190.0),
    (3.7, 10.9, 180.0),
];

/// The linear grid displays are placed on: a fixed row at `start_y`, one
/// display every `spacing` millimeters starting from `start_x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPolicy {
    pub start_x: f64,
    pub start_y: f64,
    pub spacing: f64,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            start_x: 5.7,
            start_y: 199.1,
            spacing: 11.4,
        }
    }
}

impl LayoutPolicy {
    /// Position of the display at `index` in sorted order.
    pub fn display_position(&self, index: usize) -> (f64, f64) {
        (self.start_x + index as f64 * self.spacing, self.start_y)
    }

    /// Position and rotation of resistor `slot` belonging to a display placed
    /// at `display_x`. `None` when the slot is beyond the offset table.
    pub fn resistor_position(&self, display_x: f64, slot: usize) -> Option<(f64, f64, f64)> {
        let (dx, dy, rot) = RESISTOR_OFFSETS.get(slot).copied()?;
        Some((display_x + dx, self.start_y + dy, rot))
    }
}
