//! Per-frame input snapshot supplied by the host

use glam::IVec2;

use crate::sim::Direction;

/// Input commands for a single frame (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Directional key pressed this frame (edge-triggered)
    pub pressed: Option<Direction>,
    /// Directional keys currently held (fractal cursor nudging)
    pub held: Vec<Direction>,
    /// Coarse modifier held (larger cursor nudges)
    pub coarse: bool,
    /// Confirm pressed this frame (start from menu, leave lose screen)
    pub confirm: bool,
    /// Quit pressed this frame
    pub quit: bool,
    /// Pointer position in field pixels, if the pointer is over the field
    pub pointer: Option<IVec2>,
    /// Primary pointer button pressed this frame
    pub click: bool,
}

impl FrameInput {
    /// Input with only a directional press
    pub fn press(direction: Direction) -> Self {
        Self {
            pressed: Some(direction),
            ..Default::default()
        }
    }

    /// Input with only a pointer click at `pos`
    pub fn click_at(pos: IVec2) -> Self {
        Self {
            pointer: Some(pos),
            click: true,
            ..Default::default()
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }
}
