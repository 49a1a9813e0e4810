use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Per-logic-tick input intent, sampled by the host's input layer.
///
/// `*_pressed` / `*_released` are edge flags for this tick only; `*_held`
/// fields report the current level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct InputSnapshot {
    /// Movement stick/keys, components bounded to [-1, 1].
    pub movement: Vec2,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub run_held: bool,
    pub dash_pressed: bool,
}

impl InputSnapshot {
    /// Fold a newer sample into this one without losing edges.
    ///
    /// Continuous values (movement, held levels) take the newer sample; edge
    /// flags accumulate until [`clear_edges`](Self::clear_edges). Hosts that
    /// poll input faster than the logic tick use this so a press in between
    /// ticks is not overwritten by the next frame's release.
    pub fn accumulate(&mut self, newer: &InputSnapshot) {
        self.movement = newer.movement;
        self.jump_held = newer.jump_held;
        self.run_held = newer.run_held;
        if newer.jump_pressed {
            self.jump_pressed = true;
        }
        if newer.jump_released {
            self.jump_released = true;
        }
        if newer.dash_pressed {
            self.dash_pressed = true;
        }
    }

    /// Drop the edge flags after a logic tick has consumed them.
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.jump_released = false;
        self.dash_pressed = false;
    }
}
