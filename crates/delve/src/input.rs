//! # Input Intent
//!
//! The input collaborator aggregates keyboard, touch and gamepad into one
//! resolved intent per tick. The simulation never sees raw devices.

/// Resolved per-tick input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputIntent {
    /// Forward (+) / backward (-), in `[-1, 1]`.
    pub forward: f32,
    /// Right (+) / left (-), in `[-1, 1]`.
    pub strafe: f32,
    /// Turn rate, left (+) / right (-), in `[-1, 1]`. Scaled by `ROT_SPEED`.
    pub turn: f32,
    /// Horizontal look delta this tick (mouse pixels or stick units).
    pub look_x: f32,
    /// Vertical look delta this tick.
    pub look_y: f32,
    /// Fire button held.
    pub fire: bool,
    /// Interact pressed.
    pub interact: bool,
    /// Spell switch steps: `+1` next, `-1` previous, `0` none.
    pub switch_spell: i32,
}

impl InputIntent {
    /// No input at all.
    pub const IDLE: Self = Self {
        forward: 0.0,
        strafe: 0.0,
        turn: 0.0,
        look_x: 0.0,
        look_y: 0.0,
        fire: false,
        interact: false,
        switch_spell: 0,
    };

    /// Clamps axes into range and zeroes non-finite values.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            forward: axis(self.forward),
            strafe: axis(self.strafe),
            turn: axis(self.turn),
            look_x: finite(self.look_x),
            look_y: finite(self.look_y),
            ..self
        }
    }

    /// Returns true if the intent asks for any movement.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.forward != 0.0 || self.strafe != 0.0
    }

    /// Intent that walks forward.
    #[must_use]
    pub const fn walk(forward: f32, strafe: f32) -> Self {
        Self { forward, strafe, ..Self::IDLE }
    }

    /// Intent that holds the fire button.
    #[must_use]
    pub const fn firing() -> Self {
        Self { fire: true, ..Self::IDLE }
    }

    /// Intent that presses interact.
    #[must_use]
    pub const fn interacting() -> Self {
        Self { interact: true, ..Self::IDLE }
    }
}

fn axis(v: f32) -> f32 {
    finite(v).clamp(-1.0, 1.0)
}

fn finite(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_axes() {
        let intent = InputIntent {
            forward: 3.0,
            strafe: -7.0,
            turn: f32::NAN,
            look_x: f32::INFINITY,
            look_y: 12.0,
            ..InputIntent::IDLE
        }
        .sanitized();

        assert_eq!(intent.forward, 1.0);
        assert_eq!(intent.strafe, -1.0);
        assert_eq!(intent.turn, 0.0);
        assert_eq!(intent.look_x, 0.0);
        assert_eq!(intent.look_y, 12.0);
    }

    #[test]
    fn test_is_moving() {
        assert!(!InputIntent::IDLE.is_moving());
        assert!(InputIntent::walk(0.0, 0.5).is_moving());
        assert!(!InputIntent::firing().is_moving());
    }
}
