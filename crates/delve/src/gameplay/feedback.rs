//! Timed hit feedback.
//!
//! `Normal -> Flashing { until } -> Normal`, evaluated against the
//! simulation clock during the render step.

/// Visual feedback state of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Feedback {
    /// Base look.
    #[default]
    Normal,
    /// Showing hit feedback until the simulation clock reaches `until`.
    Flashing {
        /// Simulation time (seconds) at which the flash ends.
        until: f64,
    },
}

impl Feedback {
    /// Starts (or restarts) a flash lasting `duration` from `now`.
    pub fn trigger(&mut self, now: f64, duration: f64) {
        *self = Self::Flashing { until: now + duration };
    }

    /// Reverts to `Normal` once the flash has run out.
    pub fn update(&mut self, now: f64) {
        if let Self::Flashing { until } = *self {
            if now >= until {
                *self = Self::Normal;
            }
        }
    }

    /// Returns true while flashing.
    #[inline]
    #[must_use]
    pub const fn is_flashing(&self) -> bool {
        matches!(self, Self::Flashing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_cycle() {
        let mut fb = Feedback::default();
        assert!(!fb.is_flashing());

        fb.trigger(1.0, 0.1);
        fb.update(1.05);
        assert!(fb.is_flashing());

        fb.update(1.15);
        assert_eq!(fb, Feedback::Normal);
    }

    #[test]
    fn test_retrigger_extends() {
        let mut fb = Feedback::default();
        fb.trigger(0.0, 0.1);
        fb.trigger(0.08, 0.1);
        fb.update(0.12);
        assert!(fb.is_flashing());
    }
}
