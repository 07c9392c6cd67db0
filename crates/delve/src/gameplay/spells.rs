//! Spell selection, fire debounce and cooldown.

/// Per-player spell state.
///
/// Firing needs a fresh press of the fire button (holding it fires once)
/// and an elapsed cooldown from the previous cast.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpellBook {
    selected: usize,
    fire_held: bool,
    cooldown_remaining: f32,
}

impl SpellBook {
    /// Index of the selected spell.
    #[inline]
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Seconds until the next cast is allowed.
    #[inline]
    #[must_use]
    pub const fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Returns true while the fire button is held from a previous tick.
    #[inline]
    #[must_use]
    pub const fn fire_held(&self) -> bool {
        self.fire_held
    }

    /// Moves the selection by `step`, wrapping around `count` spells.
    ///
    /// # Returns
    ///
    /// The new index. With no spells the selection stays at 0.
    pub fn cycle(&mut self, step: i32, count: usize) -> usize {
        if count == 0 {
            self.selected = 0;
            return 0;
        }
        let count = count as i64;
        let next = (self.selected as i64 + i64::from(step)).rem_euclid(count);
        self.selected = next as usize;
        self.selected
    }

    /// Counts the cooldown down.
    pub fn tick(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
    }

    /// Feeds this tick's fire button.
    ///
    /// # Returns
    ///
    /// `true` if a cast should happen now. The caller then reports the
    /// spell's cooldown through [`SpellBook::start_cooldown`].
    pub fn trigger(&mut self, fire_pressed: bool) -> bool {
        let rising = fire_pressed && !self.fire_held;
        self.fire_held = fire_pressed;
        rising && self.cooldown_remaining <= 0.0
    }

    /// Starts the cooldown of the spell just cast.
    pub fn start_cooldown(&mut self, seconds: f32) {
        self.cooldown_remaining = seconds.max(0.0);
    }
}
