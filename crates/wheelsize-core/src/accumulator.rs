//! Wheel delta accumulation.
//!
//! High-resolution wheels report many small deltas per physical detent. The
//! accumulator buffers them until a full notch is reached so one resize step
//! corresponds to one logical tick.

/// Delta units in one standard wheel notch.
pub const WHEEL_DELTA: i32 = 120;

/// Whether a partial tick is currently buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccumulatorState {
    /// Nothing buffered.
    #[default]
    Idle,
    /// A partial tick is waiting for more delta.
    Accumulating,
}

/// Buffers sub-notch wheel deltas until a full tick is reached.
#[derive(Debug, Clone, Default)]
pub struct WheelAccumulator {
    accumulated: i32,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wheel delta (positive = away from the user).
    ///
    /// Returns the signed number of whole ticks once the buffered magnitude
    /// reaches [`WHEEL_DELTA`]. Only the whole ticks are taken out; a
    /// sub-tick remainder stays buffered for the next event. Returns `None`
    /// while the buffer is still below one tick.
    pub fn accumulate(&mut self, delta: i32) -> Option<i32> {
        self.accumulated = self.accumulated.saturating_add(delta);
        if self.accumulated.unsigned_abs() < WHEEL_DELTA.unsigned_abs() {
            return None;
        }

        let ticks = self.accumulated / WHEEL_DELTA;
        self.accumulated %= WHEEL_DELTA;
        Some(ticks)
    }

    /// The delta buffered since the last tick.
    pub fn pending(&self) -> i32 {
        self.accumulated
    }

    pub fn state(&self) -> AccumulatorState {
        if self.accumulated == 0 {
            AccumulatorState::Idle
        } else {
            AccumulatorState::Accumulating
        }
    }
}
