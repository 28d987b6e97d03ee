//! Loader progress meter
//!
//! Cosmetic progress that creeps toward 100% in random steps.

use rand::Rng;

use crate::error::{AnimationError, Result};

/// Completion value
pub const PROGRESS_MAX: f32 = 100.0;

/// Monotonic progress value clamped to `0..=100`
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressMeter {
    value: f32,
    max_increment: f32,
}

impl ProgressMeter {
    /// Create a meter whose random steps fall in `[0, max_increment)`
    pub fn new(max_increment: f32) -> Result<Self> {
        if !max_increment.is_finite() || max_increment <= 0.0 {
            return Err(AnimationError::InvalidIncrement(max_increment));
        }
        Ok(Self {
            value: 0.0,
            max_increment,
        })
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_complete(&self) -> bool {
        self.value >= PROGRESS_MAX
    }

    /// Add a fixed increment; negative increments are ignored
    pub fn advance(&mut self, increment: f32) -> f32 {
        if increment.is_finite() && increment > 0.0 {
            self.value = (self.value + increment).min(PROGRESS_MAX);
        }
        self.value
    }

    /// Add a random increment in `[0, max_increment)`
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f32 {
        let increment = rng.gen_range(0.0..self.max_increment);
        self.advance(increment)
    }

    /// CSS width for the progress fill, e.g. `42.5%`
    pub fn css_width(&self) -> String {
        format!("{}%", self.value)
    }
}
