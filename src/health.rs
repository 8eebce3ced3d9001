//! Health Module
//!
//! Tracks hit points for living entities (the player and enemies).

use serde::{Deserialize, Serialize};

/// Hit point state for a living entity.
///
/// Healing saturates at `max`. Damage is *not* floored at zero: a total
/// below zero records overkill, and [`HealthState::is_alive`] only tests
/// whether the current total is positive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthState {
    max: i32,
    current: i32,
}

impl HealthState {
    /// Create a `HealthState` at full health.
    pub fn new_at_max(max: i32) -> HealthState {
        HealthState { max, current: max }
    }

    /// Get the maximum HP for this entity.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Get the current HP for this entity.
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Apply a signed HP change. Positive amounts heal, negative amounts
    /// damage. Only the upper bound is clamped.
    pub fn change(&mut self, amount: i32) {
        self.current = self.current.saturating_add(amount);
        if self.current > self.max {
            self.current = self.max;
        }
    }

    /// Drop straight to zero HP (or below, if already wounded).
    pub fn kill(&mut self) {
        self.change(-self.max);
    }

    /// Whether this entity is alive. Recomputed on every call, never cached.
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}
