// Countdown and periodic timers used by the actor and enemy state machines.
//
// All countdowns clamp at zero and never go negative, so an expired gate
// stays expired until it is explicitly re-armed.

/// Decrement `timer` by `dt`, clamped at zero.
///
/// Returns `true` only on the tick where the timer crosses from positive to
/// zero, so callers can react to expiry exactly once.
pub fn countdown(timer: &mut f32, dt: f32) -> bool {
    if *timer <= 0.0 {
        *timer = 0.0;
        return false;
    }
    *timer = (*timer - dt).max(0.0);
    *timer == 0.0
}

/// Repeating timer that fires every `period` seconds.
///
/// Overflow is carried into the next period (`elapsed -= period`) so the
/// average rate does not depend on the frame delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub period: f32,
    pub elapsed: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Interval {
            period,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`, returning how many periods completed.
    ///
    /// A non-positive period never fires.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
