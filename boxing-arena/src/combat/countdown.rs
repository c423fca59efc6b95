//! Pre-fight countdown ("3, 2, 1, FIGHT!")

use crate::config::CountdownConfig;

#[derive(Clone, Debug)]
pub struct Countdown {
    steps: u32,
    step_ms: f64,
    elapsed: f64,
}

impl Countdown {
    pub fn new(config: &CountdownConfig) -> Self {
        Self {
            steps: config.steps,
            step_ms: config.step_ms,
            elapsed: 0.0,
        }
    }

    /// Advance by `delta` ms. Returns true on the tick that finishes it.
    pub fn tick(&mut self, delta: f64) -> bool {
        if self.is_finished() || !(delta > 0.0 && delta.is_finite()) {
            return false;
        }
        self.elapsed += delta;
        self.is_finished()
    }

    pub fn total_ms(&self) -> f64 {
        self.steps as f64 * self.step_ms
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_ms()
    }

    /// Number on screen: `steps` down to 1, None once finished
    pub fn remaining(&self) -> Option<u32> {
        if self.is_finished() {
            return None;
        }
        let passed = if self.step_ms > 0.0 {
            (self.elapsed / self.step_ms) as u32
        } else {
            self.steps
        };
        Some(self.steps.saturating_sub(passed).max(1))
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(&CountdownConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_then_finishes() {
        let mut countdown = Countdown::default();
        assert_eq!(countdown.remaining(), Some(3));

        assert!(!countdown.tick(999.0));
        assert_eq!(countdown.remaining(), Some(3));

        assert!(!countdown.tick(1.0));
        assert_eq!(countdown.remaining(), Some(2));

        assert!(!countdown.tick(1000.0));
        assert_eq!(countdown.remaining(), Some(1));

        assert!(countdown.tick(1000.0));
        assert_eq!(countdown.remaining(), None);
        assert!(!countdown.tick(1000.0));
    }

    #[test]
    fn test_zero_steps_starts_finished() {
        let countdown = Countdown::new(&CountdownConfig { steps: 0, step_ms: 1000.0 });
        assert!(countdown.is_finished());
        assert_eq!(countdown.remaining(), None);
    }

    #[test]
    fn test_bad_delta_ignored() {
        let mut countdown = Countdown::default();
        countdown.tick(-500.0);
        countdown.tick(f64::NAN);
        assert_eq!(countdown.remaining(), Some(3));
    }
}
