//! Survival score: one point per cadence while running

use crate::Millis;

#[derive(Debug, Clone)]
pub struct ScoreClock {
    cadence_ms: Millis,
    score: u64,
    /// `None` while frozen
    next_at: Option<Millis>,
}

impl ScoreClock {
    /// A zero cadence counts as 1 ms
    pub fn new(cadence_ms: Millis) -> Self {
        Self {
            cadence_ms: cadence_ms.max(1),
            score: 0,
            next_at: None,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.next_at.is_some()
    }

    /// Zero the score and start counting from `now`
    pub fn start(&mut self, now: Millis) {
        self.score = 0;
        self.next_at = Some(now + self.cadence_ms);
    }

    /// Stop counting; the score keeps its value
    pub fn freeze(&mut self) {
        self.next_at = None;
    }

    /// Catch up on every cadence boundary up to `now`.
    /// Returns true if the score changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let Some(next_at) = self.next_at else {
            return false;
        };
        if now < next_at {
            return false;
        }
        let boundaries = (now - next_at) / self.cadence_ms + 1;
        self.score += boundaries;
        self.next_at = Some(next_at + boundaries * self.cadence_ms);
        true
    }
}
