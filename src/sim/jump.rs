//! Player jump arc
//!
//! The arc is keyframed rather than integrated: the offset is always a pure
//! function of the phase timestamps, so uneven frame spacing cannot change
//! how high or how long a jump is.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::{JumpTuning, PlayerTuning};
use crate::{Millis, lerp_over};

/// Vertical state of the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JumpPhase {
    Grounded,
    /// Button held, climbing toward the apex
    Rising { pressed_at: Millis },
    /// Returning to the ground from `from` over `duration`
    Falling {
        pressed_at: Millis,
        started_at: Millis,
        from: f32,
        duration: Millis,
    },
}

/// Fall time for a press of `press` ms: quick for taps, capped for holds
pub fn fall_duration(tuning: &JumpTuning, press: Millis) -> Millis {
    if press <= tuning.short_press_ms {
        press
            .saturating_mul(tuning.fall_multiplier)
            .min(tuning.fall_ceiling_ms)
    } else {
        tuning.fall_ceiling_ms
    }
}

/// Owns the player's vertical state
#[derive(Debug, Clone)]
pub struct JumpController {
    tuning: JumpTuning,
    player: PlayerTuning,
    phase: JumpPhase,
    offset: f32,
}

impl JumpController {
    pub fn new(tuning: JumpTuning, player: PlayerTuning) -> Self {
        Self {
            tuning,
            player,
            phase: JumpPhase::Grounded,
            offset: 0.0,
        }
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    /// Displacement above the ground baseline
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self.phase, JumpPhase::Grounded)
    }

    /// Collidable body at the current offset
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.player.x,
            self.offset,
            self.player.width,
            self.player.height,
        )
    }

    /// Start a jump. Returns false (and does nothing) unless grounded.
    pub fn press_down(&mut self, now: Millis) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.phase = JumpPhase::Rising { pressed_at: now };
        true
    }

    /// Release during the rise starts the fall from the current height.
    /// Returns false when there was no rise to cut short.
    pub fn press_up(&mut self, now: Millis) -> bool {
        let JumpPhase::Rising { pressed_at } = self.phase else {
            return false;
        };
        if now >= pressed_at + self.tuning.rise_ms {
            // Apex already passed; the next tick starts the capped fall
            return false;
        }
        // Release timestamps older than the press count as zero-length presses
        let now = now.max(pressed_at);
        self.offset = self.rise_offset(pressed_at, now);
        let press = now - pressed_at;
        self.begin_fall(pressed_at, now, fall_duration(&self.tuning, press));
        true
    }

    /// Advance to `now`. Returns true on the tick the player lands.
    pub fn tick(&mut self, now: Millis) -> bool {
        if let JumpPhase::Rising { pressed_at } = self.phase {
            let apex_at = pressed_at + self.tuning.rise_ms;
            if now < apex_at {
                self.offset = self.rise_offset(pressed_at, now);
                return false;
            }
            // Held to the apex: fall as if the press ran long
            self.offset = self.tuning.apex;
            self.begin_fall(pressed_at, apex_at, self.tuning.fall_ceiling_ms);
        }

        if let JumpPhase::Falling {
            started_at,
            from,
            duration,
            ..
        } = self.phase
        {
            let elapsed = now.saturating_sub(started_at);
            if elapsed >= duration {
                self.phase = JumpPhase::Grounded;
                self.offset = 0.0;
                return true;
            }
            self.offset = lerp_over(from, 0.0, elapsed, duration);
        }
        false
    }

    /// Back on the ground, no jump in progress
    pub fn reset(&mut self) {
        self.phase = JumpPhase::Grounded;
        self.offset = 0.0;
    }

    fn rise_offset(&self, pressed_at: Millis, now: Millis) -> f32 {
        lerp_over(
            0.0,
            self.tuning.apex,
            now.saturating_sub(pressed_at),
            self.tuning.rise_ms,
        )
    }

    fn begin_fall(&mut self, pressed_at: Millis, started_at: Millis, duration: Millis) {
        log::trace!("fall from {:.0} over {}ms", self.offset, duration);
        self.phase = JumpPhase::Falling {
            pressed_at,
            started_at,
            from: self.offset,
            duration,
        };
    }
}
