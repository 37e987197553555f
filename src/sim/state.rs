//! Session state and outbound events
//!
//! `GameState` owns every simulation component. The shell reads it, feeds
//! input through [`super::tick`] and drains [`GameEvent`]s to drive
//! rendering, audio and persistence.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Color, Lane};
use super::jump::JumpController;
use super::obstacles::{ObstacleId, ObstacleTracker};
use super::rect::Rect;
use super::score::ScoreClock;
use crate::Millis;
use crate::audio::{MusicTrack, SoundEffect};
use crate::consts::{DEFAULT_PLAYFIELD_HEIGHT, DEFAULT_PLAYFIELD_WIDTH};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first press
    Idle,
    /// Run in progress
    Running,
    /// Run ended; input locked until the cooldown passes
    GameOver,
    /// Cooldown passed; the next press starts a fresh run
    Restarting,
}

/// Commands for the presentation, audio and storage collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned {
        id: ObstacleId,
        rect: Rect,
        hitbox: Rect,
        lane: Lane,
        color: Color,
    },
    ObstacleMoved {
        id: ObstacleId,
        x: f32,
    },
    ObstacleRemoved {
        id: ObstacleId,
    },
    PlayerOffsetChanged(f32),
    /// Running animation shown on the ground, hidden mid-air
    PlayerVisible(bool),
    ScoreChanged(u64),
    /// New best score; the shell should persist it
    HighScoreChanged(u64),
    GameOverBanner(bool),
    RestartHint(bool),
    DebugModeChanged(bool),
    Sound(SoundEffect),
    StartMusic(MusicTrack),
    StopMusic,
}

/// Which one-shot deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    Spawn,
    Music,
    Restart,
}

/// Pending one-shot deadlines, polled every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadlines {
    /// Obstacle spawning begins
    pub spawn: Option<Millis>,
    /// Background loop begins
    pub music: Option<Millis>,
    /// Game-over lock lifts
    pub restart: Option<Millis>,
}

impl Deadlines {
    fn slot_mut(&mut self, which: Deadline) -> &mut Option<Millis> {
        match which {
            Deadline::Spawn => &mut self.spawn,
            Deadline::Music => &mut self.music,
            Deadline::Restart => &mut self.restart,
        }
    }

    pub fn schedule(&mut self, which: Deadline, at: Millis) {
        *self.slot_mut(which) = Some(at);
    }

    /// Consume `which` if it is due, yielding the time it was set for
    pub fn fire(&mut self, which: Deadline, now: Millis) -> Option<Millis> {
        let slot = self.slot_mut(which);
        match *slot {
            Some(at) if now >= at => slot.take(),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// Collisions never end the run while set
    pub debug_mode: bool,
    /// Best score seen so far, seeded from storage
    pub high_score: u64,
    /// Playfield size in world units
    pub playfield: Vec2,
    pub jump: JumpController,
    pub obstacles: ObstacleTracker,
    pub score: ScoreClock,
    pub deadlines: Deadlines,
    /// Shared source for every random draw
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    /// Last offset reported to the shell
    pub(crate) reported_offset: f32,
    /// Number of runs started
    pub runs: u32,
}

impl GameState {
    /// Create an idle session. Fails on invalid tuning.
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            phase: SessionPhase::Idle,
            debug_mode: false,
            high_score,
            playfield: Vec2::new(DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT),
            jump: JumpController::new(tuning.jump, tuning.player),
            obstacles: ObstacleTracker::new(tuning.spawn),
            score: ScoreClock::new(tuning.session.score_cadence_ms),
            deadlines: Deadlines::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            reported_offset: 0.0,
            runs: 0,
        })
    }

    /// Current score of the active (or last) run
    pub fn current_score(&self) -> u64 {
        self.score.score()
    }

    /// Player collision rectangle
    pub fn player_hitbox(&self) -> Rect {
        self.jump.hitbox()
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(Tuning::default(), 1, 42).unwrap();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.high_score, 42);
        assert_eq!(state.current_score(), 0);
        assert!(state.jump.is_grounded());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let mut tuning = Tuning::default();
        tuning.session.score_cadence_ms = 0;
        assert!(GameState::new(tuning, 1, 0).is_err());
    }

    #[test]
    fn test_deadline_fires_once() {
        let mut deadlines = Deadlines::default();
        deadlines.schedule(Deadline::Music, 100);
        assert_eq!(deadlines.fire(Deadline::Music, 99), None);
        assert_eq!(deadlines.fire(Deadline::Spawn, 150), None);
        assert_eq!(deadlines.fire(Deadline::Music, 150), Some(100));
        assert_eq!(deadlines.fire(Deadline::Music, 200), None);
        assert_eq!(deadlines, Deadlines::default());
    }
}
