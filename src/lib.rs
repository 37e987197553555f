//! Speedy Runner - A one-button endless runner
//!
//! Core modules:
//! - `sim`: Simulation (jump arc, obstacles, collisions, session state)
//! - `session`: Shell-facing wrapper wiring the sim to persistence and audio
//! - `persistence`: Key-value storage backends
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, PersistenceError};
pub use session::GameSession;
pub use settings::Settings;
pub use tuning::Tuning;

/// Simulation timestamps and durations, in milliseconds.
///
/// Supplied by the driving shell; the simulation never reads a clock.
pub type Millis = u64;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    use crate::Millis;

    /// Jump height above the ground baseline
    pub const JUMP_APEX: f32 = 500.0;
    /// Time to reach the apex while the button is held
    pub const JUMP_RISE_MS: Millis = 750;
    /// Presses up to this long get a snappy fall
    pub const SHORT_PRESS_MS: Millis = 500;
    /// Short-press fall takes this many times the press duration
    pub const FALL_MULTIPLIER: u64 = 2;
    /// Fall duration for long presses and apex auto-fall
    pub const FALL_CEILING_MS: Millis = 1000;

    /// Player defaults
    pub const PLAYER_X: f32 = 120.0;
    pub const PLAYER_SIZE: f32 = 180.0;

    /// Spawn cadence (ms)
    pub const SPAWN_INTERVAL_MIN: Millis = 1800;
    pub const SPAWN_INTERVAL_MAX: Millis = 2400;
    /// Obstacle size bands
    pub const OBSTACLE_WIDTH_MIN: f32 = 100.0;
    pub const OBSTACLE_WIDTH_MAX: f32 = 150.0;
    pub const OBSTACLE_HEIGHT_MIN: f32 = 100.0;
    pub const OBSTACLE_HEIGHT_MAX: f32 = 300.0;
    /// Floating lane: `FLOATING_WEIGHT` in `LANE_WEIGHT_TOTAL` draws
    pub const FLOATING_WEIGHT: u32 = 3;
    pub const LANE_WEIGHT_TOTAL: u32 = 15;
    /// Floating offset band, one to three player heights
    pub const FLOAT_OFFSET_MIN: f32 = PLAYER_SIZE;
    pub const FLOAT_OFFSET_MAX: f32 = PLAYER_SIZE * 3.0;
    /// Extra float height per pixel of obstacle height. The tallest default
    /// obstacle reaches the top of the offset band.
    pub const FLOAT_REACH: f32 = (FLOAT_OFFSET_MAX - FLOAT_OFFSET_MIN) / OBSTACLE_HEIGHT_MAX;
    /// Time for an obstacle to cross from the right edge to its exit point
    pub const TRAVERSAL_MS: Millis = 4000;

    /// Collidable area relative to the drawn obstacle
    pub const HITBOX_WIDTH_SCALE: f32 = 0.5;
    pub const HITBOX_X_OFFSET: f32 = 50.0;
    pub const HITBOX_HEIGHT_TRIM: f32 = 25.0;

    /// Collision forgiveness (pixels) for the strict model. The legacy
    /// edge-proximity model was tuned with 60 on both axes.
    pub const HORIZONTAL_LENIENCY: f32 = 20.0;
    pub const VERTICAL_LENIENCY: f32 = 20.0;

    /// Score increments once per cadence while running
    pub const SCORE_CADENCE_MS: Millis = 200;

    /// Entry animation time before obstacles start
    pub const START_DELAY_MS: Millis = 1000;
    /// Background loop starts this long after spawning is armed
    pub const MUSIC_DELAY_MS: Millis = 500;
    /// Game-over screen lock before a restart is accepted
    pub const RESTART_COOLDOWN_MS: Millis = 2500;

    /// Playfield size until the shell reports one
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 1920.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 1080.0;
}

/// Linear interpolation of `from -> to` at `elapsed / duration`, clamped
#[inline]
pub fn lerp_over(from: f32, to: f32, elapsed: Millis, duration: Millis) -> f32 {
    if duration == 0 {
        return to;
    }
    let t = (elapsed as f32 / duration as f32).clamp(0.0, 1.0);
    from + (to - from) * t
}
