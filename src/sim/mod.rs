//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes from the caller as millisecond timestamps
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering, audio or storage dependencies; effects leave as `GameEvent`s

pub mod collision;
pub mod geometry;
pub mod jump;
pub mod obstacles;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{CollisionModel, Leniency, intersects, player_hit};
pub use geometry::{Color, Lane};
pub use jump::{JumpController, JumpPhase, fall_duration};
pub use obstacles::{Obstacle, ObstacleId, ObstacleTracker};
pub use rect::Rect;
pub use score::ScoreClock;
pub use state::{Deadline, Deadlines, GameEvent, GameState, SessionPhase};
pub use tick::{InputEvent, TickInput, advance, apply_input, tick};
