//! Data-driven game balance
//!
//! Every timing and size the simulation uses lives here so builds for
//! different devices can ship different numbers. Defaults come from
//! [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::collision::Leniency;

/// Half-open `[min, max)` band a random value is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl Span<f32> {
    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 || self.min >= self.max
        {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        Ok(())
    }
}

impl Span<Millis> {
    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min == 0 || self.min >= self.max {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        Ok(())
    }
}

/// Jump arc timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpTuning {
    pub apex: f32,
    pub rise_ms: Millis,
    pub short_press_ms: Millis,
    pub fall_multiplier: u64,
    pub fall_ceiling_ms: Millis,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            apex: JUMP_APEX,
            rise_ms: JUMP_RISE_MS,
            short_press_ms: SHORT_PRESS_MS,
            fall_multiplier: FALL_MULTIPLIER,
            fall_ceiling_ms: FALL_CEILING_MS,
        }
    }
}

/// Collidable rectangle relative to the drawn one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxInset {
    pub width_scale: f32,
    pub x_offset: f32,
    pub height_trim: f32,
}

impl Default for HitboxInset {
    fn default() -> Self {
        Self {
            width_scale: HITBOX_WIDTH_SCALE,
            x_offset: HITBOX_X_OFFSET,
            height_trim: HITBOX_HEIGHT_TRIM,
        }
    }
}

/// Obstacle spawning and motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub interval_ms: Span<Millis>,
    pub width: Span<f32>,
    pub height: Span<f32>,
    /// Floating lane is chosen when a draw in `0..lane_weight_total` is below this
    pub floating_weight: u32,
    pub lane_weight_total: u32,
    /// Hard limits on a floating obstacle's elevation
    pub float_offset: Span<f32>,
    /// Elevation headroom above `float_offset.min` per pixel of obstacle height
    pub float_reach: f32,
    pub traversal_ms: Millis,
    pub hitbox: HitboxInset,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval_ms: Span::new(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX),
            width: Span::new(OBSTACLE_WIDTH_MIN, OBSTACLE_WIDTH_MAX),
            height: Span::new(OBSTACLE_HEIGHT_MIN, OBSTACLE_HEIGHT_MAX),
            floating_weight: FLOATING_WEIGHT,
            lane_weight_total: LANE_WEIGHT_TOTAL,
            float_offset: Span::new(FLOAT_OFFSET_MIN, FLOAT_OFFSET_MAX),
            float_reach: FLOAT_REACH,
            traversal_ms: TRAVERSAL_MS,
            hitbox: HitboxInset::default(),
        }
    }
}

/// Player body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
        }
    }
}

/// Session pacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    pub score_cadence_ms: Millis,
    pub start_delay_ms: Millis,
    pub music_delay_ms: Millis,
    pub restart_cooldown_ms: Millis,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            score_cadence_ms: SCORE_CADENCE_MS,
            start_delay_ms: START_DELAY_MS,
            music_delay_ms: MUSIC_DELAY_MS,
            restart_cooldown_ms: RESTART_COOLDOWN_MS,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub jump: JumpTuning,
    pub spawn: SpawnTuning,
    pub player: PlayerTuning,
    pub collision: Leniency,
    pub session: SessionTuning,
}

impl Tuning {
    /// Parse from JSON and validate. Missing sections and fields fall back
    /// to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject tunings that can only come from a programming mistake
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jump = &self.jump;
        non_negative("jump.apex", jump.apex)?;
        non_zero("jump.rise_ms", jump.rise_ms)?;
        non_zero("jump.fall_ceiling_ms", jump.fall_ceiling_ms)?;
        non_zero("jump.fall_multiplier", jump.fall_multiplier)?;

        let spawn = &self.spawn;
        spawn.interval_ms.check("spawn.interval_ms")?;
        spawn.width.check("spawn.width")?;
        spawn.height.check("spawn.height")?;
        spawn.float_offset.check("spawn.float_offset")?;
        positive("spawn.float_reach", spawn.float_reach)?;
        non_zero("spawn.traversal_ms", spawn.traversal_ms)?;
        if spawn.lane_weight_total == 0 || spawn.floating_weight > spawn.lane_weight_total {
            return Err(ConfigError::InvalidLaneWeights {
                floating: spawn.floating_weight,
                total: spawn.lane_weight_total,
            });
        }
        let inset = &spawn.hitbox;
        if !(inset.width_scale > 0.0 && inset.width_scale <= 1.0) {
            return Err(ConfigError::InvalidHitboxScale(inset.width_scale));
        }
        non_negative("spawn.hitbox.x_offset", inset.x_offset)?;
        non_negative("spawn.hitbox.height_trim", inset.height_trim)?;
        if inset.height_trim >= spawn.height.min {
            return Err(ConfigError::HitboxTrimTooLarge {
                trim: inset.height_trim,
                min_height: spawn.height.min,
            });
        }

        let player = &self.player;
        non_negative("player.x", player.x)?;
        positive("player.width", player.width)?;
        positive("player.height", player.height)?;

        non_negative("collision.horizontal", self.collision.horizontal)?;
        non_negative("collision.vertical", self.collision.vertical)?;

        non_zero("session.score_cadence_ms", self.session.score_cadence_ms)?;
        Ok(())
    }
}

fn non_zero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroDuration { field });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            value: value as f64,
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            value: value as f64,
        });
    }
    Ok(())
}
