//! Input handling and the per-tick update
//!
//! One tick runs, in order: deadlines, score, jump, obstacle spawn/move/retire,
//! then the collision pass over the settled obstacle set.

use glam::Vec2;

use super::collision;
use super::state::{Deadline, GameEvent, GameState, SessionPhase};
use crate::Millis;
use crate::audio::{MusicTrack, SoundEffect};

/// Abstract input from the shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PressDown,
    PressUp,
    /// Touch stolen by the system; same as a release
    PressCancel,
    ToggleDebug,
    Resize { width: f32, height: f32 },
}

/// Input collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn single(event: InputEvent) -> Self {
        Self {
            events: vec![event],
        }
    }
}

/// Apply one input at `now`. Inputs that make no sense in the current
/// phase are dropped.
pub fn apply_input(state: &mut GameState, event: InputEvent, now: Millis) {
    match event {
        InputEvent::PressDown => match state.phase {
            SessionPhase::Idle | SessionPhase::Restarting => start_run(state, now),
            SessionPhase::Running => {
                if state.jump.press_down(now) {
                    state.emit(GameEvent::PlayerVisible(false));
                    state.emit(GameEvent::Sound(SoundEffect::Jump));
                }
            }
            SessionPhase::GameOver => {}
        },
        InputEvent::PressUp | InputEvent::PressCancel => {
            if state.phase == SessionPhase::Running {
                state.jump.press_up(now);
            }
        }
        InputEvent::ToggleDebug => {
            state.debug_mode = !state.debug_mode;
            log::info!(
                "Debug mode {}",
                if state.debug_mode { "enabled, no collision detection" } else { "disabled" }
            );
            state.emit(GameEvent::DebugModeChanged(state.debug_mode));
        }
        InputEvent::Resize { width, height } => {
            if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
                state.playfield = Vec2::new(width, height);
            }
        }
    }
}

/// Apply this tick's input, then advance the simulation to `now`
pub fn tick(state: &mut GameState, input: &TickInput, now: Millis) {
    for event in &input.events {
        apply_input(state, *event, now);
    }
    advance(state, now);
}

/// Advance the simulation to `now`
pub fn advance(state: &mut GameState, now: Millis) {
    if state.phase == SessionPhase::Idle {
        return;
    }

    if let Some(at) = state.deadlines.fire(Deadline::Spawn, now) {
        log::debug!("spawning armed");
        state.obstacles.arm(at.max(now));
    }
    if state.deadlines.fire(Deadline::Music, now).is_some() {
        state.emit(GameEvent::StartMusic(MusicTrack::Background));
    }
    if state.deadlines.fire(Deadline::Restart, now).is_some() {
        state.phase = SessionPhase::Restarting;
        log::info!("Ready to restart");
        state.emit(GameEvent::RestartHint(true));
    }

    if state.score.tick(now) {
        let score = state.score.score();
        state.emit(GameEvent::ScoreChanged(score));
    }

    let landed = state.jump.tick(now);
    let offset = state.jump.offset();
    if offset != state.reported_offset {
        state.reported_offset = offset;
        state.emit(GameEvent::PlayerOffsetChanged(offset));
    }
    if landed {
        state.emit(GameEvent::PlayerVisible(true));
    }

    let width = state.playfield.x;
    state
        .obstacles
        .tick(now, width, &mut state.rng, &mut state.events);

    // Collision pass: the obstacle set is settled for this tick
    if state.phase == SessionPhase::Running {
        let player = state.jump.hitbox();
        let hit = state.obstacles.iter().find(|obstacle| {
            collision::player_hit(
                &player,
                &obstacle.hitbox_at(now),
                &state.tuning.collision,
                state.debug_mode,
            )
        });
        if let Some(obstacle) = hit {
            log::info!("Hit obstacle {}", obstacle.id.0);
            end_run(state, now);
        }
    }
}

/// Idle/Restarting -> Running with everything from the last run wiped
fn start_run(state: &mut GameState, now: Millis) {
    let session = state.tuning.session;

    state.obstacles.clear(&mut state.events);
    state.jump.reset();
    state.score.start(now);
    state.deadlines.clear();
    state
        .deadlines
        .schedule(Deadline::Spawn, now + session.start_delay_ms);
    state.deadlines.schedule(
        Deadline::Music,
        now + session.start_delay_ms + session.music_delay_ms,
    );
    state.phase = SessionPhase::Running;
    state.runs += 1;
    state.reported_offset = 0.0;
    log::info!("Run {} started", state.runs);

    state.emit(GameEvent::GameOverBanner(false));
    state.emit(GameEvent::RestartHint(false));
    state.emit(GameEvent::ScoreChanged(0));
    state.emit(GameEvent::PlayerOffsetChanged(0.0));
    state.emit(GameEvent::PlayerVisible(true));
    state.emit(GameEvent::Sound(SoundEffect::Engine));
}

/// Running -> GameOver
fn end_run(state: &mut GameState, now: Millis) {
    state.phase = SessionPhase::GameOver;
    state.score.freeze();
    state.obstacles.disarm();
    state.deadlines.clear();
    let cooldown = state.tuning.session.restart_cooldown_ms;
    state.deadlines.schedule(Deadline::Restart, now + cooldown);

    let score = state.score.score();
    log::info!("Game over with score {score} (best {})", state.high_score);

    state.emit(GameEvent::StopMusic);
    state.emit(GameEvent::StartMusic(MusicTrack::GameOver));
    state.emit(GameEvent::GameOverBanner(true));
    if score > state.high_score {
        state.high_score = score;
        state.emit(GameEvent::HighScoreChanged(score));
    }
}
