//! Speedy Runner headless demo
//!
//! Plays one attract-mode run with a simple autopilot at a fixed 60 Hz frame
//! cadence, logging what a presentation shell would draw and play.
//!
//! Usage: `speedy-runner [seed] [best-score-file]`
//! Set `RUST_LOG=debug` to see every command.

use speedy_runner::audio::{AudioOutput, MusicTrack, SoundEffect};
use speedy_runner::highscores::format_score;
use speedy_runner::persistence::JsonFileStore;
use speedy_runner::sim::{GameEvent, Lane, SessionPhase};
use speedy_runner::{GameSession, Millis, Settings, Tuning};

/// Frame spacing (ms)
const FRAME_MS: Millis = 16;
/// Give up after this long even if the autopilot never crashes
const MAX_RUN_MS: Millis = 120_000;
/// Lead time between pressing and the obstacle reaching the player
const JUMP_LEAD_MS: f32 = 450.0;

/// Audio backend that only logs
struct LogAudio;

impl AudioOutput for LogAudio {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {effect:?} @ {volume:.2}");
    }

    fn play_music(&mut self, track: MusicTrack, looping: bool, volume: f32) {
        log::info!("music {track:?} (loop: {looping}) @ {volume:.2}");
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }
}

fn render(event: &GameEvent) {
    match event {
        GameEvent::ObstacleSpawned { id, rect, lane, .. } => log::debug!(
            "draw obstacle {} {:?} {:.0}x{:.0} at y {:.0}",
            id.0,
            lane,
            rect.size.x,
            rect.size.y,
            rect.bottom()
        ),
        GameEvent::ScoreChanged(score) if score % 25 == 0 => {
            log::info!("score {}", format_score(*score))
        }
        GameEvent::GameOverBanner(true) => log::info!("GAME OVER"),
        GameEvent::HighScoreChanged(best) => log::info!("new best {}", format_score(*best)),
        other => log::trace!("{other:?}"),
    }
}

/// Press when a ground obstacle is about to reach the player
fn should_jump(session: &GameSession<JsonFileStore>, now: Millis) -> bool {
    let state = session.state();
    if !state.jump.is_grounded() {
        return false;
    }
    let player = state.player_hitbox();
    let speed = 2.0 * state.playfield.x / state.tuning.spawn.traversal_ms as f32;
    state.obstacles.iter().any(|obstacle| {
        let hitbox = obstacle.hitbox_at(now);
        let gap = hitbox.left() - player.right();
        obstacle.lane == Lane::Ground && gap > 0.0 && gap / speed <= JUMP_LEAD_MS
    })
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let path = args
        .next()
        .unwrap_or_else(|| std::env::temp_dir().join("speedy-runner.json").display().to_string());

    let store = JsonFileStore::new(path);
    let mut session = match GameSession::new(Tuning::default(), &Settings::default(), store, seed) {
        Ok(session) => session,
        Err(err) => {
            log::error!("Invalid tuning: {err}");
            std::process::exit(1);
        }
    };
    log::info!("Best so far: {}", format_score(session.high_score()));

    let mut audio = LogAudio;
    let mut now: Millis = 0;
    session.press_down(now);

    while session.phase() == SessionPhase::Running && now < MAX_RUN_MS {
        if should_jump(&session, now) {
            session.press_down(now);
        }
        for event in session.tick_with_audio(now, &mut audio) {
            render(&event);
        }
        now += FRAME_MS;
    }

    log::info!(
        "Run ended at {}s with {} (best {})",
        now / 1000,
        format_score(session.score()),
        format_score(session.high_score())
    );
}
