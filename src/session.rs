//! Shell-facing game session
//!
//! Wraps the pure simulation with the collaborators it talks to: the
//! best-score store and the audio manager. The shell forwards raw input,
//! calls [`GameSession::tick`] once per frame and renders the returned events.

use crate::Millis;
use crate::audio::{AudioManager, AudioOutput};
use crate::error::ConfigError;
use crate::highscores;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, InputEvent, SessionPhase, advance, apply_input};
use crate::tuning::Tuning;

pub struct GameSession<S: KeyValueStore> {
    state: GameState,
    store: S,
    audio: AudioManager,
    last_tick: Millis,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Build an idle session. Invalid tuning is rejected here and nowhere else.
    pub fn new(tuning: Tuning, settings: &Settings, store: S, seed: u64) -> Result<Self, ConfigError> {
        let best = highscores::load_best(&store);
        let mut state = GameState::new(tuning, seed, best)?;
        state.debug_mode = settings.debug_mode;
        Ok(Self {
            state,
            store,
            audio: AudioManager::new(settings),
            last_tick: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.current_score()
    }

    /// Best score, including the current run once it has ended
    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.audio.apply_settings(settings);
    }

    pub fn press_down(&mut self, now: Millis) {
        apply_input(&mut self.state, InputEvent::PressDown, now);
    }

    pub fn press_up(&mut self, now: Millis) {
        apply_input(&mut self.state, InputEvent::PressUp, now);
    }

    pub fn press_cancel(&mut self, now: Millis) {
        apply_input(&mut self.state, InputEvent::PressCancel, now);
    }

    pub fn toggle_debug(&mut self) {
        apply_input(&mut self.state, InputEvent::ToggleDebug, self.last_tick);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        apply_input(
            &mut self.state,
            InputEvent::Resize { width, height },
            self.last_tick,
        );
    }

    /// Advance to `now` and return everything the shell must act on.
    /// New best scores are persisted before returning.
    pub fn tick(&mut self, now: Millis) -> Vec<GameEvent> {
        self.last_tick = self.last_tick.max(now);
        advance(&mut self.state, now);
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::HighScoreChanged(score) = event {
                highscores::save_best(&mut self.store, *score);
            }
        }
        events
    }

    /// [`Self::tick`], also playing audio cues through `out`
    pub fn tick_with_audio(&mut self, now: Millis, out: &mut impl AudioOutput) -> Vec<GameEvent> {
        let events = self.tick(now);
        for event in &events {
            self.audio.handle(event, out);
        }
        events
    }
}
