//! Audio cues
//!
//! The simulation only names cues. An [`AudioManager`] turns the cue events
//! into calls on whatever [`AudioOutput`] the shell provides, applying the
//! player's volume settings on the way.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player leaves the ground
    Jump,
    /// Engine rev when a run starts
    Engine,
}

/// Music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    /// Looping track while running
    Background,
    /// Played once when a run ends
    GameOver,
}

impl MusicTrack {
    pub fn looping(&self) -> bool {
        matches!(self, MusicTrack::Background)
    }
}

/// Playback backend supplied by the shell
pub trait AudioOutput {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    fn play_music(&mut self, track: MusicTrack, looping: bool, volume: f32);
    fn stop_music(&mut self);
}

/// Routes cue events to an output
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    current: Option<MusicTrack>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let mut manager = Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
            current: None,
        };
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    /// Track currently playing, if any
    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current
    }

    fn volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Forward an audio event; other events are ignored
    pub fn handle(&mut self, event: &GameEvent, out: &mut impl AudioOutput) {
        match *event {
            GameEvent::Sound(effect) => {
                let vol = self.volume(self.sfx_volume);
                if vol > 0.0 {
                    out.play_effect(effect, vol);
                }
            }
            GameEvent::StartMusic(track) => {
                if self.current.is_some() {
                    out.stop_music();
                }
                self.current = Some(track);
                out.play_music(track, track.looping(), self.volume(self.music_volume));
            }
            GameEvent::StopMusic => {
                if self.current.take().is_some() {
                    out.stop_music();
                }
            }
            _ => {}
        }
    }
}
