//! Audio cue mapping
//!
//! The simulation only emits [`GameEvent`]s. This module turns them into sound
//! cues and hands those to an [`AudioSink`], which is whatever backend the
//! host provides. Audio failures are never fatal to gameplay.

use thiserror::Error;

use crate::sim::GameEvent;

/// Seconds left on the countdown at which the warning cue starts
const TICK_WARNING_SECONDS: u32 = 10;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Landed on a solid platform
    Bounce,
    /// A fake platform gave way
    Collapse,
    /// Stomped a hazard
    Stomp,
    /// Hit a boost spring
    Spring,
    /// Countdown is nearly out
    TickWarning,
    /// Run ended
    GameOver,
    /// New run started
    Restart,
}

impl SoundEffect {
    /// Asset key a file-backed sink would load
    pub fn asset_name(self) -> &'static str {
        match self {
            SoundEffect::Bounce => "jump",
            SoundEffect::Collapse => "collapse",
            SoundEffect::Stomp => "stomp",
            SoundEffect::Spring => "spring",
            SoundEffect::TickWarning => "tick",
            SoundEffect::GameOver => "gameover",
            SoundEffect::Restart => "restart",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("audio asset `{0}` is not loaded")]
    MissingAsset(&'static str),
    #[error("audio output is unavailable")]
    Unavailable,
}

/// Backend that actually makes noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
    /// Start the looping background track
    fn start_ambient(&mut self) -> Result<(), AudioError>;
    fn stop_ambient(&mut self);
}

/// Sink for headless runs: logs each cue and never fails
#[derive(Debug, Default)]
pub struct LogSink {
    ambient: bool,
}

impl LogSink {
    pub fn is_ambient_playing(&self) -> bool {
        self.ambient
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::trace!("sfx {} @ {:.2}", effect.asset_name(), volume);
        Ok(())
    }

    fn start_ambient(&mut self) -> Result<(), AudioError> {
        self.ambient = true;
        log::trace!("ambient on");
        Ok(())
    }

    fn stop_ambient(&mut self) {
        self.ambient = false;
        log::trace!("ambient off");
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.sink.stop_ambient();
        }
    }

    pub fn toggle_muted(&mut self) {
        self.set_muted(!self.muted);
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect; a failing sink is logged and ignored
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play(effect, vol) {
            log::warn!("Failed to play {:?}: {}", effect, e);
        }
    }

    pub fn start_ambient(&mut self) {
        if self.muted {
            return;
        }
        if let Err(e) = self.sink.start_ambient() {
            log::warn!("Failed to start ambient track: {}", e);
        }
    }

    /// Map a batch of simulation events to cues
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Bounce => self.play(SoundEffect::Bounce),
                GameEvent::FakeCollapsed => self.play(SoundEffect::Collapse),
                GameEvent::HazardStomped { .. } => self.play(SoundEffect::Stomp),
                GameEvent::BoostLaunched => self.play(SoundEffect::Spring),
                GameEvent::TimerTick { remaining } => {
                    if remaining > 0 && remaining <= TICK_WARNING_SECONDS {
                        self.play(SoundEffect::TickWarning);
                    }
                }
                GameEvent::GameOver { .. } => {
                    self.sink.stop_ambient();
                    self.play(SoundEffect::GameOver);
                }
                GameEvent::Restarted { .. } => {
                    self.play(SoundEffect::Restart);
                    self.start_ambient();
                }
            }
        }
    }
}

impl Default for AudioManager<LogSink> {
    fn default() -> Self {
        Self::new(LogSink::default())
    }
}
