//! Realtime plumbing: the output stream and the control channel.
//!
//! The audio thread owns the engine, tone generator, and music player
//! outright. The UI holds an [`AmbientHandle`] and talks to the audio thread
//! through a lock-free rtrb queue - no mutex ever sits on the render path.

mod output;

pub use output::AudioRuntime;

use rtrb::Producer;

use crate::scenes::Mode;

/// One user intent, sent UI -> audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMessage {
    SetMode(Mode),
    SetVolume(f32),
    PlayChime,
    PlayClick,
    ToggleMusic,
    SetMusicVolume(f32),
}

/// The UI's end of the control channel.
///
/// Reads (`mode()`, `volume()`, ...) come from a local mirror of the last
/// accepted request, so the UI never has to ask the audio thread anything.
/// The mirror tracks the *requested* state - during a crossfade the engine
/// is still sounding the old mode, which is exactly what a mode selector
/// wants to highlight anyway.
pub struct AmbientHandle {
    commands: Producer<ControlMessage>,
    mode: Mode,
    volume: f32,
    music_on: bool,
    music_volume: f32,
}

impl AmbientHandle {
    pub(crate) fn new(commands: Producer<ControlMessage>, volume: f32) -> Self {
        Self {
            commands,
            mode: Mode::Off,
            volume,
            music_on: false,
            music_volume: 0.15,
        }
    }

    /// False means the queue was full and the message was dropped; the
    /// mirror is only updated on accepted sends.
    fn send(&mut self, message: ControlMessage) -> bool {
        match self.commands.push(message) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("control queue full, dropped {message:?}");
                false
            }
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.send(ControlMessage::SetMode(mode)) {
            self.mode = mode;
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, crate::engine::MAX_VOLUME);
        if self.send(ControlMessage::SetVolume(volume)) {
            self.volume = volume;
        }
    }

    pub fn play_chime(&mut self) {
        self.send(ControlMessage::PlayChime);
    }

    pub fn play_click(&mut self) {
        self.send(ControlMessage::PlayClick);
    }

    pub fn toggle_music(&mut self) {
        if self.send(ControlMessage::ToggleMusic) {
            self.music_on = !self.music_on;
        }
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if self.send(ControlMessage::SetMusicVolume(volume)) {
            self.music_volume = volume;
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }
}
