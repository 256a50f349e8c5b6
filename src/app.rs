//! Frame driver
//!
//! Owns the session and the audio manager. The host calls `update` once per
//! frame with that frame's input and then `draw` with its canvas.

use crate::audio::{AudioManager, AudioSink, SoundCue};
use crate::config::GameConfig;
use crate::input::FrameInput;
use crate::renderer::{self, Canvas};
use crate::sim::{GameEvent, GameSession, Mode};

/// Game instance holding all state
pub struct App {
    session: GameSession,
    audio: AudioManager,
}

impl App {
    /// New app sitting on the menu, with a silent audio backend
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_audio(config, seed, AudioManager::default())
    }

    pub fn with_audio(config: GameConfig, seed: u64, audio: AudioManager) -> Self {
        log::info!(
            "Starting session (seed {}, field {}x{}, {} fps, {} dot collisions)",
            seed,
            config.field_width,
            config.field_height,
            config.fps,
            config.dot_collision_policy.as_str()
        );
        Self {
            session: GameSession::new(config, seed),
            audio,
        }
    }

    /// New app whose cues go to `sink`
    pub fn with_sink(config: GameConfig, seed: u64, sink: Box<dyn AudioSink>) -> Self {
        Self::with_audio(config, seed, AudioManager::new(sink))
    }

    /// Advance one frame and dispatch the resulting sound cues
    pub fn update(&mut self, input: &FrameInput) {
        self.session.update(input);

        for event in &self.session.events {
            if *event == GameEvent::SoundToggled {
                self.audio.toggle_muted();
            }
            if let Some(cue) = SoundCue::for_event(event) {
                self.audio.play(cue);
            }
        }
    }

    /// Draw the current frame; never mutates the session
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        renderer::draw(&self.session, canvas);
    }

    /// Start a fresh run immediately
    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn quit_requested(&self) -> bool {
        self.session.quit_requested
    }

    pub fn current_mode(&self) -> Mode {
        self.session.current_mode()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }
}
