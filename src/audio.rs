//! Sound cue dispatch
//!
//! The simulation never plays audio itself. The app maps `GameEvent`s to
//! `SoundCue`s and hands them to whatever `AudioSink` the host provides.

use crate::sim::GameEvent;

/// Waveform of a synthesized note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Pulse,
    Square,
    Triangle,
    Noise,
}

/// One synthesized note: frequency in Hz, length in frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq: f32,
    pub frames: u32,
    pub waveform: Waveform,
}

const fn note(freq: f32, frames: u32, waveform: Waveform) -> Note {
    Note {
        freq,
        frames,
        waveform,
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Snake head sliced a dot
    Slice,
    /// Fruit eaten, chewing starts
    Chomp,
    /// Chewing round won
    Win,
    /// Run ended
    Lose,
}

impl SoundCue {
    /// Cue for a simulation event, if the event makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::DotSliced { .. } => Some(SoundCue::Slice),
            GameEvent::FruitEaten => Some(SoundCue::Chomp),
            GameEvent::ChewWon => Some(SoundCue::Win),
            GameEvent::GameOver { .. } => Some(SoundCue::Lose),
            GameEvent::ChewTimedOut
            | GameEvent::Crashed
            | GameEvent::SoundToggled
            | GameEvent::QuitRequested => None,
        }
    }

    /// Note sequence for a synthesizing backend
    pub fn notes(&self) -> &'static [Note] {
        // C2 E2 G2 C3
        static SLICE: [Note; 4] = [
            note(65.41, 5, Waveform::Pulse),
            note(82.41, 5, Waveform::Pulse),
            note(98.00, 5, Waveform::Pulse),
            note(130.81, 5, Waveform::Pulse),
        ];
        static CHOMP: [Note; 2] = [note(220.0, 3, Waveform::Noise), note(180.0, 3, Waveform::Noise)];
        static WIN: [Note; 3] = [
            note(523.25, 4, Waveform::Square),
            note(659.25, 4, Waveform::Square),
            note(783.99, 8, Waveform::Square),
        ];
        static LOSE: [Note; 3] = [
            note(196.0, 6, Waveform::Triangle),
            note(164.81, 6, Waveform::Triangle),
            note(130.81, 12, Waveform::Triangle),
        ];
        match self {
            SoundCue::Slice => &SLICE,
            SoundCue::Chomp => &CHOMP,
            SoundCue::Win => &WIN,
            SoundCue::Lose => &LOSE,
        }
    }
}

/// Backend that actually produces sound
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Sink for headless runs
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("Sound {:?} at volume {:.2}", cue, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    /// Process-lifetime only; never persisted
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
        log::info!("Sound {}", if self.muted { "off" } else { "on" });
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

    /// Play a cue unless muted
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<(SoundCue, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, volume: f32) {
            self.0.borrow_mut().push((cue, volume));
        }
    }

    #[test]
    fn test_mute_gates_cues() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.play(SoundCue::Slice);
        audio.toggle_muted();
        audio.play(SoundCue::Slice);
        audio.toggle_muted();
        audio.play(SoundCue::Win);

        let played = recorder.0.borrow();
        assert_eq!(played.len(), 2);
        assert_eq!(played[0], (SoundCue::Slice, 0.8));
        assert_eq!(played[1].0, SoundCue::Win);
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_sfx_volume(0.0);
        audio.play(SoundCue::Lose);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundCue::for_event(&GameEvent::DotSliced { count: 2 }),
            Some(SoundCue::Slice)
        );
        assert_eq!(SoundCue::for_event(&GameEvent::Crashed), None);
        assert_eq!(SoundCue::Slice.notes().len(), 4);
    }
}
