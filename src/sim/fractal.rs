//! Julia set chewing mini-game
//!
//! The player steers a complex constant toward the hidden target of the
//! fruit they just ate before the countdown runs out. The field is sampled
//! on a coarse stride: each sample paints a `stride x stride` block, so the
//! picture is blocky but cheap enough to redo every frame.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::complex::{Complex, escape_iterations};
use super::player::Direction;
use crate::config::GameConfig;
use crate::consts::*;
use crate::input::FrameInput;

/// Result of one chewing frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChewOutcome {
    Continue,
    /// Current constant is within tolerance of the target
    Won,
    /// Countdown reached zero
    TimedOut,
}

/// One sample point of the fractal field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSample {
    /// Top-left pixel of the block this sample paints
    pub pixel: IVec2,
    pub iterations: u32,
}

/// State of a chewing round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractalEngine {
    target_c: Complex,
    current_c: Complex,
    frames_remaining: u32,
    chewing_frames: u32,
    winning_tolerance: f64,
    max_iterations: u32,
    palette_span: u32,
    palette_offset: u32,
    stride: i32,
    width: i32,
    height: i32,
}

impl FractalEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            target_c: config.base_c,
            current_c: Complex::ZERO,
            frames_remaining: 0,
            chewing_frames: config.chewing_frames(),
            winning_tolerance: config.winning_tolerance,
            max_iterations: config.max_iterations,
            palette_span: config.palette_span,
            palette_offset: config.palette_offset,
            stride: config.render_stride,
            width: config.field_width,
            height: config.field_height,
        }
    }

    /// Start a round: fix the target, reset the cursor and the countdown
    pub fn begin(&mut self, target_c: Complex) {
        self.target_c = target_c;
        self.current_c = Complex::ZERO;
        self.frames_remaining = self.chewing_frames;
    }

    /// Apply a cursor delta and advance the countdown by one frame
    ///
    /// The win check runs before the timeout check, so reaching the target
    /// on the last frame still wins.
    pub fn update(&mut self, cursor_delta: Complex) -> ChewOutcome {
        debug_assert!(cursor_delta.is_finite(), "cursor delta must be finite");
        if cursor_delta.is_finite() {
            self.current_c += cursor_delta;
        } else {
            log::warn!("Ignoring non-finite cursor delta {cursor_delta:?}");
        }

        self.frames_remaining = self.frames_remaining.saturating_sub(1);

        if self.distance() < self.winning_tolerance {
            ChewOutcome::Won
        } else if self.frames_remaining == 0 {
            ChewOutcome::TimedOut
        } else {
            ChewOutcome::Continue
        }
    }

    /// Distance between the player's constant and the target
    pub fn distance(&self) -> f64 {
        self.current_c.distance(self.target_c)
    }

    pub fn target_c(&self) -> Complex {
        self.target_c
    }

    pub fn current_c(&self) -> Complex {
        self.current_c
    }

    pub fn frames_remaining(&self) -> u32 {
        self.frames_remaining
    }

    /// Whole seconds left, for the HUD
    pub fn seconds_remaining(&self, fps: u32) -> u32 {
        self.frames_remaining / fps.max(1)
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }

    /// Escape counts for the current constant, one per stride block
    pub fn sample_field(&self) -> impl Iterator<Item = FieldSample> + '_ {
        self.sample_field_for(self.current_c)
    }

    /// Escape counts for an arbitrary constant over the same grid
    pub fn sample_field_for(&self, c: Complex) -> impl Iterator<Item = FieldSample> + '_ {
        let scale_x = (FRACTAL_MAX - FRACTAL_MIN) / self.width as f64;
        let scale_y = (FRACTAL_MAX - FRACTAL_MIN) / self.height as f64;
        let stride = self.stride.max(1) as usize;
        let max_iter = self.max_iterations;

        (0..self.width).step_by(stride).flat_map(move |x| {
            let re = FRACTAL_MIN + x as f64 * scale_x;
            (0..self.height).step_by(stride).map(move |y| {
                let z0 = Complex::new(re, FRACTAL_MIN + y as f64 * scale_y);
                FieldSample {
                    pixel: IVec2::new(x, y),
                    iterations: escape_iterations(c, z0, max_iter),
                }
            })
        })
    }

    /// Palette index for an escape count; bounded orbits are black
    pub fn color_index(&self, iterations: u32) -> u8 {
        if iterations >= self.max_iterations {
            0
        } else {
            ((iterations % self.palette_span) + self.palette_offset) as u8
        }
    }
}

/// Turns pointer motion and held keys into cursor deltas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CursorControl {
    last_pointer: Option<IVec2>,
    repeat_delay: u32,
}

impl CursorControl {
    /// Delta to apply to `current` for this frame's input
    pub fn delta(&mut self, input: &FrameInput, current: Complex, width: i32, height: i32) -> Complex {
        let mut target = current;

        if let Some(pointer) = input.pointer {
            if self.last_pointer != Some(pointer) {
                target = pointer_to_c(pointer, width, height);
            }
            self.last_pointer = Some(pointer);
        }

        let any_held = Direction::ALL.iter().any(|&d| input.is_held(d));
        if self.repeat_delay == 0 && any_held {
            let step = if input.coarse {
                CURSOR_COARSE_STEP
            } else {
                CURSOR_FINE_STEP
            };
            if input.is_held(Direction::Left) {
                target.re -= step;
            }
            if input.is_held(Direction::Right) {
                target.re += step;
            }
            if input.is_held(Direction::Up) {
                target.im -= step;
            }
            if input.is_held(Direction::Down) {
                target.im += step;
            }
            self.repeat_delay = CURSOR_REPEAT_DELAY;
        }
        self.repeat_delay = self.repeat_delay.saturating_sub(1);

        target - current
    }
}

/// Map a field pixel into `[-1, 1] x [-1, 1]`
pub fn pointer_to_c(pointer: IVec2, width: i32, height: i32) -> Complex {
    Complex::new(
        pointer.x as f64 / width as f64 * 2.0 - 1.0,
        pointer.y as f64 / height as f64 * 2.0 - 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> FractalEngine {
        FractalEngine::new(&GameConfig::default())
    }

    #[test]
    fn test_begin_resets_round() {
        let mut engine = engine();
        engine.begin(Complex::new(-0.55, 0.1));
        assert_eq!(engine.current_c(), Complex::ZERO);
        assert_eq!(engine.frames_remaining(), 300);
        assert_eq!(engine.target_c(), Complex::new(-0.55, 0.1));
    }

    #[test]
    fn test_reaching_target_wins() {
        let mut engine = engine();
        engine.begin(Complex::new(-0.5, 0.1));
        assert_eq!(engine.update(Complex::new(-0.3, 0.0)), ChewOutcome::Continue);
        assert_eq!(engine.update(Complex::new(-0.2, 0.1)), ChewOutcome::Won);
    }

    #[test]
    fn test_countdown_times_out() {
        let mut engine = engine();
        engine.begin(Complex::new(-0.5, 0.1));
        for _ in 0..299 {
            assert_eq!(engine.update(Complex::ZERO), ChewOutcome::Continue);
        }
        assert_eq!(engine.update(Complex::ZERO), ChewOutcome::TimedOut);
        assert_eq!(engine.frames_remaining(), 0);
        // Clamped at zero
        assert_eq!(engine.update(Complex::ZERO), ChewOutcome::TimedOut);
        assert_eq!(engine.frames_remaining(), 0);
    }

    #[test]
    fn test_win_beats_timeout_on_same_frame() {
        let mut engine = engine();
        let target = Complex::new(-0.5, 0.1);
        engine.begin(target);
        for _ in 0..299 {
            engine.update(Complex::ZERO);
        }
        assert_eq!(engine.frames_remaining(), 1);
        assert_eq!(engine.update(target), ChewOutcome::Won);
        assert_eq!(engine.frames_remaining(), 0);
    }

    #[test]
    fn test_sample_field_uses_stride() {
        let engine = engine();
        let samples: Vec<_> = engine.sample_field().collect();
        assert_eq!(samples.len(), (512 / 2) * (384 / 2));
        assert!(samples.iter().all(|s| s.pixel.x % 2 == 0 && s.pixel.y % 2 == 0));
        assert_eq!(samples[0].pixel, IVec2::ZERO);
        assert_eq!(samples[1].pixel, IVec2::new(0, 2));
    }

    #[test]
    fn test_sample_field_is_repeatable() {
        let mut engine = engine();
        engine.begin(Complex::new(-0.4, 0.05));
        engine.update(Complex::new(-0.4, 0.0));
        let a: Vec<_> = engine.sample_field().collect();
        let b: Vec<_> = engine.sample_field().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_centre_of_zero_constant_is_bounded() {
        // c = 0: points inside the unit circle never escape
        let engine = engine();
        let centre = engine
            .sample_field_for(Complex::ZERO)
            .find(|s| s.pixel == IVec2::new(256, 192))
            .expect("centre sample");
        assert_eq!(centre.iterations, 40);
        assert_eq!(engine.color_index(centre.iterations), 0);
    }

    #[test]
    fn test_color_index_wraps_palette() {
        let engine = engine();
        assert_eq!(engine.color_index(0), 2);
        assert_eq!(engine.color_index(13), 15);
        assert_eq!(engine.color_index(14), 2);
        assert_eq!(engine.color_index(40), 0);
    }

    #[test]
    fn test_pointer_maps_to_unit_square() {
        assert_eq!(pointer_to_c(IVec2::new(0, 0), 512, 384), Complex::new(-1.0, -1.0));
        assert_eq!(pointer_to_c(IVec2::new(256, 192), 512, 384), Complex::ZERO);
    }

    #[test]
    fn test_cursor_pointer_motion() {
        let mut cursor = CursorControl::default();
        let input = FrameInput {
            pointer: Some(IVec2::new(384, 192)),
            ..Default::default()
        };
        let delta = cursor.delta(&input, Complex::ZERO, 512, 384);
        assert_eq!(delta, Complex::new(0.5, 0.0));

        // Pointer did not move: no delta, so keys can fine-tune
        let delta = cursor.delta(&input, Complex::new(0.5, 0.0), 512, 384);
        assert_eq!(delta, Complex::ZERO);
    }

    #[test]
    fn test_cursor_keys_repeat_every_few_frames() {
        let mut cursor = CursorControl::default();
        let input = FrameInput {
            held: vec![Direction::Right],
            ..Default::default()
        };
        let nudges: Vec<f64> = (0..6)
            .map(|_| cursor.delta(&input, Complex::ZERO, 512, 384).re)
            .collect();
        assert_eq!(nudges, vec![0.01, 0.0, 0.0, 0.01, 0.0, 0.0]);

        let coarse = FrameInput {
            held: vec![Direction::Up],
            coarse: true,
            ..Default::default()
        };
        let mut cursor = CursorControl::default();
        assert_eq!(cursor.delta(&coarse, Complex::ZERO, 512, 384), Complex::new(0.0, -0.1));
    }
}
