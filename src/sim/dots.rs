//! Falling obstacles ("dots"): spawning, difficulty curve and head collisions
//!
//! Difficulty is a pure function of the current score and of how far the
//! last fruit's target constant sits from `baseC`. Nothing is carried over
//! between frames except the spawn counter.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::difficulty_level;

/// Difficulty derived from score and target distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub level: u32,
    /// Obstacle radius in pixels
    pub radius: u32,
    /// Frames between spawns
    pub spawn_interval: u32,
}

impl Difficulty {
    pub fn compute(score: u32, fractal_distance: f64) -> Self {
        debug_assert!(
            fractal_distance.is_finite() && fractal_distance >= 0.0,
            "fractal distance must be a non-negative number"
        );
        let distance = if fractal_distance.is_finite() {
            fractal_distance.max(0.0)
        } else {
            0.0
        };

        let level = difficulty_level(score);
        let scale = (distance * DOT_DISTANCE_SCALE).floor() as u32;
        let radius = DOT_MAX_RADIUS.min(1 + scale);

        let base_interval = DOT_MIN_SPAWN_INTERVAL.max(
            DOT_BASE_SPAWN_INTERVAL.saturating_sub(level.saturating_mul(DOT_INTERVAL_STEP_PER_LEVEL)),
        );
        let reduction = (distance * DOT_DISTANCE_REDUCTION).floor() as u32;
        let spawn_interval = DOT_MIN_SPAWN_INTERVAL.max(base_interval.saturating_sub(reduction));

        Self {
            level,
            radius,
            spawn_interval,
        }
    }

    /// HUD "danger level"
    pub fn danger(&self) -> u32 {
        self.radius * self.spawn_interval / 10
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::compute(0, 0.0)
    }
}

/// A falling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dot {
    pub y: f32,
    pub fall_speed: f32,
    /// Palette colour index
    pub color: u8,
    /// Terminal: collided with the player, inert until removed
    pub sliced: bool,
    /// Frames left in the slice effect
    pub sliced_ticks: u32,
    /// Spawn anchor
    pub base_x: f32,
    /// Anchor plus oscillation, wrapped into the field
    pub x: f32,
}

impl Dot {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn slice(&mut self) {
        self.sliced = true;
        self.sliced_ticks = SLICED_FX_DURATION;
    }
}

/// Result of a collision check against the snake head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Clear,
    /// One or more dots were sliced this frame
    Hit { count: u32 },
}

/// Owns the falling obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DotManager {
    dots: Vec<Dot>,
    difficulty: Difficulty,
    /// Frames since the last spawn (only advances while spawning is unlocked)
    spawn_counter: u32,
    field_width: i32,
    field_height: i32,
    segment_size: i32,
}

impl DotManager {
    pub fn new(field_width: i32, field_height: i32, segment_size: i32) -> Self {
        Self {
            dots: Vec::new(),
            difficulty: Difficulty::default(),
            spawn_counter: 0,
            field_width,
            field_height,
            segment_size,
        }
    }

    /// Full gameplay update: spawn, move, then test the head
    pub fn update<R: Rng>(
        &mut self,
        rng: &mut R,
        frame: u64,
        score: u32,
        fractal_distance: f64,
        head: IVec2,
    ) -> CollisionOutcome {
        self.advance(rng, frame, score, fractal_distance);
        self.check_collision(head)
    }

    /// Spawn and move dots without testing collisions
    pub fn advance<R: Rng>(&mut self, rng: &mut R, frame: u64, score: u32, fractal_distance: f64) {
        self.difficulty = Difficulty::compute(score, fractal_distance);

        if score >= DOT_SPAWN_SCORE_THRESHOLD {
            self.spawn_counter += 1;
            if self.spawn_counter >= self.difficulty.spawn_interval {
                self.spawn_counter = 0;
                self.spawn(rng, frame);
            }
        }

        let offset = oscillation(frame);
        let width = self.field_width as f32;
        for dot in &mut self.dots {
            let speed = if dot.sliced {
                dot.fall_speed * DOT_SLICED_SPEED_MULTIPLIER
            } else {
                dot.fall_speed
            };
            dot.y += speed;
            dot.x = (dot.base_x + offset).rem_euclid(width);
            if dot.sliced {
                dot.sliced_ticks = dot.sliced_ticks.saturating_sub(1);
            }
        }

        let height = self.field_height as f32;
        self.dots
            .retain(|dot| dot.y < height && !(dot.sliced && dot.sliced_ticks == 0));
    }

    /// Slice every live dot whose centre is within reach of the head cell
    pub fn check_collision(&mut self, head: IVec2) -> CollisionOutcome {
        let half = self.segment_size as f32 / 2.0;
        let head_center = head.as_vec2() + Vec2::splat(half);
        let reach = self.difficulty.radius as f32 + half;

        let mut count = 0;
        for dot in self.dots.iter_mut().filter(|d| !d.sliced) {
            if head_center.distance(dot.center()) <= reach {
                dot.slice();
                count += 1;
            }
        }

        if count > 0 {
            CollisionOutcome::Hit { count }
        } else {
            CollisionOutcome::Clear
        }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn clear(&mut self) {
        self.dots.clear();
        self.spawn_counter = 0;
    }

    fn spawn<R: Rng>(&mut self, rng: &mut R, frame: u64) {
        let base_x = rng.random_range(0..self.field_width) as f32;
        let dot = Dot {
            y: 0.0,
            fall_speed: rng.random_range(1.0..3.0),
            color: rng.random_range(2..=15),
            sliced: false,
            sliced_ticks: 0,
            base_x,
            x: (base_x + oscillation(frame)).rem_euclid(self.field_width as f32),
        };
        log::debug!(
            "Dot spawned at x={:.0} (interval {}, radius {})",
            dot.x,
            self.difficulty.spawn_interval,
            self.difficulty.radius
        );
        self.dots.push(dot);
    }

    #[cfg(test)]
    pub(crate) fn push_dot(&mut self, x: f32, y: f32, fall_speed: f32) {
        self.dots.push(Dot {
            y,
            fall_speed,
            color: 8,
            sliced: false,
            sliced_ticks: 0,
            base_x: x,
            x,
        });
    }
}

/// Shared horizontal offset for every dot at `frame`
fn oscillation(frame: u64) -> f32 {
    let phase = frame as f64 * DOT_OSCILLATION_RATE as f64;
    DOT_OSCILLATION_AMPLITUDE * phase.sin() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn manager() -> DotManager {
        DotManager::new(512, 384, 16)
    }

    #[test]
    fn test_difficulty_baseline() {
        let d = Difficulty::compute(0, 0.0);
        assert_eq!(d.level, 0);
        assert_eq!(d.radius, 1);
        assert_eq!(d.spawn_interval, 16);
    }

    #[test]
    fn test_difficulty_level_shortens_interval() {
        assert_eq!(Difficulty::compute(30, 0.0).spawn_interval, 14);
        assert_eq!(Difficulty::compute(90, 0.0).spawn_interval, 10);
        assert_eq!(Difficulty::compute(1_000, 0.0).spawn_interval, 6);
    }

    #[test]
    fn test_difficulty_distance_scaling() {
        let d = Difficulty::compute(0, 0.13);
        assert_eq!(d.radius, 2);
        // 16 - floor(3.25) = 13
        assert_eq!(d.spawn_interval, 13);

        let far = Difficulty::compute(0, 0.5);
        assert_eq!(far.radius, 3);
        assert_eq!(far.spawn_interval, 6);
    }

    #[test]
    fn test_no_spawn_below_threshold() {
        let mut dots = manager();
        let mut rng = Pcg32::seed_from_u64(3);
        for frame in 0..1_000 {
            dots.advance(&mut rng, frame, 9, 0.0);
        }
        assert!(dots.dots().is_empty());
    }

    #[test]
    fn test_spawns_at_threshold() {
        let mut dots = manager();
        let mut rng = Pcg32::seed_from_u64(3);
        for frame in 0..16 {
            dots.advance(&mut rng, frame, 10, 0.0);
        }
        assert_eq!(dots.dots().len(), 1);
        let dot = &dots.dots()[0];
        assert!((1.0..3.0).contains(&dot.fall_speed));
        assert!((2..=15).contains(&dot.color));
        assert!(dot.x >= 0.0 && dot.x < 512.0);
    }

    #[test]
    fn test_dots_fall_and_leave_field() {
        let mut dots = manager();
        let mut rng = Pcg32::seed_from_u64(3);
        dots.push_dot(100.0, 383.0, 2.0);
        dots.push_dot(200.0, 10.0, 2.0);
        dots.advance(&mut rng, 0, 0, 0.0);
        assert_eq!(dots.dots().len(), 1);
        assert_eq!(dots.dots()[0].y, 12.0);
    }

    #[test]
    fn test_oscillation_follows_frame() {
        let mut dots = manager();
        let mut rng = Pcg32::seed_from_u64(3);
        dots.push_dot(100.0, 0.0, 1.0);
        dots.advance(&mut rng, 0, 0, 0.0);
        assert_eq!(dots.dots()[0].x, 100.0);
        dots.advance(&mut rng, 16, 0, 0.0);
        let expected = 100.0 + 20.0 * (1.6f32).sin();
        assert!((dots.dots()[0].x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_collision_slices_dot_once() {
        let mut dots = manager();
        let mut rng = Pcg32::seed_from_u64(3);
        dots.push_dot(72.0, 70.0, 1.0);
        let outcome = dots.update(&mut rng, 0, 0, 0.0, IVec2::new(64, 64));
        assert_eq!(outcome, CollisionOutcome::Hit { count: 1 });
        assert!(dots.dots()[0].sliced);

        // Sliced dots are inert
        assert_eq!(dots.check_collision(IVec2::new(64, 64)), CollisionOutcome::Clear);
    }

    #[test]
    fn test_collision_uses_center_distance() {
        let mut dots = manager();
        // Head centre (72, 72); reach = radius 1 + 8 = 9
        dots.push_dot(72.0, 81.0, 0.0);
        dots.push_dot(72.0, 81.5, 0.0);
        assert_eq!(
            dots.check_collision(IVec2::new(64, 64)),
            CollisionOutcome::Hit { count: 1 }
        );
        assert!(dots.dots()[0].sliced);
        assert!(!dots.dots()[1].sliced);
    }

    #[test]
    fn test_sliced_dot_removed_after_effect() {
        let mut dots = manager();
        let mut rng = Pcg32::seed_from_u64(3);
        dots.push_dot(72.0, 0.0, 0.0);
        dots.check_collision(IVec2::new(64, -8));
        assert!(dots.dots()[0].sliced);
        for frame in 0..SLICED_FX_DURATION as u64 - 1 {
            dots.advance(&mut rng, frame, 0, 0.0);
        }
        assert_eq!(dots.dots().len(), 1);
        dots.advance(&mut rng, 20, 0, 0.0);
        assert!(dots.dots().is_empty());
    }

    proptest! {
        #[test]
        fn prop_difficulty_monotonic_in_distance(
            score in 0u32..500,
            d1 in 0.0f64..1.0,
            d2 in 0.0f64..1.0,
        ) {
            let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            let a = Difficulty::compute(score, near);
            let b = Difficulty::compute(score, far);
            prop_assert!(b.spawn_interval <= a.spawn_interval);
            prop_assert!(b.radius >= a.radius);
            prop_assert!(b.spawn_interval >= DOT_MIN_SPAWN_INTERVAL);
            prop_assert!(b.radius <= DOT_MAX_RADIUS);
        }

        #[test]
        fn prop_never_spawns_below_threshold(score in 0u32..10, frames in 1u64..400) {
            let mut dots = manager();
            let mut rng = Pcg32::seed_from_u64(frames);
            for frame in 0..frames {
                dots.advance(&mut rng, frame, score, 0.3);
            }
            prop_assert!(dots.dots().is_empty());
        }
    }
}
