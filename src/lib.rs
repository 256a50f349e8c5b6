//! Chew or Die - a snake arcade game with a Julia set chewing mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake, obstacles, fractal, mode state machine)
//! - `app`: Frame driver that owns the session, audio and quit state
//! - `renderer`: Read-only draw pass against an abstract `Canvas`
//! - `audio`: Sound cue dispatch with a process-lifetime mute toggle
//! - `config`: Immutable startup configuration

pub mod app;
pub mod audio;
pub mod config;
pub mod input;
pub mod renderer;
pub mod sim;

pub use app::App;
pub use config::{ConfigError, DotCollisionPolicy, GameConfig};
pub use input::FrameInput;

/// Game tuning constants that are not part of the loadable configuration
pub mod consts {
    /// Points per difficulty level
    pub const DIFFICULTY_SCORE_STEP: u32 = 30;
    /// No obstacles spawn below this score
    pub const DOT_SPAWN_SCORE_THRESHOLD: u32 = 10;

    /// Spawn interval before difficulty scaling (frames)
    pub const DOT_BASE_SPAWN_INTERVAL: u32 = 16;
    /// Spawn interval floor (frames)
    pub const DOT_MIN_SPAWN_INTERVAL: u32 = 6;
    /// Frames removed from the interval per difficulty level
    pub const DOT_INTERVAL_STEP_PER_LEVEL: u32 = 2;
    /// Interval frames removed per unit of target distance
    pub const DOT_DISTANCE_REDUCTION: f64 = 25.0;
    /// Radius growth per unit of target distance
    pub const DOT_DISTANCE_SCALE: f64 = 10.0;
    /// Obstacle radius ceiling (pixels)
    pub const DOT_MAX_RADIUS: u32 = 3;
    /// Horizontal oscillation amplitude (pixels)
    pub const DOT_OSCILLATION_AMPLITUDE: f32 = 20.0;
    /// Oscillation phase advance per frame (radians)
    pub const DOT_OSCILLATION_RATE: f32 = 0.1;
    /// Fall speed multiplier once an obstacle is sliced
    pub const DOT_SLICED_SPEED_MULTIPLIER: f32 = 6.0;
    /// Frames a sliced obstacle lingers before removal
    pub const SLICED_FX_DURATION: u32 = 15;

    /// Half-width of the target constant jitter around `baseC`
    pub const TARGET_C_JITTER: f64 = 0.15;

    /// Escape radius for the Julia iteration
    pub const ESCAPE_RADIUS: f64 = 2.0;
    /// Z-plane window sampled by the fractal field
    pub const FRACTAL_MIN: f64 = -1.5;
    pub const FRACTAL_MAX: f64 = 1.5;

    /// Cursor nudge per key press (fine / coarse)
    pub const CURSOR_FINE_STEP: f64 = 0.01;
    pub const CURSOR_COARSE_STEP: f64 = 0.1;
    /// Frames between repeated cursor nudges while a key is held
    pub const CURSOR_REPEAT_DELAY: u32 = 3;

    /// Number of colours the draw pass can address
    pub const PALETTE_SIZE: u32 = 16;

    /// Segments in a freshly spawned snake
    pub const INITIAL_BODY_LENGTH: i32 = 3;

    /// Menu button geometry
    pub const BUTTON_WIDTH: i32 = 150;
    pub const BUTTON_HEIGHT: i32 = 40;
    pub const MENU_BUTTON_GAP: i32 = 40;
}

/// Wrap a coordinate into `[0, extent)` using true modulo
#[inline]
pub fn wrap_coord(value: i32, extent: i32) -> i32 {
    debug_assert!(extent > 0, "wrap extent must be positive");
    value.rem_euclid(extent)
}

/// Difficulty level for a score
#[inline]
pub fn difficulty_level(score: u32) -> u32 {
    score / consts::DIFFICULTY_SCORE_STEP
}
