//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per frame; frames are the only unit of time
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod complex;
pub mod dots;
pub mod fractal;
pub mod fruit;
pub mod player;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use complex::{Complex, escape_iterations};
pub use dots::{CollisionOutcome, Difficulty, Dot, DotManager};
pub use fractal::{ChewOutcome, CursorControl, FieldSample, FractalEngine};
pub use fruit::FruitTarget;
pub use player::{Direction, Player, StepOutcome};
pub use state::{
    ActiveMode, ChewingRound, GameEvent, GameSession, LoseScreen, MenuButton, MenuScreen, Mode,
    Round,
};
pub use tick::GameplayOutcome;
