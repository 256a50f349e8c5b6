//! Startup configuration
//!
//! Read once before the session is built and never mutated afterwards.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_BODY_LENGTH, PALETTE_SIZE};
use crate::sim::Complex;

/// What a dot collision costs the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DotCollisionPolicy {
    /// Any collision ends the run
    #[default]
    Fatal,
    /// Subtract points; the run ends only when the score hits zero
    Penalty(u32),
}

impl DotCollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DotCollisionPolicy::Fatal => "fatal",
            DotCollisionPolicy::Penalty(_) => "penalty",
        }
    }
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    // === Play field ===
    /// Field width in pixels (multiple of `segment_size`)
    pub field_width: i32,
    /// Field height in pixels (multiple of `segment_size`)
    pub field_height: i32,
    /// Edge length of one snake segment in pixels
    pub segment_size: i32,
    /// Logical frames per second (converts seconds to frames)
    pub fps: u32,

    // === Snake ===
    /// Frames per step at difficulty level 0
    pub move_cadence: u32,
    /// Fastest allowed cadence
    pub min_move_cadence: u32,
    pub initial_score: u32,
    /// Points awarded for finishing a chewing round
    pub fruit_reward: u32,
    pub dot_collision_policy: DotCollisionPolicy,

    // === Fractal ===
    pub max_iterations: u32,
    pub winning_tolerance: f64,
    pub chewing_time_seconds: u32,
    /// Centre of the target constant distribution
    pub base_c: Complex,
    /// Spatial sampling stride of the fractal field (pixels)
    pub render_stride: i32,
    pub palette_span: u32,
    pub palette_offset: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 512,
            field_height: 384,
            segment_size: 16,
            fps: 30,

            move_cadence: 5,
            min_move_cadence: 1,
            initial_score: 5,
            fruit_reward: 10,
            dot_collision_policy: DotCollisionPolicy::Fatal,

            max_iterations: 40,
            winning_tolerance: 0.015,
            chewing_time_seconds: 10,
            base_c: Complex::new(-0.5, 0.0),
            render_stride: 2,
            palette_span: 14,
            palette_offset: 2,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check the cross-field constraints the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segment_size <= 0 {
            return Err(ConfigError::invalid("segmentSize", "must be positive"));
        }
        if self.field_width <= 0 || self.field_width % self.segment_size != 0 {
            return Err(ConfigError::invalid(
                "fieldWidth",
                "must be a positive multiple of segmentSize",
            ));
        }
        // The starting body lies along one row and must not wrap onto itself
        if self.field_width < self.segment_size * INITIAL_BODY_LENGTH {
            return Err(ConfigError::invalid(
                "fieldWidth",
                "must fit the starting snake (3 segments)",
            ));
        }
        if self.field_height <= 0 || self.field_height % self.segment_size != 0 {
            return Err(ConfigError::invalid(
                "fieldHeight",
                "must be a positive multiple of segmentSize",
            ));
        }
        if self.fps == 0 {
            return Err(ConfigError::invalid("fps", "must be positive"));
        }
        if self.move_cadence == 0 {
            return Err(ConfigError::invalid("moveCadence", "must be positive"));
        }
        if self.min_move_cadence == 0 || self.min_move_cadence > self.move_cadence {
            return Err(ConfigError::invalid(
                "minMoveCadence",
                "must be in 1..=moveCadence",
            ));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::invalid("maxIterations", "must be positive"));
        }
        if self.chewing_time_seconds == 0 {
            return Err(ConfigError::invalid("chewingTimeSeconds", "must be positive"));
        }
        if self.chewing_time_seconds.checked_mul(self.fps).is_none() {
            return Err(ConfigError::invalid(
                "chewingTimeSeconds",
                "countdown in frames overflows u32",
            ));
        }
        if !(self.winning_tolerance.is_finite() && self.winning_tolerance > 0.0) {
            return Err(ConfigError::invalid(
                "winningTolerance",
                "must be a positive finite number",
            ));
        }
        if !self.base_c.is_finite() {
            return Err(ConfigError::invalid("baseC", "must be finite"));
        }
        if self.render_stride <= 0 {
            return Err(ConfigError::invalid("renderStride", "must be positive"));
        }
        if self.palette_span == 0 {
            return Err(ConfigError::invalid("paletteSpan", "must be positive"));
        }
        match self.palette_span.checked_add(self.palette_offset) {
            Some(end) if end <= PALETTE_SIZE => {}
            _ => {
                return Err(ConfigError::invalid(
                    "paletteSpan",
                    "paletteSpan + paletteOffset must not exceed the 16-colour palette",
                ));
            }
        }
        Ok(())
    }

    /// Chewing countdown length in frames (saturates on unvalidated configs)
    pub fn chewing_frames(&self) -> u32 {
        self.chewing_time_seconds.saturating_mul(self.fps)
    }

    /// Grid columns and rows
    pub fn grid_size(&self) -> (i32, i32) {
        (
            self.field_width / self.segment_size,
            self.field_height / self.segment_size,
        )
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read config: {err}"),
            Self::Parse(err) => write!(f, "could not parse config: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid config field {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}
