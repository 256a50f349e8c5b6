//! Fruit placement and the complex constant attached to each fruit

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::complex::Complex;
use super::player::Player;
use crate::config::GameConfig;
use crate::consts::TARGET_C_JITTER;

/// Random placement attempts before falling back to scanning free cells
const SPAWN_ATTEMPTS: u32 = 64;

/// A fruit on the grid and the constant the player must chew toward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FruitTarget {
    /// Top-left corner of the fruit cell
    pub pos: IVec2,
    /// Hidden Julia constant for the chewing round
    pub c: Complex,
}

impl FruitTarget {
    /// Place a fruit on a free cell and draw a fresh target constant
    pub fn spawn<R: Rng>(rng: &mut R, config: &GameConfig, player: &Player) -> Self {
        let pos = spawn_cell(rng, config, player);
        let c = target_constant(rng, config.base_c);
        log::debug!("Fruit at {pos}, target c = {:.2} + {:.2}i", c.re, c.im);
        Self { pos, c }
    }

    /// Distance of the target constant from the difficulty baseline
    pub fn distance_from(&self, base_c: Complex) -> f64 {
        self.c.distance(base_c)
    }
}

/// `base_c` plus a uniform jitter in each axis, rounded to hundredths
pub fn target_constant<R: Rng>(rng: &mut R, base_c: Complex) -> Complex {
    let dr = rng.random_range(-TARGET_C_JITTER..=TARGET_C_JITTER);
    let di = rng.random_range(-TARGET_C_JITTER..=TARGET_C_JITTER);
    Complex::new(round_hundredths(base_c.re + dr), round_hundredths(base_c.im + di))
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn spawn_cell<R: Rng>(rng: &mut R, config: &GameConfig, player: &Player) -> IVec2 {
    let (cols, rows) = config.grid_size();
    let size = config.segment_size;

    for _ in 0..SPAWN_ATTEMPTS {
        let cell = IVec2::new(rng.random_range(0..cols), rng.random_range(0..rows)) * size;
        if !player.occupies(cell) {
            return cell;
        }
    }

    // Crowded board: pick uniformly among the remaining free cells
    let free: Vec<IVec2> = (0..rows)
        .flat_map(|y| (0..cols).map(move |x| IVec2::new(x, y) * size))
        .filter(|cell| !player.occupies(*cell))
        .collect();
    if free.is_empty() {
        log::warn!("No free cell for fruit; placing it under the tail");
        return player.segments()[player.len() - 1];
    }
    free[rng.random_range(0..free.len())]
}
