//! Attract-mode autopilot
//!
//! Builds a `FrameInput` from the read-only session: walks the snake toward
//! the fruit while dodging its own body and nearby dots, and nudges the
//! chewing cursor toward the target.

use glam::IVec2;

use super::complex::Complex;
use super::player::{Direction, Player};
use super::state::{ActiveMode, ChewingRound, GameSession, Round};
use crate::consts::{CURSOR_COARSE_STEP, CURSOR_FINE_STEP};
use crate::input::FrameInput;

/// Extra cost for stepping next to a falling dot
const DOT_DANGER_COST: i32 = 1_000;

/// Input the autopilot would give this frame
pub fn autopilot_input(session: &GameSession) -> FrameInput {
    match &session.mode {
        ActiveMode::Menu(_) | ActiveMode::Lose(_) => FrameInput {
            confirm: true,
            ..Default::default()
        },
        ActiveMode::Gameplay(round) => FrameInput {
            pressed: steer(session, round),
            ..Default::default()
        },
        ActiveMode::Chewing(chewing) => chew(chewing),
    }
}

fn steer(session: &GameSession, round: &Round) -> Option<Direction> {
    let player = &round.player;
    let config = &session.config;
    let current = player.direction();

    Direction::ALL
        .into_iter()
        .filter(|&d| d != current.opposite())
        .filter_map(|d| {
            let next = player.peek_head(d);
            if blocked(player, next) {
                return None;
            }
            let mut cost = torus_distance(next, round.fruit.pos, config.field_width, config.field_height);
            if near_dot(round, next, config.segment_size) {
                cost += DOT_DANGER_COST;
            }
            // Prefer keeping the current heading on ties
            let tie_break = if d == current { 0 } else { 1 };
            Some((cost * 2 + tie_break, d))
        })
        .min_by_key(|&(cost, _)| cost)
        .map(|(_, d)| d)
}

/// Cell is taken by a segment that will still be there after the move
fn blocked(player: &Player, cell: IVec2) -> bool {
    let segments = player.segments();
    let staying = if player.pending_growth() > 0 {
        segments
    } else {
        &segments[..segments.len() - 1]
    };
    staying.contains(&cell)
}

fn near_dot(round: &Round, cell: IVec2, segment_size: i32) -> bool {
    let centre = (cell + IVec2::splat(segment_size / 2)).as_vec2();
    let reach = round.dots.difficulty().radius as f32 + segment_size as f32 * 1.5;
    round
        .dots
        .dots()
        .iter()
        .filter(|dot| !dot.sliced)
        .any(|dot| centre.distance(dot.center()) <= reach)
}

fn torus_distance(a: IVec2, b: IVec2, width: i32, height: i32) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx.min(width - dx) + dy.min(height - dy)
}

fn chew(chewing: &ChewingRound) -> FrameInput {
    let Complex { re: dre, im: dim } = chewing.engine.target_c() - chewing.engine.current_c();
    let coarse = dre.abs().max(dim.abs()) > CURSOR_COARSE_STEP * 0.95;
    let step = if coarse {
        CURSOR_COARSE_STEP
    } else {
        CURSOR_FINE_STEP
    };

    let mut held = Vec::new();
    if dre.abs() > step / 2.0 {
        held.push(if dre > 0.0 { Direction::Right } else { Direction::Left });
    }
    if dim.abs() > step / 2.0 {
        held.push(if dim > 0.0 { Direction::Down } else { Direction::Up });
    }

    FrameInput {
        held,
        coarse,
        ..Default::default()
    }
}
