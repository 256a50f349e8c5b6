//! Snake body, direction buffering and grid movement

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::INITIAL_BODY_LENGTH;
use crate::wrap_coord;

/// Cardinal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit grid vector (screen coordinates, y grows downward)
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Result of one `Player::step` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Cadence not reached; the body did not move
    Waiting,
    /// Moved one cell
    Moved { head: IVec2 },
    /// Moved onto the fruit cell
    FruitEaten { head: IVec2 },
    /// Next head cell is occupied by the body; the body did not move
    SelfCollision { head: IVec2 },
}

impl StepOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, StepOutcome::Moved { .. } | StepOutcome::FruitEaten { .. })
    }
}

/// The snake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Segment top-left corners, head first
    segments: Vec<IVec2>,
    direction: Direction,
    pending_direction: Direction,
    /// Frames per step
    cadence: u32,
    move_counter: u32,
    pending_growth: u32,
    field: IVec2,
    segment_size: i32,
}

impl Player {
    /// Three segments heading right from the grid cell nearest the centre
    pub fn new(field_width: i32, field_height: i32, segment_size: i32, cadence: u32) -> Self {
        let start = IVec2::new(
            field_width / 2 / segment_size * segment_size,
            field_height / 2 / segment_size * segment_size,
        );
        let segments = (0..INITIAL_BODY_LENGTH)
            .map(|i| start - IVec2::new(segment_size * i, 0))
            .collect();
        Self::with_body(
            segments,
            Direction::Right,
            field_width,
            field_height,
            segment_size,
            cadence,
        )
    }

    /// Build a snake from explicit segments (wrapped into the field)
    pub fn with_body(
        segments: Vec<IVec2>,
        direction: Direction,
        field_width: i32,
        field_height: i32,
        segment_size: i32,
        cadence: u32,
    ) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least one segment");
        debug_assert!(cadence > 0, "cadence must be positive");
        let field = IVec2::new(field_width, field_height);
        let segments = segments
            .into_iter()
            .map(|p| IVec2::new(wrap_coord(p.x, field.x), wrap_coord(p.y, field.y)))
            .collect();
        Self {
            segments,
            direction,
            pending_direction: direction,
            cadence: cadence.max(1),
            move_counter: 0,
            pending_growth: 0,
            field,
            segment_size,
        }
    }

    /// Buffer a direction for the next move; 180° reversals are ignored
    pub fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.pending_direction = direction;
        }
    }

    /// Advance the cadence counter and move one cell when it fires
    ///
    /// `fruit` is the active fruit cell, if any.
    pub fn step(&mut self, fruit: Option<IVec2>) -> StepOutcome {
        self.move_counter += 1;
        if self.move_counter < self.cadence {
            return StepOutcome::Waiting;
        }
        self.move_counter = 0;

        self.direction = self.pending_direction;
        let head = self.next_head();

        // The tail cell is vacated this step unless the snake is growing
        let checked = if self.pending_growth > 0 {
            &self.segments[..]
        } else {
            &self.segments[..self.segments.len() - 1]
        };
        if checked.contains(&head) {
            return StepOutcome::SelfCollision { head };
        }

        self.segments.insert(0, head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.segments.pop();
        }

        debug_assert!(self.in_bounds(head), "head left the field: {head}");

        if fruit == Some(head) {
            StepOutcome::FruitEaten { head }
        } else {
            StepOutcome::Moved { head }
        }
    }

    /// Schedule one extra segment; applied on the next move
    pub fn grow(&mut self) {
        self.pending_growth += 1;
    }

    pub fn head_position(&self) -> IVec2 {
        self.segments[0]
    }

    pub fn occupies(&self, pos: IVec2) -> bool {
        self.segments.contains(&pos)
    }

    pub fn segments(&self) -> &[IVec2] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn cadence(&self) -> u32 {
        self.cadence
    }

    /// Change frames-per-step; progress toward the next move is kept
    pub fn set_cadence(&mut self, cadence: u32) {
        self.cadence = cadence.max(1);
    }

    pub fn segment_size(&self) -> i32 {
        self.segment_size
    }

    /// Cell the head would enter if `direction` were applied now
    pub fn peek_head(&self, direction: Direction) -> IVec2 {
        let raw = self.segments[0] + direction.unit() * self.segment_size;
        IVec2::new(wrap_coord(raw.x, self.field.x), wrap_coord(raw.y, self.field.y))
    }

    fn next_head(&self) -> IVec2 {
        self.peek_head(self.direction)
    }

    fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.field.x && pos.y >= 0 && pos.y < self.field.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: i32 = 512;
    const H: i32 = 384;
    const S: i32 = 16;

    fn snake(body: &[(i32, i32)], direction: Direction) -> Player {
        let segments = body.iter().map(|&(x, y)| IVec2::new(x, y)).collect();
        Player::with_body(segments, direction, W, H, S, 1)
    }

    #[test]
    fn test_initial_body() {
        let player = Player::new(W, H, S, 5);
        assert_eq!(
            player.segments(),
            &[IVec2::new(256, 192), IVec2::new(240, 192), IVec2::new(224, 192)]
        );
        assert_eq!(player.direction(), Direction::Right);
    }

    #[test]
    fn test_wraps_pre_wrap_body_and_steps() {
        let mut player = snake(&[(0, 0), (-16, 0), (-32, 0)], Direction::Right);
        assert_eq!(player.segments()[1], IVec2::new(496, 0));

        let outcome = player.step(None);
        assert_eq!(outcome, StepOutcome::Moved { head: IVec2::new(16, 0) });
        assert_eq!(player.len(), 3);
        assert_eq!(
            player.segments(),
            &[IVec2::new(16, 0), IVec2::new(0, 0), IVec2::new(496, 0)]
        );
    }

    #[test]
    fn test_cadence_gates_movement() {
        let mut player = Player::new(W, H, S, 3);
        let head = player.head_position();
        assert_eq!(player.step(None), StepOutcome::Waiting);
        assert_eq!(player.step(None), StepOutcome::Waiting);
        assert!(player.step(None).moved());
        assert_eq!(player.head_position(), head + IVec2::new(S, 0));
        // Counter restarts after a move
        assert_eq!(player.step(None), StepOutcome::Waiting);
    }

    #[test]
    fn test_reverse_direction_ignored() {
        let mut player = snake(&[(64, 64), (48, 64)], Direction::Right);
        player.set_direction(Direction::Left);
        assert_eq!(player.pending_direction(), Direction::Right);

        player.set_direction(Direction::Up);
        assert_eq!(player.pending_direction(), Direction::Up);
        // Still measured against the current direction, not the buffered one
        player.set_direction(Direction::Left);
        assert_eq!(player.pending_direction(), Direction::Up);
        player.set_direction(Direction::Down);
        assert_eq!(player.pending_direction(), Direction::Down);
    }

    #[test]
    fn test_pending_direction_applied_on_move() {
        let mut player = snake(&[(64, 64), (48, 64)], Direction::Right);
        player.set_direction(Direction::Down);
        assert_eq!(player.direction(), Direction::Right);
        player.step(None);
        assert_eq!(player.direction(), Direction::Down);
        assert_eq!(player.head_position(), IVec2::new(64, 80));
    }

    #[test]
    fn test_growth_keeps_tail() {
        let mut player = snake(&[(64, 64), (48, 64), (32, 64)], Direction::Right);
        player.grow();
        player.step(None);
        assert_eq!(player.len(), 4);
        assert_eq!(player.segments()[3], IVec2::new(32, 64));
        assert_eq!(player.pending_growth(), 0);

        player.step(None);
        assert_eq!(player.len(), 4);
    }

    #[test]
    fn test_self_collision_against_body() {
        // Head at (32,32) heading down into (32,48), which is a mid-body segment
        let mut player = snake(
            &[(32, 32), (48, 32), (48, 48), (32, 48), (16, 48)],
            Direction::Down,
        );
        let outcome = player.step(None);
        assert_eq!(outcome, StepOutcome::SelfCollision { head: IVec2::new(32, 48) });
        assert_eq!(player.head_position(), IVec2::new(32, 32));
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        let mut player = snake(&[(32, 32), (48, 32), (48, 48), (32, 48)], Direction::Down);
        assert_eq!(player.step(None), StepOutcome::Moved { head: IVec2::new(32, 48) });
    }

    #[test]
    fn test_moving_into_tail_while_growing_collides() {
        let mut player = snake(&[(32, 32), (48, 32), (48, 48), (32, 48)], Direction::Down);
        player.grow();
        assert!(matches!(player.step(None), StepOutcome::SelfCollision { .. }));
    }

    #[test]
    fn test_single_segment_growth() {
        let mut player = snake(&[(0, 0)], Direction::Right);
        player.grow();
        assert!(player.step(None).moved());
        assert_eq!(player.segments(), &[IVec2::new(16, 0), IVec2::new(0, 0)]);
    }

    #[test]
    fn test_fruit_eaten() {
        let mut player = snake(&[(64, 64), (48, 64)], Direction::Right);
        let outcome = player.step(Some(IVec2::new(80, 64)));
        assert_eq!(outcome, StepOutcome::FruitEaten { head: IVec2::new(80, 64) });
        assert!(player.occupies(IVec2::new(80, 64)));
        assert!(!player.occupies(IVec2::new(48, 64)));
    }

    #[test]
    fn test_wraps_up_and_left() {
        let mut player = snake(&[(0, 0)], Direction::Up);
        player.step(None);
        assert_eq!(player.head_position(), IVec2::new(0, H - S));

        let mut player = snake(&[(0, 0)], Direction::Left);
        player.step(None);
        assert_eq!(player.head_position(), IVec2::new(W - S, 0));
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_step_stays_in_field(
            cx in 0i32..(W / S),
            cy in 0i32..(H / S),
            direction in direction_strategy(),
            steps in 1usize..64,
        ) {
            let mut player = snake(&[(cx * S, cy * S)], direction);
            for _ in 0..steps {
                player.step(None);
                let head = player.head_position();
                prop_assert!(head.x >= 0 && head.x < W);
                prop_assert!(head.y >= 0 && head.y < H);
                prop_assert_eq!(head.x % S, 0);
                prop_assert_eq!(head.y % S, 0);
            }
        }

        #[test]
        fn prop_reverse_never_changes_pending(direction in direction_strategy()) {
            let mut player = snake(&[(64, 64)], direction);
            let before = player.pending_direction();
            player.set_direction(direction.opposite());
            prop_assert_eq!(player.pending_direction(), before);
        }
    }
}
