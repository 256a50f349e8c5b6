//! Per-frame update and mode transitions
//!
//! `GameSession::update` routes the frame to the active mode's owner,
//! reads back its outcome and applies score and mode changes. The update
//! completes before any draw pass reads the session.

use super::complex::Complex;
use super::dots::CollisionOutcome;
use super::fractal::{ChewOutcome, FractalEngine};
use super::fruit::FruitTarget;
use super::player::StepOutcome;
use super::state::{
    ActiveMode, ChewingRound, GameEvent, GameSession, LoseScreen, MenuButton, MenuScreen, Mode,
    Round,
};
use crate::config::{DotCollisionPolicy, GameConfig};
use crate::consts::SLICED_FX_DURATION;
use crate::input::FrameInput;
use rand_pcg::Pcg32;

/// Outcome of a gameplay frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameplayOutcome {
    Continue,
    FruitEaten,
    SelfCollision,
    /// The head sliced dots; `fruit_eaten` if it also landed on the fruit
    DotCollision { count: u32, fruit_eaten: bool },
}

/// Pending mode change computed from an owner's outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    StartRun,
    EnterChewing,
    ChewWon,
    Lose,
    ToMenu,
}

/// Everything a mode owner may touch besides its own state
struct FrameCtx<'a> {
    config: &'a GameConfig,
    rng: &'a mut Pcg32,
    frame: u64,
    score: u32,
    cadence: u32,
}

impl Round {
    /// One gameplay frame: steer, step the snake, then move and test dots
    fn update(&mut self, ctx: &mut FrameCtx<'_>, input: &FrameInput) -> GameplayOutcome {
        if let Some(direction) = input.pressed {
            self.player.set_direction(direction);
        }
        self.player.set_cadence(ctx.cadence);

        let step = self.player.step(Some(self.fruit.pos));
        if let StepOutcome::SelfCollision { .. } = step {
            return GameplayOutcome::SelfCollision;
        }
        let fruit_eaten = matches!(step, StepOutcome::FruitEaten { .. });

        let distance = self.fractal_distance(ctx.config);
        let hit = self.dots.update(
            ctx.rng,
            ctx.frame,
            ctx.score,
            distance,
            self.player.head_position(),
        );

        match hit {
            CollisionOutcome::Hit { count } => GameplayOutcome::DotCollision { count, fruit_eaten },
            CollisionOutcome::Clear if fruit_eaten => GameplayOutcome::FruitEaten,
            CollisionOutcome::Clear => GameplayOutcome::Continue,
        }
    }
}

impl ChewingRound {
    /// One chewing frame: dots keep falling harmlessly, the cursor moves
    fn update(&mut self, ctx: &mut FrameCtx<'_>, input: &FrameInput) -> ChewOutcome {
        let distance = self.round.fractal_distance(ctx.config);
        self.round
            .dots
            .advance(ctx.rng, ctx.frame, ctx.score, distance);

        let delta = self.cursor.delta(
            input,
            self.engine.current_c(),
            ctx.config.field_width,
            ctx.config.field_height,
        );
        self.engine.update(delta)
    }
}

impl MenuScreen {
    /// Track hover and report the activated button, if any
    fn update(&mut self, config: &GameConfig, input: &FrameInput) -> Option<MenuButton> {
        self.hover = input.pointer.and_then(|pos| {
            MenuButton::ALL
                .into_iter()
                .find(|b| b.contains(pos, config.field_width, config.field_height))
        });
        if input.confirm {
            return Some(MenuButton::Play);
        }
        if input.click { self.hover } else { None }
    }
}

impl GameSession {
    /// Advance the session by one frame
    pub fn update(&mut self, input: &FrameInput) {
        self.events.clear();
        self.frame += 1;
        self.slice_fx_ticks = self.slice_fx_ticks.saturating_sub(1);

        if input.quit {
            self.request_quit();
        }

        let cadence = self.move_cadence();
        let mut ctx = FrameCtx {
            config: &self.config,
            rng: &mut self.rng,
            frame: self.frame,
            score: self.score,
            cadence,
        };

        let transition = match &mut self.mode {
            ActiveMode::Menu(menu) => match menu.update(ctx.config, input) {
                Some(MenuButton::Play) => Some(Transition::StartRun),
                Some(MenuButton::Sound) => {
                    self.events.push(GameEvent::SoundToggled);
                    None
                }
                Some(MenuButton::Exit) => {
                    self.request_quit();
                    None
                }
                None => None,
            },
            ActiveMode::Gameplay(round) => {
                let outcome = round.update(&mut ctx, input);
                self.apply_gameplay_outcome(outcome)
            }
            ActiveMode::Chewing(chewing) => match chewing.update(&mut ctx, input) {
                ChewOutcome::Continue => None,
                ChewOutcome::Won => {
                    self.events.push(GameEvent::ChewWon);
                    Some(Transition::ChewWon)
                }
                ChewOutcome::TimedOut => {
                    self.events.push(GameEvent::ChewTimedOut);
                    Some(Transition::Lose)
                }
            },
            ActiveMode::Lose(_) => input.confirm.then_some(Transition::ToMenu),
        };

        if let Some(transition) = transition {
            self.apply(transition);
        }
    }

    /// Start a fresh run: initial score, new snake, no dots, new fruit
    ///
    /// Nothing from a previous run survives, so calling it twice in a row
    /// leaves the same kind of state as calling it once.
    pub fn reset(&mut self) {
        self.score = self.config.initial_score;
        self.slice_fx_ticks = 0;
        let round = Round::new(&self.config, &mut self.rng);
        self.set_mode(ActiveMode::Gameplay(round));
    }

    fn request_quit(&mut self) {
        if !self.quit_requested {
            log::info!("Quit requested");
        }
        self.quit_requested = true;
        self.events.push(GameEvent::QuitRequested);
    }

    fn apply_gameplay_outcome(&mut self, outcome: GameplayOutcome) -> Option<Transition> {
        match outcome {
            GameplayOutcome::Continue => None,
            GameplayOutcome::FruitEaten => {
                self.events.push(GameEvent::FruitEaten);
                Some(Transition::EnterChewing)
            }
            GameplayOutcome::SelfCollision => {
                self.events.push(GameEvent::Crashed);
                Some(Transition::Lose)
            }
            GameplayOutcome::DotCollision { count, fruit_eaten } => {
                self.events.push(GameEvent::DotSliced { count });
                match self.config.dot_collision_policy {
                    DotCollisionPolicy::Fatal => Some(Transition::Lose),
                    DotCollisionPolicy::Penalty(points) => {
                        self.score = self.score.saturating_sub(points.saturating_mul(count));
                        self.slice_fx_ticks = SLICED_FX_DURATION;
                        if self.score == 0 {
                            Some(Transition::Lose)
                        } else if fruit_eaten {
                            self.events.push(GameEvent::FruitEaten);
                            Some(Transition::EnterChewing)
                        } else {
                            None
                        }
                    }
                }
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::StartRun => self.reset(),
            Transition::EnterChewing => {
                if let ActiveMode::Gameplay(round) = self.take_mode() {
                    let mut engine = FractalEngine::new(&self.config);
                    engine.begin(round.fruit.c);
                    self.set_mode(ActiveMode::Chewing(ChewingRound {
                        round,
                        engine,
                        cursor: Default::default(),
                    }));
                }
            }
            Transition::ChewWon => {
                if let ActiveMode::Chewing(ChewingRound { mut round, .. }) = self.take_mode() {
                    self.score = self.score.saturating_add(self.config.fruit_reward);
                    round.player.grow();
                    round.fruit = FruitTarget::spawn(&mut self.rng, &self.config, &round.player);
                    self.set_mode(ActiveMode::Gameplay(round));
                }
            }
            Transition::Lose => {
                self.events.push(GameEvent::GameOver { score: self.score });
                self.set_mode(ActiveMode::Lose(LoseScreen {
                    final_score: self.score,
                }));
            }
            Transition::ToMenu => self.set_mode(ActiveMode::Menu(MenuScreen::default())),
        }
    }

    /// Move the active mode out, leaving an empty menu in its place
    fn take_mode(&mut self) -> ActiveMode {
        std::mem::replace(&mut self.mode, ActiveMode::Menu(MenuScreen::default()))
    }

    fn set_mode(&mut self, mode: ActiveMode) {
        let from = self.current_mode();
        let to = mode.mode();
        self.mode = mode;
        log::info!(
            "Mode {} -> {} (score {}, frame {})",
            from.as_str(),
            to.as_str(),
            self.score,
            self.frame
        );
        if to == Mode::Chewing {
            if let Some(chewing) = self.chewing() {
                let Complex { re, im } = chewing.engine.target_c();
                log::debug!("Chewing toward {re:.2} + {im:.2}i");
            }
        }
    }
}
