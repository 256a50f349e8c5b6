//! Session state and the per-mode owners
//!
//! Exactly one `ActiveMode` variant is live at a time. Each variant owns
//! everything its mode mutates; transitions replace the variant wholesale.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::dots::DotManager;
use super::fractal::{CursorControl, FractalEngine};
use super::fruit::FruitTarget;
use super::player::Player;
use crate::config::GameConfig;
use crate::consts::{BUTTON_HEIGHT, BUTTON_WIDTH, MENU_BUTTON_GAP};
use crate::difficulty_level;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Gameplay,
    Chewing,
    Lose,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Menu => "menu",
            Mode::Gameplay => "gameplay",
            Mode::Chewing => "chewing",
            Mode::Lose => "lose",
        }
    }
}

/// Things that happened during the last update (drained by the app)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Snake head hit one or more dots
    DotSliced { count: u32 },
    FruitEaten,
    ChewWon,
    ChewTimedOut,
    /// Snake ran into itself
    Crashed,
    GameOver { score: u32 },
    SoundToggled,
    QuitRequested,
}

/// Snake, obstacles and fruit of the run in progress
#[derive(Debug, Clone)]
pub struct Round {
    pub player: Player,
    pub dots: DotManager,
    pub fruit: FruitTarget,
}

impl Round {
    pub fn new(config: &GameConfig, rng: &mut Pcg32) -> Self {
        let player = Player::new(
            config.field_width,
            config.field_height,
            config.segment_size,
            config.move_cadence,
        );
        let dots = DotManager::new(config.field_width, config.field_height, config.segment_size);
        let fruit = FruitTarget::spawn(rng, config, &player);
        Self { player, dots, fruit }
    }

    /// Distance of the active target constant from `baseC`
    pub fn fractal_distance(&self, config: &GameConfig) -> f64 {
        self.fruit.distance_from(config.base_c)
    }
}

/// A round suspended while the player chews
#[derive(Debug, Clone)]
pub struct ChewingRound {
    pub round: Round,
    pub engine: FractalEngine,
    pub cursor: CursorControl,
}

/// Menu buttons, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Play,
    Sound,
    Exit,
}

impl MenuButton {
    pub const ALL: [MenuButton; 3] = [MenuButton::Play, MenuButton::Sound, MenuButton::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuButton::Play => "PLAY",
            MenuButton::Sound => "SOUND: ON/OFF",
            MenuButton::Exit => "EXIT",
        }
    }

    /// Top-left corner of the button on a field of the given size
    pub fn origin(&self, field_width: i32, field_height: i32) -> IVec2 {
        let index = MenuButton::ALL
            .iter()
            .position(|b| b == self)
            .unwrap_or_default() as i32;
        IVec2::new(
            field_width / 2 - BUTTON_WIDTH / 2,
            field_height / 2 - 70 + MENU_BUTTON_GAP * index,
        )
    }

    /// Inclusive hit test, matching the drawn rectangle edges
    pub fn contains(&self, pos: IVec2, field_width: i32, field_height: i32) -> bool {
        let origin = self.origin(field_width, field_height);
        pos.x >= origin.x
            && pos.x <= origin.x + BUTTON_WIDTH
            && pos.y >= origin.y
            && pos.y <= origin.y + BUTTON_HEIGHT
    }
}

/// Main menu
#[derive(Debug, Clone, Default)]
pub struct MenuScreen {
    /// Button under the pointer (for hover colouring)
    pub hover: Option<MenuButton>,
}

/// Game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoseScreen {
    pub final_score: u32,
}

/// The live mode and the state it owns
#[derive(Debug, Clone)]
pub enum ActiveMode {
    Menu(MenuScreen),
    Gameplay(Round),
    Chewing(ChewingRound),
    Lose(LoseScreen),
}

impl ActiveMode {
    pub fn mode(&self) -> Mode {
        match self {
            ActiveMode::Menu(_) => Mode::Menu,
            ActiveMode::Gameplay(_) => Mode::Gameplay,
            ActiveMode::Chewing(_) => Mode::Chewing,
            ActiveMode::Lose(_) => Mode::Lose,
        }
    }
}

/// Complete game session (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u32,
    /// Frames since the session was created
    pub frame: u64,
    /// Frames left on the "SLICE" overlay
    pub slice_fx_ticks: u32,
    pub mode: ActiveMode,
    /// Events raised by the most recent update
    pub events: Vec<GameEvent>,
    pub quit_requested: bool,
}

impl GameSession {
    /// New session sitting on the menu
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            score: config.initial_score,
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            slice_fx_ticks: 0,
            mode: ActiveMode::Menu(MenuScreen::default()),
            events: Vec::new(),
            quit_requested: false,
        }
    }

    pub fn current_mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn difficulty_level(&self) -> u32 {
        difficulty_level(self.score)
    }

    /// The run in progress, whether moving or chewing
    pub fn round(&self) -> Option<&Round> {
        match &self.mode {
            ActiveMode::Gameplay(round) => Some(round),
            ActiveMode::Chewing(chewing) => Some(&chewing.round),
            _ => None,
        }
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        match &mut self.mode {
            ActiveMode::Gameplay(round) => Some(round),
            ActiveMode::Chewing(chewing) => Some(&mut chewing.round),
            _ => None,
        }
    }

    pub fn chewing(&self) -> Option<&ChewingRound> {
        match &self.mode {
            ActiveMode::Chewing(chewing) => Some(chewing),
            _ => None,
        }
    }

    /// Frames per snake step at the current difficulty
    pub fn move_cadence(&self) -> u32 {
        self.config
            .move_cadence
            .saturating_sub(self.difficulty_level())
            .max(self.config.min_move_cadence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_on_menu() {
        let session = GameSession::new(GameConfig::default(), 1);
        assert_eq!(session.current_mode(), Mode::Menu);
        assert_eq!(session.score, 5);
        assert!(session.round().is_none());
    }

    #[test]
    fn test_menu_buttons_stack_vertically() {
        let play = MenuButton::Play.origin(512, 384);
        let exit = MenuButton::Exit.origin(512, 384);
        assert_eq!(play, IVec2::new(181, 122));
        assert_eq!(exit, IVec2::new(181, 202));
        assert!(MenuButton::Play.contains(IVec2::new(200, 130), 512, 384));
        assert!(!MenuButton::Sound.contains(IVec2::new(200, 130), 512, 384));
    }

    #[test]
    fn test_cadence_speeds_up_with_level() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        assert_eq!(session.move_cadence(), 5);
        session.score = 60;
        assert_eq!(session.move_cadence(), 3);
        session.score = 1_000;
        assert_eq!(session.move_cadence(), 1);
    }
}
