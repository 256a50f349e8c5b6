//! 16-colour palette indices used by the draw pass

pub const BLACK: u8 = 0;
pub const NAVY: u8 = 1;
pub const PURPLE: u8 = 2;
pub const GREEN: u8 = 3;
pub const BROWN: u8 = 4;
pub const DARK_BLUE: u8 = 5;
pub const LIGHT_BLUE: u8 = 6;
pub const WHITE: u8 = 7;
pub const RED: u8 = 8;
pub const ORANGE: u8 = 9;
pub const YELLOW: u8 = 10;
pub const LIME: u8 = 11;
pub const CYAN: u8 = 12;
pub const GRAY: u8 = 13;
pub const PINK: u8 = 14;
pub const PEACH: u8 = 15;

/// Snake body colours, cycled from the first segment behind the head
pub const RAINBOW: [u8; 7] = [PURPLE, LIGHT_BLUE, CYAN, LIME, YELLOW, PINK, PURPLE];

/// Background gradient, top to bottom
pub const BACKGROUND: [u8; 7] = [PURPLE, PINK, YELLOW, LIME, CYAN, LIGHT_BLUE, PURPLE];

/// Height of one background band in pixels
pub const BACKGROUND_BAND_HEIGHT: i32 = 6;
