//! Drawing surface abstraction

use glam::IVec2;

/// Pixel-art drawing surface with palette-indexed colours.
///
/// Coordinates are field pixels with the origin at the top-left.
pub trait Canvas {
    /// Filled rectangle
    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u8);
    /// Filled circle
    fn circ(&mut self, x: i32, y: i32, r: i32, color: u8);
    /// Filled triangle
    fn tri(&mut self, a: IVec2, b: IVec2, c: IVec2, color: u8);
    /// Single pixel
    fn pset(&mut self, x: i32, y: i32, color: u8);
    /// Text with the built-in 4x6 font
    fn text(&mut self, x: i32, y: i32, text: &str, color: u8);
}

/// Canvas that only counts what was drawn (headless runs and tests)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TallyCanvas {
    pub rects: usize,
    pub circles: usize,
    pub triangles: usize,
    pub pixels: usize,
    /// Every string drawn, in order
    pub texts: Vec<String>,
}

impl TallyCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total primitive count
    pub fn total(&self) -> usize {
        self.rects + self.circles + self.triangles + self.pixels + self.texts.len()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Canvas for TallyCanvas {
    fn rect(&mut self, _x: i32, _y: i32, _w: i32, _h: i32, _color: u8) {
        self.rects += 1;
    }

    fn circ(&mut self, _x: i32, _y: i32, _r: i32, _color: u8) {
        self.circles += 1;
    }

    fn tri(&mut self, _a: IVec2, _b: IVec2, _c: IVec2, _color: u8) {
        self.triangles += 1;
    }

    fn pset(&mut self, _x: i32, _y: i32, _color: u8) {
        self.pixels += 1;
    }

    fn text(&mut self, _x: i32, _y: i32, text: &str, _color: u8) {
        self.texts.push(text.to_owned());
    }
}
