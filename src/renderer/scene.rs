//! Per-mode draw pass

use glam::IVec2;

use super::canvas::Canvas;
use super::palette::{
    BACKGROUND, BACKGROUND_BAND_HEIGHT, BLACK, BROWN, CYAN, DARK_BLUE, GREEN, LIGHT_BLUE, LIME,
    ORANGE, PEACH, PINK, RAINBOW, RED, WHITE, YELLOW,
};
use crate::consts::{BUTTON_HEIGHT, BUTTON_WIDTH};
use crate::sim::{
    ActiveMode, ChewingRound, GameSession, LoseScreen, MenuButton, MenuScreen, Round,
};

/// Character cell of the built-in font
const GLYPH_WIDTH: i32 = 4;
const GLYPH_HEIGHT: i32 = 6;

/// Height of the black strip behind the chewing HUD
const HUD_HEIGHT: i32 = 24;

/// Draw the whole frame for the live mode
pub fn draw(session: &GameSession, canvas: &mut dyn Canvas) {
    let (w, h) = (session.config.field_width, session.config.field_height);
    draw_background(canvas, w, h);

    match &session.mode {
        ActiveMode::Menu(menu) => draw_menu(canvas, menu, w, h),
        ActiveMode::Gameplay(round) => draw_gameplay(canvas, session, round),
        ActiveMode::Chewing(chewing) => draw_chewing(canvas, session, chewing),
        ActiveMode::Lose(lose) => draw_lose(canvas, lose, w, h),
    }
}

/// Horizontal colour bands, top to bottom
pub fn draw_background(canvas: &mut dyn Canvas, width: i32, height: i32) {
    let last = (BACKGROUND.len() - 1) as f32;
    let span = (height - 1).max(1) as f32;
    for y in (0..height).step_by(BACKGROUND_BAND_HEIGHT as usize) {
        let idx = ((y as f32 / span) * last) as usize;
        canvas.rect(0, y, width, BACKGROUND_BAND_HEIGHT, BACKGROUND[idx]);
    }
}

fn button_colors(button: MenuButton) -> (u8, u8) {
    match button {
        MenuButton::Play => (LIGHT_BLUE, CYAN),
        MenuButton::Sound => (YELLOW, DARK_BLUE),
        MenuButton::Exit => (LIME, GREEN),
    }
}

fn draw_menu(canvas: &mut dyn Canvas, menu: &MenuScreen, w: i32, h: i32) {
    canvas.text(w / 2 - 40, 40, "CHEW OR DIE", WHITE);
    canvas.text(
        w / 2 - 170,
        50,
        "SNAKE GAME but... WHEN YOU REACH THE FOOD YOU HAVE TO CHEW UNTIL YOU REACH THE TARGET",
        WHITE,
    );

    for button in MenuButton::ALL {
        let origin = button.origin(w, h);
        let (base, hover) = button_colors(button);
        let color = if menu.hover == Some(button) { hover } else { base };
        canvas.rect(origin.x, origin.y, BUTTON_WIDTH, BUTTON_HEIGHT, color);

        let label = button.label();
        let text_x = origin.x + (BUTTON_WIDTH - label.len() as i32 * GLYPH_WIDTH) / 2;
        let text_y = origin.y + (BUTTON_HEIGHT - GLYPH_HEIGHT) / 2;
        canvas.text(text_x, text_y, label, BLACK);
    }
}

fn draw_dots(canvas: &mut dyn Canvas, round: &Round) {
    let radius = round.dots.difficulty().radius as i32;
    for dot in round.dots.dots() {
        let centre = dot.center();
        canvas.circ(centre.x as i32, centre.y as i32, radius, dot.color);
    }
}

fn draw_fruit(canvas: &mut dyn Canvas, pos: IVec2) {
    canvas.circ(pos.x + 8, pos.y + 8, 6, RED);
    // highlight and stem
    canvas.circ(pos.x + 5, pos.y + 5, 2, WHITE);
    canvas.rect(pos.x + 7, pos.y + 1, 2, 3, BROWN);
}

fn draw_head(canvas: &mut dyn Canvas, pos: IVec2, size: i32) {
    let IVec2 { x, y } = pos;
    canvas.rect(x, y, size, size, YELLOW);

    // ears
    canvas.tri(
        IVec2::new(x, y),
        IVec2::new(x + 5, y - 5),
        IVec2::new(x + 10, y),
        RED,
    );
    canvas.tri(
        IVec2::new(x + size - 10, y),
        IVec2::new(x + size - 5, y - 5),
        IVec2::new(x + size, y),
        RED,
    );

    // eyes
    canvas.rect(x + 3, y + 4, 4, 4, WHITE);
    canvas.rect(x + 9, y + 4, 4, 4, WHITE);
    canvas.pset(x + 5, y + 6, BLACK);
    canvas.pset(x + 11, y + 6, BLACK);

    // nose
    canvas.rect(x + 6, y + 9, 4, 2, ORANGE);
}

fn draw_snake(canvas: &mut dyn Canvas, round: &Round) {
    let player = &round.player;
    let size = player.segment_size();
    let Some((head, body)) = player.segments().split_first() else {
        return;
    };

    // Body first so the head's ears sit on top
    for (i, seg) in body.iter().enumerate() {
        canvas.rect(seg.x, seg.y, size, size, RAINBOW[i % RAINBOW.len()]);
    }
    draw_head(canvas, *head, size);
}

fn draw_gameplay(canvas: &mut dyn Canvas, session: &GameSession, round: &Round) {
    let w = session.config.field_width;
    let h = session.config.field_height;

    draw_dots(canvas, round);
    draw_fruit(canvas, round.fruit.pos);
    draw_snake(canvas, round);

    canvas.text(4, 4, &format!("SCORE: {}", session.score), WHITE);
    canvas.text(
        4,
        h - 10,
        &format!("DANGER LEVEL = {}", round.dots.difficulty().danger()),
        YELLOW,
    );

    if session.slice_fx_ticks > 0 {
        canvas.text(w / 2 - 30, 20, "-1 SLICE!", RED);
    }
}

fn draw_chewing(canvas: &mut dyn Canvas, session: &GameSession, chewing: &ChewingRound) {
    let w = session.config.field_width;
    let engine = &chewing.engine;

    draw_dots(canvas, &chewing.round);

    let stride = engine.stride();
    for sample in engine.sample_field() {
        canvas.rect(
            sample.pixel.x,
            sample.pixel.y,
            stride,
            stride,
            engine.color_index(sample.iterations),
        );
    }

    let current = engine.current_c();
    let target = engine.target_c();
    canvas.rect(0, 0, w, HUD_HEIGHT, BLACK);
    canvas.text(
        4,
        4,
        &format!("CURRENT C: {:.2} + {:.2}i", current.re, current.im),
        WHITE,
    );
    canvas.text(
        w - 70,
        4,
        &format!("TIME: {}", engine.seconds_remaining(session.config.fps)),
        ORANGE,
    );
    canvas.text(
        4,
        14,
        &format!("TARGET C: {:.2} + {:.2}i", target.re, target.im),
        YELLOW,
    );
    canvas.text(
        200,
        9,
        "CHEW YOUR FOOD, MOVE MOUSE TO MATCH THE TARGET C!!",
        PEACH,
    );
}

fn draw_lose(canvas: &mut dyn Canvas, lose: &LoseScreen, w: i32, h: i32) {
    canvas.text(w / 2 - 30, h / 2 - 20, "STOMACH ACHE!", WHITE);
    canvas.text(
        w / 2 - 40,
        h / 2,
        &format!("FINAL SCORE: {}", lose.final_score),
        WHITE,
    );
    canvas.text(w / 2 - 90, h / 2 + 20, "PRESS SPACE TO RETURN", PINK);
}
