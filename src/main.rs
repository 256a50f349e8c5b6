//! Chew or Die entry point
//!
//! The native build has no window backend; it plays an attract-mode run
//! headless with the autopilot and logs what happened.
//!
//! Usage: `chew-or-die [config.json]`
//! Environment: `CHEW_SEED` (run seed), `CHEW_FRAMES` (frames to play),
//! `RUST_LOG` (log filter).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use chew_or_die::renderer::TallyCanvas;
    use chew_or_die::sim::{GameEvent, Mode, autopilot_input};
    use chew_or_die::{App, GameConfig};

    const DEFAULT_SEED: u64 = 0x00C0_FFEE;
    const DEFAULT_FRAMES: u64 = 30 * 60 * 2;

    env_logger::init();
    log::info!("Chew or Die (native, headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).unwrap_or_else(|e| {
            log::error!("Failed to load config {}: {}; using defaults", path, e);
            GameConfig::default()
        }),
        None => GameConfig::default(),
    };

    let seed = env_u64("CHEW_SEED").unwrap_or(DEFAULT_SEED);
    let frames = env_u64("CHEW_FRAMES").unwrap_or(DEFAULT_FRAMES);

    let mut app = App::new(config, seed);
    let mut canvas = TallyCanvas::new();
    let mut primitives = 0usize;
    let mut fruit_eaten = 0u32;
    let mut runs_lost = 0u32;
    let mut best_score = 0u32;

    for _ in 0..frames {
        let input = autopilot_input(app.session());
        app.update(&input);

        for event in &app.session().events {
            match event {
                GameEvent::FruitEaten => fruit_eaten += 1,
                GameEvent::GameOver { score } => {
                    runs_lost += 1;
                    best_score = best_score.max(*score);
                }
                _ => {}
            }
        }
        if app.current_mode() != Mode::Lose {
            best_score = best_score.max(app.session().score);
        }

        canvas.clear();
        app.draw(&mut canvas);
        primitives += canvas.total();

        if app.quit_requested() {
            break;
        }
    }

    log::info!(
        "Played {} frames: {} fruit eaten, {} runs lost, best score {}, {} primitives drawn",
        app.session().frame,
        fruit_eaten,
        runs_lost,
        best_score,
        primitives
    );
    println!(
        "seed {seed}: best score {best_score}, fruit {fruit_eaten}, lost {runs_lost}, mode {}",
        app.current_mode().as_str()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No wasm host; the library is embedded by a platform layer instead
}
