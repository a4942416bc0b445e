//! Disc Drop entry point
//!
//! The browser build is driven from JS through `disc_drop::web`. Natively this
//! binary plays a few headless runs in idle mode and prints the leaderboard.
//!
//! Usage: `disc-drop [seed] [runs] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use disc_drop::effects::LogSink;
    use disc_drop::sim::GamePhase;
    use disc_drop::{Game, HighScores, ResultSink, RunResult, Tuning};
    use std::cell::RefCell;
    use std::rc::Rc;

    env_logger::init();

    struct Leaderboard(Rc<RefCell<HighScores>>);

    impl ResultSink for Leaderboard {
        fn submit(&mut self, result: &RunResult) {
            self.0.borrow_mut().submit(result);
        }
    }

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed_d15c);
    let runs: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);

    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => tuning,
                Err(err) => {
                    log::error!("Invalid tuning in {}: {}", path, err);
                    std::process::exit(1);
                }
            },
            Err(err) => {
                log::error!("Cannot read {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Disc Drop (headless) starting, seed {}", seed);

    let scores = Rc::new(RefCell::new(HighScores::new()));
    let mut game = Game::with_sinks(
        seed,
        tuning,
        Box::new(LogSink),
        Box::new(Leaderboard(scores.clone())),
    );
    game.input().set_idle_mode(true);

    const DT: f32 = 1.0 / 60.0;
    // Ten simulated minutes per run at most
    const MAX_TICKS_PER_RUN: u32 = 60 * 60 * 10;

    let mut finished = 0;
    let mut ticks = 0;
    while finished < runs {
        let was_over = game.state.phase == GamePhase::Over;
        game.step(DT);
        ticks += 1;

        if !was_over && game.state.phase == GamePhase::Over {
            finished += 1;
            ticks = 0;
        } else if ticks >= MAX_TICKS_PER_RUN {
            let run = &game.state.world.run;
            log::warn!("Run still alive after {} ticks (score {}), stopping", ticks, run.score);
            scores.borrow_mut().submit(&run.result());
            finished += 1;
            ticks = 0;
            disc_drop::sim::start_run(&mut game.state);
        }
    }

    println!("\nHigh scores");
    println!("{:>4} {:>10} {:>6} {:>6}", "#", "score", "combo", "depth");
    for (i, entry) in scores.borrow().entries.iter().enumerate() {
        println!(
            "{:>4} {:>10} {:>6} {:>6}",
            i + 1,
            entry.result.score,
            entry.result.max_combo,
            entry.result.depth_cleared
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is disc_drop::web::wasm_start, this is just to satisfy the compiler
}
