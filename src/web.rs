//! Browser bindings
//!
//! The page owns the canvas, the animation loop and persistence. It creates a
//! [`WasmGame`], forwards pointer events, calls `frame` from
//! `requestAnimationFrame` and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::driver::{Game, InputLatch};
use crate::effects::EventSink;
use crate::highscores::{HighScores, ResultSink, RunResult};
use crate::sim::{GameEvent, ScheduleToken, Transition};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Disc Drop starting...");
}

/// Forwards events to a JS callback as their debug name (`"Pass"`, `"Combo(3)"`, ...)
struct JsEvents(Option<js_sys::Function>);

impl EventSink for JsEvents {
    fn emit(&mut self, event: GameEvent) {
        let Some(callback) = &self.0 else {
            return;
        };
        let name = JsValue::from_str(&format!("{:?}", event));
        if let Err(err) = callback.call1(&JsValue::NULL, &name) {
            log::warn!("Event callback failed: {:?}", err);
        }
    }
}

/// Records the result in a leaderboard, then forwards it as JSON
struct JsResults {
    scores: std::rc::Rc<std::cell::RefCell<HighScores>>,
    callback: Option<js_sys::Function>,
}

impl ResultSink for JsResults {
    fn submit(&mut self, result: &RunResult) {
        self.scores.borrow_mut().add(*result, js_sys::Date::now());
        let Some(callback) = &self.callback else {
            return;
        };
        match serde_json::to_string(result) {
            Ok(json) => {
                if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("Result callback failed: {:?}", err);
                }
            }
            Err(err) => log::error!("Failed to serialize result: {}", err),
        }
    }
}

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    input: InputLatch,
    scores: std::rc::Rc<std::cell::RefCell<HighScores>>,
    scheduled: Vec<ScheduleToken>,
}

#[wasm_bindgen]
impl WasmGame {
    /// `tuning_json` may be empty for the default balance.
    /// `scores_json` is the previously saved leaderboard, if any.
    #[wasm_bindgen(constructor)]
    pub fn new(
        tuning_json: &str,
        scores_json: &str,
        on_event: Option<js_sys::Function>,
        on_result: Option<js_sys::Function>,
    ) -> Result<WasmGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let scores = if scores_json.trim().is_empty() {
            HighScores::new()
        } else {
            HighScores::from_json(scores_json).unwrap_or_else(|err| {
                log::warn!("Ignoring stored high scores: {}", err);
                HighScores::new()
            })
        };
        let scores = std::rc::Rc::new(std::cell::RefCell::new(scores));

        let seed = js_sys::Date::now() as u64;
        let game = Game::with_sinks(
            seed,
            tuning,
            Box::new(JsEvents(on_event)),
            Box::new(JsResults {
                scores: scores.clone(),
                callback: on_result,
            }),
        );
        let input = game.input();
        log::info!("Game created (seed {})", seed);
        Ok(WasmGame {
            game,
            input,
            scores,
            scheduled: Vec::new(),
        })
    }

    /// Pointer x as a fraction of the field width
    pub fn set_pointer(&self, x: f32) {
        self.input.set_pointer(x);
    }

    pub fn set_pressed(&self, pressed: bool) {
        self.input.set_pressed(pressed);
    }

    pub fn set_idle_mode(&self, idle: bool) {
        self.input.set_idle_mode(idle);
    }

    /// Advance to `now_ms` (the `requestAnimationFrame` timestamp)
    pub fn frame(&mut self, now_ms: f64) {
        self.game.frame(now_ms);
    }

    /// Call when the page becomes visible again
    pub fn resume(&mut self) {
        self.game.resume();
    }

    pub fn skip_tutorial(&mut self) {
        self.game.state.tutorial_done = true;
    }

    /// Replay after `delay` seconds, ignored if a new run started meanwhile.
    /// During the death animation the replay waits until the run is over.
    /// Returns an id for `cancel_scheduled`.
    pub fn schedule_restart(&mut self, delay: f32) -> u32 {
        self.track(Transition::Restart, delay)
    }

    pub fn schedule_menu(&mut self, delay: f32) -> u32 {
        self.track(Transition::ToStart, delay)
    }

    /// Withdraw a pending request. Returns false if it already fired.
    pub fn cancel_scheduled(&mut self, id: u32) -> bool {
        let Some(pos) = self.scheduled.iter().position(|t| t.id == id) else {
            return false;
        };
        let token = self.scheduled.swap_remove(pos);
        self.game.cancel(token)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn high_scores_json(&self) -> Result<String, JsValue> {
        self.scores
            .borrow()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl WasmGame {
    fn track(&mut self, transition: Transition, delay: f32) -> u32 {
        let scheduler = &self.game.state.scheduler;
        // Forget handles whose requests already fired or were dropped
        self.scheduled.retain(|t| scheduler.contains(*t));
        let token = self.game.schedule(delay, transition);
        self.scheduled.push(token);
        token.id
    }
}
