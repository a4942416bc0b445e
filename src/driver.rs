//! Frame driver
//!
//! Hosts (the browser loop, the headless binary, tests) call [`Game::frame`]
//! once per display frame with a timestamp. Pointer callbacks never touch the
//! game directly; they write to an [`InputLatch`] that the next frame samples.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::MAX_FRAME_DT;
use crate::effects::{EventSink, NullSink};
use crate::highscores::{NullResults, ResultSink};
use crate::sim::{GameState, ScheduleToken, Snapshot, TickInput, Transition, tick};
use crate::tuning::Tuning;

/// Turns frame timestamps into clamped simulation deltas
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, clamped to [0, MAX_FRAME_DT].
    /// The first call (and any clock that runs backwards) yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms.is_finite() && now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        dt.min(MAX_FRAME_DT)
    }

    /// Forget the last timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Latest pointer state, shared between event callbacks and the frame loop
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    inner: Rc<Cell<TickInput>>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer position as a fraction of the field width
    pub fn set_pointer(&self, x: f32) {
        let mut input = self.inner.get();
        input.target_x = x.is_finite().then_some(x.clamp(0.0, 1.0));
        self.inner.set(input);
    }

    pub fn set_pressed(&self, pressed: bool) {
        let mut input = self.inner.get();
        input.pressed = pressed;
        self.inner.set(input);
    }

    pub fn set_idle_mode(&self, idle: bool) {
        let mut input = self.inner.get();
        input.idle_mode = idle;
        self.inner.set(input);
    }

    pub fn sample(&self) -> TickInput {
        self.inner.get()
    }
}

/// A game plus the collaborators it reports to
pub struct Game {
    pub state: GameState,
    clock: FrameClock,
    input: InputLatch,
    events: Box<dyn EventSink>,
    results: Box<dyn ResultSink>,
}

impl Game {
    /// Game with no-op sinks
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_sinks(seed, tuning, Box::new(NullSink), Box::new(NullResults))
    }

    pub fn with_sinks(
        seed: u64,
        tuning: Tuning,
        events: Box<dyn EventSink>,
        results: Box<dyn ResultSink>,
    ) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            clock: FrameClock::new(),
            input: InputLatch::new(),
            events,
            results,
        }
    }

    /// Handle for pointer callbacks
    pub fn input(&self) -> InputLatch {
        self.input.clone()
    }

    /// Run one frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.advance(now_ms);
        self.step(dt);
    }

    /// Run one frame with an explicit delta (headless hosts)
    pub fn step(&mut self, dt: f32) {
        let input = self.input.sample();
        tick(&mut self.state, &input, dt);

        for event in self.state.drain_events() {
            self.events.emit(event);
        }
        if let Some(result) = self.state.take_result() {
            self.results.submit(&result);
        }
    }

    /// Request a transition `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, transition: Transition) -> ScheduleToken {
        self.state.schedule(delay, transition)
    }

    /// Withdraw a request that has not fired yet. Returns false if it already fired
    /// or was dropped.
    pub fn cancel(&mut self, token: ScheduleToken) -> bool {
        self.state.scheduler.cancel(token)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Drop the frame clock after the host was suspended
    pub fn resume(&mut self) {
        self.clock.reset();
    }
}
