//! Score, combo and speed multiplier bookkeeping
//!
//! Driven purely by collision outcomes: passes build the combo, any bounce
//! or fatal hit resets it.

use super::events::GameEvent;
use super::state::RunState;
use crate::tuning::Tuning;

/// Score multiplier for a combo count (step function over the tier ladder)
pub fn combo_multiplier(combo: u32, tuning: &Tuning) -> u32 {
    tuning
        .combo_tiers
        .iter()
        .rev()
        .find(|tier| combo >= tier.threshold)
        .map(|tier| tier.multiplier)
        .unwrap_or(1)
}

/// Credit a pass. `accuracy` is 1 for a dead-center drop, 0 at the gap edge.
pub fn record_pass(
    run: &mut RunState,
    base_points: u32,
    accuracy: f32,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    run.depth_cleared += 1;
    run.combo += 1;
    run.max_combo = run.max_combo.max(run.combo);

    let multiplier = combo_multiplier(run.combo, tuning);
    run.score += u64::from(base_points) * u64::from(multiplier);
    events.push(GameEvent::Pass);

    if tuning.combo_tiers.iter().any(|tier| tier.threshold == run.combo) {
        log::debug!("Combo {} -> x{}", run.combo, multiplier);
        events.push(GameEvent::Combo(run.combo));
    }

    if tuning.level_layers > 0 && run.depth_cleared % tuning.level_layers == 0 {
        run.level = run.depth_cleared / tuning.level_layers;
        log::info!("Level {} reached", run.level);
        events.push(GameEvent::LevelUp(run.level));
    }

    if accuracy >= tuning.accuracy_threshold {
        run.speed_multiplier =
            (run.speed_multiplier + tuning.speed_gain * accuracy).clamp(1.0, tuning.speed_cap);
    }
}

/// A bounce or fatal hit breaks the combo
pub fn break_combo(run: &mut RunState) {
    run.combo = 0;
}

/// Ease the speed multiplier back toward 1 while the ball is not progressing
pub fn decay_speed(run: &mut RunState, dt: f32, tuning: &Tuning) {
    run.speed_multiplier =
        (run.speed_multiplier - tuning.speed_decay * dt).clamp(1.0, tuning.speed_cap);
}
