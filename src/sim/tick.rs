//! Per-frame simulation tick
//!
//! Advances the whole game by the elapsed frame time in a fixed order:
//! player, meter and spawners, falling items, ground hazards, patient.

use super::hazards::update_ground_hazards;
use super::items::{update_item_spawner, update_items, update_meter};
use super::patient::update_patient;
use super::state::{GameEvent, GamePhase, GameState};
use crate::score::final_score;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    let dt = dt.max(0.0);
    let dt_ms = dt * 1000.0;

    let tuning = &state.tuning;
    state.player.step(input, dt, tuning);

    update_meter(state, dt_ms);
    update_item_spawner(state, dt_ms);

    if update_items(state, dt).is_break() {
        return;
    }
    if update_ground_hazards(state, dt_ms).is_break() {
        return;
    }

    update_patient(state, dt_ms);
}

/// End the run and lock in the score
pub(crate) fn end_session(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let score = final_score(&state.score);
    state.phase = GamePhase::GameOver;
    state.final_score = Some(score);
    state.events.push(GameEvent::GameOver { score });
    log::info!(
        "Game over: {} treated, {} milestones, score {}",
        state.score.treated,
        state.score.milestones,
        score
    );
}
