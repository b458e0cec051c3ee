//! Ground hazards: timed obstacles sitting on the floor line

use std::ops::ControlFlow;

use super::state::{GameEvent, GameState};
use super::tick::end_session;

/// Spawn, age and resolve ground hazards
///
/// Breaks when a strike ends the run.
pub fn update_ground_hazards(state: &mut GameState, dt_ms: f32) -> ControlFlow<()> {
    if state.ground_hazard_timer.advance(dt_ms, &mut state.rng) {
        state.spawn_ground_hazard();
    }

    let hitbox = state.player.hitbox(state.tuning.hitbox_padding);
    let lifetime_cap = state.tuning.ground_hazard_lifetime_ms;

    let mut i = 0;
    while i < state.ground_hazards.len() {
        let hazard = &mut state.ground_hazards[i];
        hazard.lifetime_ms += dt_ms;
        let id = hazard.id;

        if hazard.rect().overlaps(&hitbox) {
            state.ground_hazards.remove(i);
            state.events.push(GameEvent::GroundHazardStruck { id });
            if state.strikes.add() {
                end_session(state);
                return ControlFlow::Break(());
            }
            continue;
        }

        if hazard.lifetime_ms > lifetime_cap {
            state.ground_hazards.remove(i);
            state.events.push(GameEvent::GroundHazardExpired { id });
            log::debug!("Ground hazard {} expired", id);
            continue;
        }

        i += 1;
    }

    ControlFlow::Continue(())
}
