//! Resource meter timing and the falling-item field

use std::ops::ControlFlow;

use rand::Rng;

use super::state::{GameEvent, GameState, ItemKind};
use super::tick::end_session;

/// Erode the meter and fire the milestone trigger
pub fn update_meter(state: &mut GameState, dt_ms: f32) {
    let t = &state.tuning;
    if state
        .meter
        .erode(dt_ms, t.erosion_interval_ms, t.erosion_step)
    {
        state.events.push(GameEvent::MeterEroded {
            value: state.meter.value,
        });
    }

    if !state.milestone_pending && state.meter.rounded() >= crate::consts::METER_MAX {
        state.milestone_pending = true;
        state.spawn_item(ItemKind::Milestone);
        log::info!("Meter full - milestone dropped");
    }
}

/// Advance the pickup spawner, possibly dropping a supply or hazard
pub fn update_item_spawner(state: &mut GameState, dt_ms: f32) {
    if !state.item_timer.advance(dt_ms, &mut state.rng) {
        return;
    }
    let kind = if state.rng.random::<f32>() < state.tuning.supply_probability {
        ItemKind::Supply
    } else {
        ItemKind::Hazard
    };
    state.spawn_item(kind);
}

/// Move falling items and resolve catches and misses
///
/// Breaks when a hazard catch ends the run.
pub fn update_items(state: &mut GameState, dt: f32) -> ControlFlow<()> {
    let hitbox = state.player.hitbox(state.tuning.hitbox_padding);
    let offstage_y = state.tuning.stage_height + state.tuning.item_offstage_margin;

    let mut i = 0;
    while i < state.items.len() {
        let item = &mut state.items[i];
        item.pos.y += item.fall_speed * dt;

        let (id, kind) = (item.id, item.kind);
        if item.rect().overlaps(&hitbox) {
            state.items.remove(i);
            state.events.push(GameEvent::ItemCaught { id, kind });
            if catch_item(state, kind).is_break() {
                return ControlFlow::Break(());
            }
            continue;
        }

        if item.pos.y > offstage_y {
            state.items.remove(i);
            state.events.push(GameEvent::ItemMissed { id, kind });
            if kind == ItemKind::Milestone {
                state.milestone_pending = false;
                log::debug!("Milestone {} missed", id);
            }
            continue;
        }

        i += 1;
    }

    ControlFlow::Continue(())
}

fn catch_item(state: &mut GameState, kind: ItemKind) -> ControlFlow<()> {
    match kind {
        ItemKind::Supply => {
            state.meter.add(state.tuning.supply_amount);
        }
        ItemKind::Hazard => {
            if state.strikes.add() {
                end_session(state);
                return ControlFlow::Break(());
            }
        }
        ItemKind::Milestone => {
            state.strikes.reset();
            state.meter.set(crate::consts::METER_START);
            state.milestone_pending = false;
            state.score.milestones += 1;
            log::info!("Milestone caught ({} total)", state.score.milestones);
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::GamePhase;
    use crate::sim::state::FallingItem;

    /// Put an item of `kind` right on top of the player's hit-box
    fn drop_on_player(state: &mut GameState, kind: ItemKind) -> u32 {
        let id = state.next_entity_id();
        let size = Vec2::splat(state.tuning.item_size);
        let hitbox = state.player.hitbox(state.tuning.hitbox_padding);
        state.items.push(FallingItem {
            id,
            kind,
            pos: Vec2::new(hitbox.min.x, hitbox.min.y - size.y + 1.0),
            size,
            fall_speed: 0.0,
        });
        id
    }

    #[test]
    fn test_supply_refills_meter_clamped() {
        let mut state = GameState::new(1);
        state.meter.set(95.0);
        drop_on_player(&mut state, ItemKind::Supply);
        assert!(update_items(&mut state, 0.0).is_continue());
        assert!(state.items.is_empty());
        assert_eq!(state.meter.value, 100.0);
    }

    #[test]
    fn test_hazard_strikes_and_ends_run_at_max() {
        let mut state = GameState::new(1);
        state.strikes.count = state.strikes.max - 2;

        drop_on_player(&mut state, ItemKind::Hazard);
        assert!(update_items(&mut state, 0.0).is_continue());
        assert_eq!(state.strikes.count, state.strikes.max - 1);
        assert_eq!(state.phase, GamePhase::Playing);

        drop_on_player(&mut state, ItemKind::Hazard);
        drop_on_player(&mut state, ItemKind::Supply);
        let meter_before = state.meter.value;
        assert!(update_items(&mut state, 0.0).is_break());
        assert_eq!(state.strikes.count, state.strikes.max);
        assert_eq!(state.phase, GamePhase::GameOver);
        // Processing stopped before the supply behind the fatal hazard
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.meter.value, meter_before);
    }

    #[test]
    fn test_milestone_catch_resets_run_state() {
        let mut state = GameState::new(1);
        state.strikes.count = 3;
        state.meter.set(100.0);
        state.milestone_pending = true;
        drop_on_player(&mut state, ItemKind::Milestone);

        assert!(update_items(&mut state, 0.0).is_continue());
        assert_eq!(state.strikes.count, 0);
        assert_eq!(state.meter.value, 50.0);
        assert!(!state.milestone_pending);
        assert_eq!(state.score.milestones, 1);
    }

    #[test]
    fn test_missed_milestone_clears_pending() {
        let mut state = GameState::new(1);
        state.meter.set(100.0);
        update_meter(&mut state, 0.0);
        assert!(state.milestone_pending);
        assert_eq!(state.items.len(), 1);

        // No duplicate while pending
        update_meter(&mut state, 0.0);
        assert_eq!(state.items.len(), 1);

        // Move the player out of the way and let it fall off stage
        state.player.pos.x = 0.0;
        state.items[0].pos.x = state.tuning.stage_width - state.tuning.item_size;
        for _ in 0..600 {
            let _ = update_items(&mut state, 1.0 / 60.0);
        }
        assert!(state.items.is_empty());
        assert!(!state.milestone_pending);
        assert_eq!(state.score.milestones, 0);

        update_meter(&mut state, 0.0);
        assert!(state.milestone_pending);
        assert_eq!(state.items[0].kind, ItemKind::Milestone);
    }

    #[test]
    fn test_miss_needs_margin_below_stage() {
        let mut state = GameState::new(1);
        state.player.pos.x = 0.0;
        let id = state.next_entity_id();
        state.items.push(FallingItem {
            id,
            kind: ItemKind::Supply,
            pos: Vec2::new(600.0, state.tuning.stage_height + 1.0),
            size: Vec2::splat(state.tuning.item_size),
            fall_speed: 0.0,
        });
        let _ = update_items(&mut state, 0.0);
        assert_eq!(state.items.len(), 1);

        state.items[0].pos.y = state.tuning.stage_height + state.tuning.item_offstage_margin + 1.0;
        let _ = update_items(&mut state, 0.0);
        assert!(state.items.is_empty());
        assert!(state.events.contains(&GameEvent::ItemMissed {
            id,
            kind: ItemKind::Supply
        }));
    }

    #[test]
    fn test_spawner_respects_probability_extremes() {
        let mut state = GameState::new(9);
        state.tuning.supply_probability = 1.0;
        for _ in 0..20 {
            state.item_timer.next_delay_ms = 0.0;
            update_item_spawner(&mut state, 1.0);
        }
        assert_eq!(state.items.len(), 20);
        assert!(state.items.iter().all(|i| i.kind == ItemKind::Supply));

        state.items.clear();
        state.tuning.supply_probability = 0.0;
        for _ in 0..20 {
            state.item_timer.next_delay_ms = 0.0;
            update_item_spawner(&mut state, 1.0);
        }
        assert!(state.items.iter().all(|i| i.kind == ItemKind::Hazard));
    }
}
