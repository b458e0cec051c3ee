//! Patient lifecycle
//!
//! One slot. After a gap a patient appears on the floor; standing on it while
//! the meter is at or above the low-meter threshold accumulates contact time.
//! Enough continuous contact treats the patient, otherwise it leaves when its
//! visible time runs out.

use super::state::{GameEvent, GameState};

/// Derived view of the slot, for sinks and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientStatus {
    Absent,
    /// Meter too low to treat
    Untreatable,
    /// Eligible and the player is in contact
    Contacting,
    /// Eligible but the player is elsewhere
    Idle,
}

/// Whether the meter allows treatment
#[inline]
pub fn can_treat(state: &GameState) -> bool {
    state.meter.rounded() >= state.tuning.low_meter_threshold
}

/// Current lifecycle status
pub fn patient_status(state: &GameState) -> PatientStatus {
    let Some(patient) = &state.patients.patient else {
        return PatientStatus::Absent;
    };
    if !can_treat(state) {
        PatientStatus::Untreatable
    } else if state.player.rect().overlaps(&patient.rect()) {
        PatientStatus::Contacting
    } else {
        PatientStatus::Idle
    }
}

/// Advance the patient slot by one tick
pub fn update_patient(state: &mut GameState, dt_ms: f32) {
    let eligible = can_treat(state);
    let player = state.player.rect();
    let slot = &mut state.patients;

    let Some(patient) = slot.patient.as_mut() else {
        slot.gap_ms += dt_ms;
        if slot.gap_ms >= state.tuning.patient_gap_ms {
            state.spawn_patient();
        }
        return;
    };

    patient.lifetime_ms += dt_ms;

    // Overlap while ineligible does not count
    if eligible && player.overlaps(&patient.rect()) {
        slot.contact_ms += dt_ms;
    } else {
        slot.contact_ms = 0.0;
    }

    let id = patient.id;
    let expired = patient.lifetime_ms >= state.tuning.patient_max_visible_ms;

    if slot.contact_ms >= state.tuning.patient_treat_ms {
        slot.vacate();
        state.score.treated += 1;
        state.events.push(GameEvent::PatientTreated { id });
        log::info!("Patient {} treated ({} total)", id, state.score.treated);
    } else if expired {
        slot.vacate();
        state.events.push(GameEvent::PatientLeft { id });
        log::debug!("Patient {} left untreated", id);
    }
}
