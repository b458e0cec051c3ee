//! Data-driven game balance
//!
//! Every gameplay constant in one serializable struct. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Inclusive range of spawn delays in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: f32,
    pub max_ms: f32,
}

impl DelayRange {
    pub const fn new(min_ms: f32, max_ms: f32) -> Self {
        Self { min_ms, max_ms }
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Stage ===
    pub stage_width: f32,
    pub stage_height: f32,
    pub floor_y: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub hitbox_padding: f32,
    pub player_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,

    // === Meter ===
    pub meter_start: f32,
    pub erosion_interval_ms: f32,
    pub erosion_step: f32,
    pub supply_amount: f32,
    pub low_meter_threshold: f32,

    // === Strikes ===
    pub max_strikes: u32,

    // === Falling items ===
    pub item_size: f32,
    pub item_spawn_padding: f32,
    pub item_offstage_margin: f32,
    pub supply_fall_speed: f32,
    pub hazard_fall_speed: f32,
    pub milestone_fall_speed: f32,
    pub supply_probability: f32,
    pub item_spawn_delay: DelayRange,

    // === Ground hazards ===
    pub ground_hazard_width: f32,
    pub ground_hazard_height: f32,
    pub ground_hazard_lifetime_ms: f32,
    pub ground_hazard_spawn_delay: DelayRange,

    // === Patients ===
    pub patient_width: f32,
    pub patient_height: f32,
    pub patient_gap_ms: f32,
    pub patient_max_visible_ms: f32,
    pub patient_treat_ms: f32,

    // === Driver ===
    pub max_frame_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            stage_width: STAGE_WIDTH,
            stage_height: STAGE_HEIGHT,
            floor_y: FLOOR_Y,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            hitbox_padding: PLAYER_HITBOX_PADDING,
            player_speed: PLAYER_SPEED,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,

            meter_start: METER_START,
            erosion_interval_ms: METER_EROSION_INTERVAL_MS,
            erosion_step: METER_EROSION_STEP,
            supply_amount: SUPPLY_AMOUNT,
            low_meter_threshold: LOW_METER_THRESHOLD,

            max_strikes: MAX_STRIKES,

            item_size: ITEM_SIZE,
            item_spawn_padding: ITEM_SPAWN_PADDING,
            item_offstage_margin: ITEM_OFFSTAGE_MARGIN,
            supply_fall_speed: SUPPLY_FALL_SPEED,
            hazard_fall_speed: HAZARD_FALL_SPEED,
            milestone_fall_speed: MILESTONE_FALL_SPEED,
            supply_probability: SUPPLY_PROBABILITY,
            item_spawn_delay: DelayRange::new(ITEM_SPAWN_MIN_MS, ITEM_SPAWN_MAX_MS),

            ground_hazard_width: GROUND_HAZARD_WIDTH,
            ground_hazard_height: GROUND_HAZARD_HEIGHT,
            ground_hazard_lifetime_ms: GROUND_HAZARD_LIFETIME_MS,
            ground_hazard_spawn_delay: DelayRange::new(
                GROUND_HAZARD_SPAWN_MIN_MS,
                GROUND_HAZARD_SPAWN_MAX_MS,
            ),

            patient_width: PATIENT_WIDTH,
            patient_height: PATIENT_HEIGHT,
            patient_gap_ms: PATIENT_GAP_MS,
            patient_max_visible_ms: PATIENT_MAX_VISIBLE_MS,
            patient_treat_ms: PATIENT_TREAT_MS,

            max_frame_secs: MAX_FRAME_SECS,
        }
    }
}

impl Tuning {
    /// Parse from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that ranges and sizes make sense
    pub fn validate(&self) -> Result<(), TuningError> {
        for (name, range) in [
            ("item_spawn_delay", self.item_spawn_delay),
            ("ground_hazard_spawn_delay", self.ground_hazard_spawn_delay),
        ] {
            if range.min_ms > range.max_ms {
                return Err(TuningError::InvalidRange {
                    name,
                    min: range.min_ms,
                    max: range.max_ms,
                });
            }
            if range.min_ms <= 0.0 {
                return Err(TuningError::NotPositive {
                    name,
                    value: range.min_ms,
                });
            }
        }

        for (name, value) in [
            ("stage_width", self.stage_width),
            ("stage_height", self.stage_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("item_size", self.item_size),
            ("erosion_interval_ms", self.erosion_interval_ms),
            ("patient_treat_ms", self.patient_treat_ms),
            ("max_frame_secs", self.max_frame_secs),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { name, value });
            }
        }

        if self.max_strikes == 0 {
            return Err(TuningError::NotPositive {
                name: "max_strikes",
                value: 0.0,
            });
        }

        if !(0.0..=1.0).contains(&self.supply_probability) {
            return Err(TuningError::Probability(self.supply_probability));
        }

        Ok(())
    }

    /// Lowest x a spawned falling item may take
    pub fn item_min_x(&self) -> f32 {
        self.item_spawn_padding
    }

    /// Highest x a spawned falling item may take
    pub fn item_max_x(&self) -> f32 {
        (self.stage_width - self.item_spawn_padding - self.item_size).max(self.item_min_x())
    }
}
