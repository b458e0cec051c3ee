//! Triage Dash - A single-screen arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (kinematics, spawners, collisions, patient lifecycle)
//! - `session`: Frame clock and start/restart/pause control
//! - `platform`: Input adapter and render/HUD sink seams
//! - `tuning`: Data-driven game balance
//! - `score`: Final score formula

pub mod error;
pub mod platform;
pub mod score;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{ScoreError, SessionError, TuningError};
pub use score::{compute_score, final_score};
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Stage dimensions (pixels)
    pub const STAGE_WIDTH: f32 = 800.0;
    pub const STAGE_HEIGHT: f32 = 600.0;
    /// Y coordinate of the ground line everything stands on
    pub const FLOOR_Y: f32 = 540.0;

    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    /// Inward padding of the player hit-box on every side
    pub const PLAYER_HITBOX_PADDING: f32 = 8.0;
    /// Horizontal run speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Jump launch velocity (negative is up, pixels/s)
    pub const JUMP_VELOCITY: f32 = -560.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1400.0;

    /// Resource meter bounds and defaults
    pub const METER_MAX: f32 = 100.0;
    pub const METER_MIN: f32 = 0.0;
    pub const METER_START: f32 = 50.0;
    /// Erosion cadence and step
    pub const METER_EROSION_INTERVAL_MS: f32 = 1000.0;
    pub const METER_EROSION_STEP: f32 = 2.0;
    /// Meter gained from a supply pickup
    pub const SUPPLY_AMOUNT: f32 = 10.0;
    /// Below this (rounded) the HUD warns and patients cannot be treated
    pub const LOW_METER_THRESHOLD: f32 = 30.0;

    /// Strikes that end the run
    pub const MAX_STRIKES: u32 = 5;

    /// Falling items
    pub const ITEM_SIZE: f32 = 32.0;
    pub const ITEM_SPAWN_PADDING: f32 = 20.0;
    /// How far below the stage an item must fall before it is dropped
    pub const ITEM_OFFSTAGE_MARGIN: f32 = 20.0;
    pub const SUPPLY_FALL_SPEED: f32 = 160.0;
    pub const HAZARD_FALL_SPEED: f32 = 220.0;
    pub const MILESTONE_FALL_SPEED: f32 = 140.0;
    /// Chance that a spawned item is a supply rather than a hazard
    pub const SUPPLY_PROBABILITY: f32 = 0.7;
    pub const ITEM_SPAWN_MIN_MS: f32 = 700.0;
    pub const ITEM_SPAWN_MAX_MS: f32 = 1400.0;

    /// Ground hazards
    pub const GROUND_HAZARD_WIDTH: f32 = 40.0;
    pub const GROUND_HAZARD_HEIGHT: f32 = 24.0;
    pub const GROUND_HAZARD_LIFETIME_MS: f32 = 4000.0;
    pub const GROUND_HAZARD_SPAWN_MIN_MS: f32 = 2500.0;
    pub const GROUND_HAZARD_SPAWN_MAX_MS: f32 = 5000.0;

    /// Patients
    pub const PATIENT_WIDTH: f32 = 48.0;
    pub const PATIENT_HEIGHT: f32 = 64.0;
    pub const PATIENT_GAP_MS: f32 = 3000.0;
    pub const PATIENT_MAX_VISIBLE_MS: f32 = 8000.0;
    pub const PATIENT_TREAT_MS: f32 = 1500.0;

    /// Largest elapsed time a single frame may simulate (seconds)
    pub const MAX_FRAME_SECS: f32 = 0.25;
}
