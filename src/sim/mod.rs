//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Variable timestep driven by the frame clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod hazards;
pub mod items;
pub mod patient;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use patient::{PatientStatus, can_treat, patient_status};
pub use player::Player;
pub use spawn::SpawnTimer;
pub use state::{
    FallingItem, GameEvent, GamePhase, GameState, GroundHazard, ItemKind, Meter, Patient,
    PatientSlot, Scoreboard, Strikes,
};
pub use tick::{TickInput, tick};
