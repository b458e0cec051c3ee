//! Game state and core simulation types
//!
//! Everything a session owns lives in [`GameState`]; a restart simply builds a
//! fresh one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::player::Player;
use super::spawn::SpawnTimer;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Strikes ran out
    GameOver,
}

/// Bounded resource meter with timed erosion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    pub value: f32,
    /// Milliseconds since the last erosion step
    pub erosion_ms: f32,
}

impl Meter {
    pub const MIN: f32 = crate::consts::METER_MIN;
    pub const MAX: f32 = crate::consts::METER_MAX;

    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(Self::MIN, Self::MAX),
            erosion_ms: 0.0,
        }
    }

    /// Add (or remove, if negative) and clamp
    pub fn add(&mut self, amount: f32) {
        self.value = (self.value + amount).clamp(Self::MIN, Self::MAX);
    }

    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(Self::MIN, Self::MAX);
    }

    /// Advance the erosion timer. Returns true if a step was taken.
    ///
    /// The accumulator resets to zero on each step; overshoot is discarded.
    pub fn erode(&mut self, dt_ms: f32, interval_ms: f32, step: f32) -> bool {
        self.erosion_ms += dt_ms;
        if self.erosion_ms < interval_ms {
            return false;
        }
        self.erosion_ms = 0.0;
        if self.value > Self::MIN {
            self.add(-step);
            return true;
        }
        false
    }

    /// Value as shown on the HUD
    #[inline]
    pub fn rounded(&self) -> f32 {
        self.value.round()
    }
}

/// Failure counter; reaching `max` ends the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strikes {
    pub count: u32,
    pub max: u32,
}

impl Strikes {
    pub fn new(max: u32) -> Self {
        Self { count: 0, max }
    }

    /// Record one strike. Returns true if the counter is now at its max.
    pub fn add(&mut self) -> bool {
        self.count = (self.count + 1).min(self.max);
        self.is_maxed()
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    #[inline]
    pub fn is_maxed(&self) -> bool {
        self.count >= self.max
    }
}

/// Monotonic score counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Patients successfully treated
    pub treated: u32,
    /// Milestone items caught
    pub milestones: u32,
}

/// Falling item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Refills the meter
    Supply,
    /// Costs a strike
    Hazard,
    /// Clears strikes and recenters the meter
    Milestone,
}

/// An item falling from the top of the stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward speed (pixels/s)
    pub fall_speed: f32,
}

impl FallingItem {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// An obstacle sitting on the floor for a limited time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundHazard {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub lifetime_ms: f32,
}

impl GroundHazard {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A patient waiting on the floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub lifetime_ms: f32,
}

impl Patient {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Single patient slot with its timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientSlot {
    pub patient: Option<Patient>,
    /// Time since the previous patient left (or since session start)
    pub gap_ms: f32,
    /// Continuous eligible contact with the current patient
    pub contact_ms: f32,
}

impl PatientSlot {
    /// Clear the slot after a departure
    pub fn vacate(&mut self) -> Option<Patient> {
        self.gap_ms = 0.0;
        self.contact_ms = 0.0;
        self.patient.take()
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemSpawned { id: u32, kind: ItemKind },
    ItemCaught { id: u32, kind: ItemKind },
    ItemMissed { id: u32, kind: ItemKind },
    MeterEroded { value: f32 },
    GroundHazardSpawned { id: u32 },
    GroundHazardStruck { id: u32 },
    GroundHazardExpired { id: u32 },
    PatientArrived { id: u32 },
    PatientTreated { id: u32 },
    PatientLeft { id: u32 },
    GameOver { score: u64 },
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG driving spawn positions, item kinds and delays
    pub rng: Pcg32,
    /// Balance in effect for this run
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The player character
    pub player: Player,
    /// Resource meter
    pub meter: Meter,
    /// Failure counter
    pub strikes: Strikes,
    /// Treated/milestone counters
    pub score: Scoreboard,
    /// Live falling items (spawn order)
    pub items: Vec<FallingItem>,
    /// A milestone item is on stage
    pub milestone_pending: bool,
    /// Pickup/hazard item spawner
    pub item_timer: SpawnTimer,
    /// Live ground hazards (spawn order)
    pub ground_hazards: Vec<GroundHazard>,
    /// Ground hazard spawner
    pub ground_hazard_timer: SpawnTimer,
    /// Patient slot
    pub patients: PatientSlot,
    /// Set once, when the run ends
    pub final_score: Option<u64>,
    /// Events recorded during the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with the given seed and balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let item_timer = SpawnTimer::new(tuning.item_spawn_delay, &mut rng);
        let ground_hazard_timer = SpawnTimer::new(tuning.ground_hazard_spawn_delay, &mut rng);

        Self {
            seed,
            rng,
            player: Player::new(&tuning),
            meter: Meter::new(tuning.meter_start),
            strikes: Strikes::new(tuning.max_strikes),
            score: Scoreboard::default(),
            items: Vec::new(),
            milestone_pending: false,
            item_timer,
            ground_hazards: Vec::new(),
            ground_hazard_timer,
            patients: PatientSlot::default(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            final_score: None,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether the HUD should show the low-meter warning
    pub fn meter_low(&self) -> bool {
        self.meter.rounded() < self.tuning.low_meter_threshold
    }

    /// Spawn a falling item of the given kind at a random x along the top
    pub fn spawn_item(&mut self, kind: ItemKind) -> u32 {
        let id = self.next_entity_id();
        let t = &self.tuning;
        let x = self.rng.random_range(t.item_min_x()..=t.item_max_x());
        let fall_speed = match kind {
            ItemKind::Supply => t.supply_fall_speed,
            ItemKind::Hazard => t.hazard_fall_speed,
            ItemKind::Milestone => t.milestone_fall_speed,
        };
        self.items.push(FallingItem {
            id,
            kind,
            pos: Vec2::new(x, -t.item_size),
            size: Vec2::splat(t.item_size),
            fall_speed,
        });
        self.events.push(GameEvent::ItemSpawned { id, kind });
        log::debug!("Spawned {:?} item {} at x={:.0}", kind, id, x);
        id
    }

    /// Spawn a ground hazard at a random floor position
    pub fn spawn_ground_hazard(&mut self) -> u32 {
        let id = self.next_entity_id();
        let size = Vec2::new(self.tuning.ground_hazard_width, self.tuning.ground_hazard_height);
        let x = self.random_floor_x(size.x);
        self.ground_hazards.push(GroundHazard {
            id,
            pos: Vec2::new(x, self.tuning.floor_y - size.y),
            size,
            lifetime_ms: 0.0,
        });
        self.events.push(GameEvent::GroundHazardSpawned { id });
        log::debug!("Spawned ground hazard {} at x={:.0}", id, x);
        id
    }

    /// Put a new patient in the slot at a random floor position
    pub fn spawn_patient(&mut self) -> u32 {
        let id = self.next_entity_id();
        let size = Vec2::new(self.tuning.patient_width, self.tuning.patient_height);
        let x = self.random_floor_x(size.x);
        self.patients.patient = Some(Patient {
            id,
            pos: Vec2::new(x, self.tuning.floor_y - size.y),
            size,
            lifetime_ms: 0.0,
        });
        self.patients.gap_ms = 0.0;
        self.patients.contact_ms = 0.0;
        self.events.push(GameEvent::PatientArrived { id });
        log::debug!("Patient {} arrived at x={:.0}", id, x);
        id
    }

    fn random_floor_x(&mut self, width: f32) -> f32 {
        let max_x = (self.tuning.stage_width - width).max(0.0);
        self.rng.random_range(0.0..=max_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_clamps() {
        let mut meter = Meter::new(95.0);
        meter.add(10.0);
        assert_eq!(meter.value, 100.0);
        meter.add(-250.0);
        assert_eq!(meter.value, 0.0);
        assert_eq!(Meter::new(140.0).value, 100.0);
    }

    #[test]
    fn test_meter_erosion_discards_overshoot() {
        let mut meter = Meter::new(50.0);
        assert!(!meter.erode(900.0, 1000.0, 2.0));
        assert!(meter.erode(350.0, 1000.0, 2.0));
        assert_eq!(meter.value, 48.0);
        // The 250 ms overshoot is not carried into the next interval
        assert_eq!(meter.erosion_ms, 0.0);
        assert!(!meter.erode(999.0, 1000.0, 2.0));
    }

    #[test]
    fn test_meter_erosion_holds_at_floor() {
        let mut meter = Meter::new(3.0);
        for _ in 0..10 {
            meter.erode(1000.0, 1000.0, 2.0);
        }
        assert_eq!(meter.value, 0.0);
        assert!(!meter.erode(1000.0, 1000.0, 2.0));
        assert_eq!(meter.value, 0.0);
    }

    #[test]
    fn test_strikes_saturate() {
        let mut strikes = Strikes::new(3);
        assert!(!strikes.add());
        assert!(!strikes.add());
        assert!(strikes.add());
        assert!(strikes.add());
        assert_eq!(strikes.count, 3);
        strikes.reset();
        assert_eq!(strikes.count, 0);
    }

    #[test]
    fn test_spawned_entities_stay_on_stage() {
        let mut state = GameState::new(7);
        for _ in 0..50 {
            state.spawn_item(ItemKind::Supply);
            state.spawn_ground_hazard();
        }
        let t = &state.tuning;
        for item in &state.items {
            assert!(item.pos.x >= t.item_min_x() && item.pos.x <= t.item_max_x());
            assert!(item.pos.y < 0.0);
        }
        for hazard in &state.ground_hazards {
            assert!(hazard.pos.x >= 0.0 && hazard.rect().max.x <= t.stage_width);
            assert_eq!(hazard.rect().max.y, t.floor_y);
        }
    }

    #[test]
    fn test_spawn_patient_resets_slot_timers() {
        let mut state = GameState::new(3);
        state.patients.gap_ms = 5000.0;
        state.patients.contact_ms = 42.0;
        let id = state.spawn_patient();
        assert_eq!(state.patients.patient.as_ref().map(|p| p.id), Some(id));
        assert_eq!(state.patients.gap_ms, 0.0);
        assert_eq!(state.patients.contact_ms, 0.0);
    }
}
