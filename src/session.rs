//! Session control and frame clock
//!
//! The host calls [`Session::frame`] once per display frame with a
//! monotonically increasing timestamp, whatever the phase. Only the Playing
//! phase simulates. The first frame after start, restart or resume simulates
//! zero elapsed time.

use crate::error::SessionError;
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    tuning: Tuning,
    /// Timestamp (ms) of the previous simulated frame
    last_time: Option<f64>,
}

impl Session {
    /// A session waiting for its first start
    pub fn new(tuning: Tuning) -> Self {
        let mut state = GameState::with_tuning(0, tuning.clone());
        state.phase = GamePhase::Ready;
        Self {
            state,
            tuning,
            last_time: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Begin a run. Valid before the first run and after game over.
    pub fn start(&mut self, seed: u64) -> Result<(), SessionError> {
        match self.state.phase {
            GamePhase::Ready | GamePhase::GameOver => {
                self.reset(seed);
                log::info!("Session started with seed: {}", seed);
                Ok(())
            }
            phase => {
                log::warn!("Ignoring start while {:?}", phase);
                Err(SessionError::CannotStart(phase))
            }
        }
    }

    /// Begin a new run after game over
    pub fn restart(&mut self, seed: u64) -> Result<(), SessionError> {
        match self.state.phase {
            GamePhase::GameOver => {
                self.reset(seed);
                log::info!("Session restarted with seed: {}", seed);
                Ok(())
            }
            phase => {
                log::warn!("Ignoring restart while {:?}", phase);
                Err(SessionError::CannotRestart(phase))
            }
        }
    }

    /// Playing ↔ Paused
    pub fn toggle_pause(&mut self) -> Result<GamePhase, SessionError> {
        self.state.phase = match self.state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            phase => return Err(SessionError::CannotPause(phase)),
        };
        self.last_time = None;
        log::info!("Session {:?}", self.state.phase);
        Ok(self.state.phase)
    }

    /// Handle one display frame. Returns the simulated elapsed seconds.
    pub fn frame(&mut self, timestamp_ms: f64, input: &TickInput) -> f32 {
        if self.state.phase != GamePhase::Playing {
            self.last_time = None;
            return 0.0;
        }

        let dt = self.elapsed_secs(timestamp_ms);
        tick(&mut self.state, input, dt);
        dt
    }

    /// Seconds since the previous frame, capped; zero on the first frame
    fn elapsed_secs(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(timestamp_ms);
        dt.clamp(0.0, self.tuning.max_frame_secs)
    }

    fn reset(&mut self, seed: u64) {
        self.state = GameState::with_tuning(seed, self.tuning.clone());
        self.last_time = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
