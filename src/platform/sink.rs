//! Render and HUD sinks
//!
//! Both are read-only consumers of the simulation. The render sink sees the
//! full state every frame; the HUD sink only hears about changes.

use crate::session::Session;
use crate::sim::{GamePhase, GameState, TickInput};

/// Everything the HUD displays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    /// Rounded meter value
    pub meter: u32,
    pub meter_low: bool,
    pub strikes: u32,
    pub max_strikes: u32,
    pub treated: u32,
    pub milestones: u32,
    pub final_score: Option<u64>,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            meter: state.meter.rounded() as u32,
            meter_low: state.meter_low(),
            strikes: state.strikes.count,
            max_strikes: state.strikes.max,
            treated: state.score.treated,
            milestones: state.score.milestones,
            final_score: state.final_score,
        }
    }
}

/// Draws the stage
pub trait RenderSink {
    fn render(&mut self, state: &GameState);
}

/// Updates meters and counters
pub trait HudSink {
    fn update_hud(&mut self, hud: &HudSnapshot);
}

/// Pairs a session with its sinks and pushes HUD updates only on change
pub struct Frontend<R: RenderSink, H: HudSink> {
    pub renderer: R,
    pub hud: H,
    last_hud: Option<HudSnapshot>,
}

impl<R: RenderSink, H: HudSink> Frontend<R, H> {
    pub fn new(renderer: R, hud: H) -> Self {
        Self {
            renderer,
            hud,
            last_hud: None,
        }
    }

    /// Simulate, render, then refresh the HUD if anything it shows changed
    pub fn frame(&mut self, session: &mut Session, timestamp_ms: f64, input: &TickInput) {
        session.frame(timestamp_ms, input);
        self.renderer.render(&session.state);
        self.refresh_hud(&session.state);
    }

    /// Push the HUD if it differs from what was last shown
    pub fn refresh_hud(&mut self, state: &GameState) {
        let snapshot = HudSnapshot::from_state(state);
        if self.last_hud != Some(snapshot) {
            self.hud.update_hud(&snapshot);
            self.last_hud = Some(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
    }

    impl RenderSink for CountingRenderer {
        fn render(&mut self, _state: &GameState) {
            self.frames += 1;
        }
    }

    #[derive(Default)]
    struct RecordingHud {
        updates: Vec<HudSnapshot>,
    }

    impl HudSink for RecordingHud {
        fn update_hud(&mut self, hud: &HudSnapshot) {
            self.updates.push(*hud);
        }
    }

    #[test]
    fn test_hud_only_on_change() {
        let mut session = Session::default();
        let mut frontend = Frontend::new(CountingRenderer::default(), RecordingHud::default());

        frontend.frame(&mut session, 0.0, &TickInput::default());
        frontend.frame(&mut session, 16.0, &TickInput::default());
        assert_eq!(frontend.renderer.frames, 2);
        assert_eq!(frontend.hud.updates.len(), 1);
        assert_eq!(frontend.hud.updates[0].phase, GamePhase::Ready);

        session.start(3).unwrap();
        frontend.frame(&mut session, 32.0, &TickInput::default());
        assert_eq!(frontend.hud.updates.len(), 2);
        assert_eq!(frontend.hud.updates[1].phase, GamePhase::Playing);
        assert_eq!(frontend.hud.updates[1].meter, 50);
        assert_eq!(frontend.hud.updates[1].max_strikes, 5);
    }

    #[test]
    fn test_snapshot_flags_low_meter() {
        let mut state = GameState::new(1);
        state.meter.set(29.4);
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.meter, 29);
        assert!(hud.meter_low);

        state.meter.set(29.6);
        assert!(!HudSnapshot::from_state(&state).meter_low);
    }
}
