//! Platform abstraction layer
//!
//! Seams between the simulation and the host:
//! - Keyboard press/release → tick intents
//! - Render and HUD sinks fed once per frame

pub mod input;
pub mod sink;

pub use input::KeyboardInput;
pub use sink::{Frontend, HudSink, HudSnapshot, RenderSink};
