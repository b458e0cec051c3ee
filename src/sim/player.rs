//! Player kinematics
//!
//! Run left/right along the floor, jump while grounded, fall under gravity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Standing on the floor
    pub grounded: bool,
    /// +1 facing right, -1 facing left
    pub facing: f32,
}

impl Player {
    /// Standing on the floor, centered, facing right
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        Self {
            pos: Vec2::new((tuning.stage_width - size.x) / 2.0, tuning.floor_y - size.y),
            vel: Vec2::ZERO,
            size,
            grounded: true,
            facing: 1.0,
        }
    }

    /// Full sprite bounds
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Padded hit-box used against falling items and ground hazards
    pub fn hitbox(&self, padding: f32) -> Rect {
        self.rect().inset(padding)
    }

    /// Advance one tick
    pub fn step(&mut self, input: &TickInput, dt: f32, tuning: &Tuning) {
        // Horizontal intent; left first, so pressing both ends up facing right
        self.vel.x = 0.0;
        if input.left {
            self.vel.x -= tuning.player_speed;
            self.facing = -1.0;
        }
        if input.right {
            self.vel.x += tuning.player_speed;
            self.facing = 1.0;
        }

        if input.jump && self.grounded {
            self.vel.y = tuning.jump_velocity;
            self.grounded = false;
        }

        self.vel.y += tuning.gravity * dt;
        self.pos += self.vel * dt;

        let floor_top = tuning.floor_y - self.size.y;
        if self.pos.y >= floor_top {
            self.pos.y = floor_top;
            self.vel.y = 0.0;
            self.grounded = true;
        }

        let max_x = (tuning.stage_width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}
