//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Flying, Velocity};
use crate::consts::*;
use crate::{heading, wrap_degrees};

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

/// The player ship. There is no speed cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Facing in degrees, `[0, 360)`
    pub angle: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            body: Body::at_rest(Vec2::ZERO),
            angle: SHIP_SPAWN_ANGLE,
        }
    }
}

impl Ship {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the field origin, stopped, facing up, alive
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn facing(&self) -> Vec2 {
        heading(self.angle)
    }

    pub fn velocity(&self) -> Velocity {
        self.body.vel
    }

    pub fn rotate(&mut self, turn: Turn) {
        let delta = match turn {
            Turn::Left => SHIP_ROTATE_STEP,
            Turn::Right => -SHIP_ROTATE_STEP,
        };
        self.angle = wrap_degrees(self.angle + delta);
    }

    pub fn thrust(&mut self) {
        self.body.vel += self.facing() * SHIP_THRUST;
    }

    pub fn reverse_thruster(&mut self) {
        self.body.vel -= self.facing() * SHIP_REVERSE_THRUST;
    }

    /// Turn, then push along the new facing
    pub fn strafe(&mut self, turn: Turn) {
        self.rotate(turn);
        self.body.vel += self.facing() * SHIP_STRAFE_THRUST;
    }
}

impl Flying for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn radius(&self) -> f32 {
        SHIP_RADIUS
    }
}
