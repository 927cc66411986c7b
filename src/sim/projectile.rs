//! Bullets and background star dots
//!
//! Both live for a fixed number of ticks and then die on their own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Flying, Point, Velocity};
use crate::consts::*;
use crate::heading;

/// A shot fired by the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub ticks_alive: u32,
}

impl Bullet {
    /// Fire along `facing` degrees, carrying the ship's momentum
    pub fn fire(origin: Point, facing: f32, ship_vel: Velocity) -> Self {
        let vel = heading(facing) * BULLET_SPEED + ship_vel;
        Self {
            body: Body::new(origin, vel),
            ticks_alive: 0,
        }
    }
}

impl Flying for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn radius(&self) -> f32 {
        BULLET_WRAP_MARGIN
    }

    fn advance(&mut self) {
        self.body.age(&mut self.ticks_alive, BULLET_LIFETIME);
    }
}

/// Decorative drifting dot; never collides with anything
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub ticks_alive: u32,
}

impl Particle {
    pub fn new(pos: Point) -> Self {
        let (dx, dy) = PARTICLE_VELOCITY;
        Self {
            body: Body::new(pos, Vec2::new(dx, dy)),
            ticks_alive: 0,
        }
    }
}

impl Flying for Particle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn radius(&self) -> f32 {
        BULLET_WRAP_MARGIN
    }

    fn advance(&mut self) {
        self.body.age(&mut self.ticks_alive, BULLET_LIFETIME);
    }
}
