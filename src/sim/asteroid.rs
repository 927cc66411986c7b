//! Asteroids and their fragmentation rules
//!
//! Size classes form a closed set; every per-class number lives in one
//! table so instances never carry their own radius, spin or value.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Flying, Point, Velocity};
use crate::heading;

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

/// Fixed numbers for one size class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeSpec {
    pub radius: f32,
    /// Degrees added to rotation each tick
    pub spin: f32,
    /// Score for a bullet kill
    pub value: u64,
    /// Speed of a freshly spawned (not fragmented) asteroid
    pub speed: f32,
    /// Children spawned on death, with the velocity offset each one adds
    pub fragments: &'static [(SizeClass, Vec2)],
}

const LARGE: SizeSpec = SizeSpec {
    radius: 16.0,
    spin: 1.0,
    value: 1,
    speed: 0.5,
    fragments: &[
        (SizeClass::Medium, Vec2::new(0.0, 0.5)),
        (SizeClass::Medium, Vec2::new(0.0, -0.5)),
        (SizeClass::Small, Vec2::ZERO),
    ],
};

const MEDIUM: SizeSpec = SizeSpec {
    radius: 12.0,
    spin: 2.5,
    value: 1,
    speed: 1.0,
    fragments: &[
        (SizeClass::Small, Vec2::new(-1.5, 0.0)),
        (SizeClass::Small, Vec2::new(1.5, 0.0)),
    ],
};

const SMALL: SizeSpec = SizeSpec {
    radius: 6.0,
    spin: 4.5,
    value: 2,
    speed: 1.75,
    fragments: &[],
};

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Large, SizeClass::Medium, SizeClass::Small];

    pub const fn spec(self) -> &'static SizeSpec {
        match self {
            SizeClass::Large => &LARGE,
            SizeClass::Medium => &MEDIUM,
            SizeClass::Small => &SMALL,
        }
    }

    pub fn radius(self) -> f32 {
        self.spec().radius
    }

    pub fn spin(self) -> f32 {
        self.spec().spin
    }

    pub fn value(self) -> u64 {
        self.spec().value
    }

    pub fn speed(self) -> f32 {
        self.spec().speed
    }

    /// Value of this asteroid plus every descendant it would ever split into.
    /// Awarded when the shockwave wipes the field.
    pub fn full_kill_value(self) -> u64 {
        self.value()
            + self
                .spec()
                .fragments
                .iter()
                .map(|(child, _)| child.full_kill_value())
                .sum::<u64>()
    }
}

/// A child produced when an asteroid breaks apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub size: SizeClass,
    pub pos: Point,
    pub vel: Velocity,
}

/// An asteroid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub size: SizeClass,
    pub body: Body,
    /// Visual rotation in degrees (unbounded)
    pub rotation: f32,
}

impl Asteroid {
    pub fn new(id: u32, size: SizeClass, pos: Point, vel: Velocity, rotation: f32) -> Self {
        Self {
            id,
            size,
            body: Body::new(pos, vel),
            rotation,
        }
    }

    /// Fresh asteroid heading in a random direction at its class speed
    pub fn spawn<R: Rng + ?Sized>(id: u32, size: SizeClass, pos: Point, rng: &mut R) -> Self {
        let angle = rng.random_range(1..=360u16) as f32;
        let vel = heading(angle) * size.speed();
        Self::new(id, size, pos, vel, random_rotation(rng))
    }

    /// Kill this asteroid and return the children it breaks into
    pub fn shatter(&mut self) -> Vec<Fragment> {
        self.body.alive = false;
        self.size
            .spec()
            .fragments
            .iter()
            .map(|&(size, offset)| Fragment {
                size,
                pos: self.body.pos,
                vel: self.body.vel + offset,
            })
            .collect()
    }
}

impl Flying for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn radius(&self) -> f32 {
        self.size.radius()
    }

    fn advance(&mut self) {
        self.body.step();
        self.rotation += self.size.spin();
    }
}

/// Whole degrees in `[0, 360]`
pub(crate) fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(0..=360u16) as f32
}
