//! Bonus pickups (the coloured stars)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::asteroid::random_rotation;
use super::entity::{Body, Flying, Point};
use crate::consts::*;
use crate::heading;

/// Pickup colour; each maps to exactly one reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupColor {
    Red,
    Blue,
    White,
}

/// Effect granted when a pickup is collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    ExtraLife,
    WeaponCharge,
    ShieldCharge,
}

impl PickupColor {
    pub const ALL: [PickupColor; 3] = [PickupColor::Red, PickupColor::Blue, PickupColor::White];

    pub fn reward(self) -> Reward {
        match self {
            PickupColor::Red => Reward::ExtraLife,
            PickupColor::Blue => Reward::WeaponCharge,
            PickupColor::White => Reward::ShieldCharge,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub color: PickupColor,
    pub body: Body,
    /// Visual rotation in degrees
    pub rotation: f32,
    pub ticks_alive: u32,
    /// Ship overlapped this pickup on the previous check
    #[serde(default)]
    pub touching_ship: bool,
}

impl Pickup {
    /// Drifting pickup with a random heading
    pub fn spawn<R: Rng + ?Sized>(id: u32, color: PickupColor, pos: Point, rng: &mut R) -> Self {
        let angle = rng.random_range(1..=360u16) as f32;
        Self {
            id,
            color,
            body: Body::new(pos, heading(angle) * PICKUP_SPEED),
            rotation: random_rotation(rng),
            ticks_alive: 0,
            touching_ship: false,
        }
    }

    /// Motionless pickup (practice range targets)
    pub fn fixed(id: u32, color: PickupColor, pos: Point) -> Self {
        Self {
            id,
            color,
            body: Body::new(pos, Vec2::ZERO),
            rotation: 0.0,
            ticks_alive: 0,
            touching_ship: false,
        }
    }

    pub fn reward(&self) -> Reward {
        self.color.reward()
    }
}

impl Flying for Pickup {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn radius(&self) -> f32 {
        PICKUP_RADIUS
    }

    fn advance(&mut self) {
        self.rotation += PICKUP_SPIN;
        self.body.age(&mut self.ticks_alive, PICKUP_LIFETIME);
    }
}
