//! Renderer that keeps every draw call as a value
//!
//! Used by the headless driver and by tests to inspect what a frame drew.

use glam::Vec2;
use serde::Serialize;

use super::Renderer;
use crate::sim::entity::Point;
use crate::sim::{PickupColor, SizeClass};

/// One captured draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Asteroid {
        size: SizeClass,
        pos: Point,
        rotation: f32,
    },
    Pickup {
        color: PickupColor,
        pos: Point,
        radius: f32,
        rotation: f32,
    },
    Bullet { pos: Point },
    Particle { pos: Point },
    Ship {
        pos: Point,
        angle: f32,
        thrusting: bool,
    },
    Circle { center: Point, radius: f32 },
    Score { at: Vec2, score: u64 },
    HighScore { at: Vec2, best: u64 },
    WeaponAvailable { at: Vec2 },
    Number { at: Vec2, value: u64 },
    Level { at: Vec2, level: u32 },
    Lives { at: Vec2, lives: u32 },
    HowTo { at: Vec2 },
    PasswordEntry { at: Vec2, typed: String },
    PasswordResult { at: Vec2, valid: bool },
    Menu { at: Vec2 },
    Password { at: Vec2, password: String },
    GameOver {
        at: Vec2,
        best: u64,
        newly_set: bool,
    },
    Pause { at: Vec2 },
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(*c)).count()
    }
}

impl Renderer for Recorder {
    fn asteroid(&mut self, size: SizeClass, pos: Point, rotation: f32) {
        self.commands.push(DrawCommand::Asteroid { size, pos, rotation });
    }

    fn pickup(&mut self, color: PickupColor, pos: Point, radius: f32, rotation: f32) {
        self.commands.push(DrawCommand::Pickup {
            color,
            pos,
            radius,
            rotation,
        });
    }

    fn bullet(&mut self, pos: Point) {
        self.commands.push(DrawCommand::Bullet { pos });
    }

    fn particle(&mut self, pos: Point) {
        self.commands.push(DrawCommand::Particle { pos });
    }

    fn ship(&mut self, pos: Point, angle: f32, thrusting: bool) {
        self.commands.push(DrawCommand::Ship {
            pos,
            angle,
            thrusting,
        });
    }

    fn circle(&mut self, center: Point, radius: f32) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }

    fn score(&mut self, at: Vec2, score: u64) {
        self.commands.push(DrawCommand::Score { at, score });
    }

    fn high_score(&mut self, at: Vec2, best: u64) {
        self.commands.push(DrawCommand::HighScore { at, best });
    }

    fn weapon_available(&mut self, at: Vec2) {
        self.commands.push(DrawCommand::WeaponAvailable { at });
    }

    fn number(&mut self, at: Vec2, value: u64) {
        self.commands.push(DrawCommand::Number { at, value });
    }

    fn level(&mut self, at: Vec2, level: u32) {
        self.commands.push(DrawCommand::Level { at, level });
    }

    fn lives(&mut self, at: Vec2, lives: u32) {
        self.commands.push(DrawCommand::Lives { at, lives });
    }

    fn how_to(&mut self, at: Vec2) {
        self.commands.push(DrawCommand::HowTo { at });
    }

    fn password_entry(&mut self, at: Vec2, typed: &str) {
        self.commands.push(DrawCommand::PasswordEntry {
            at,
            typed: typed.to_string(),
        });
    }

    fn password_result(&mut self, at: Vec2, valid: bool) {
        self.commands.push(DrawCommand::PasswordResult { at, valid });
    }

    fn menu(&mut self, at: Vec2) {
        self.commands.push(DrawCommand::Menu { at });
    }

    fn password(&mut self, at: Vec2, password: &str) {
        self.commands.push(DrawCommand::Password {
            at,
            password: password.to_string(),
        });
    }

    fn game_over(&mut self, at: Vec2, best: u64, newly_set: bool) {
        self.commands.push(DrawCommand::GameOver {
            at,
            best,
            newly_set,
        });
    }

    fn pause(&mut self, at: Vec2) {
        self.commands.push(DrawCommand::Pause { at });
    }
}
