//! Asteroid Field - a bounded 2D arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic fixed-step simulation (entities, collisions, progression)
//! - `renderer`: Draw-dispatch contract consumed by a rendering backend
//! - `highscores`: In-session high score tracking
//! - `settings`: Runtime configuration for the native driver

pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (all rates are per tick)
pub mod consts {
    /// Half the width/height of the square play field
    pub const FIELD_HALF_EXTENT: f32 = 400.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 6.0;
    pub const SHIP_ROTATE_STEP: f32 = 3.0; // degrees
    pub const SHIP_THRUST: f32 = 0.25;
    pub const SHIP_REVERSE_THRUST: f32 = 0.05;
    pub const SHIP_STRAFE_THRUST: f32 = 0.2;
    pub const SHIP_SPAWN_ANGLE: f32 = 90.0; // facing up

    /// Bullets inherit the ship's momentum on top of this
    pub const BULLET_SPEED: f32 = 3.5;
    pub const BULLET_LIFETIME: u32 = 100;
    pub const BULLET_WRAP_MARGIN: f32 = 2.0;

    /// Background star dots
    pub const PARTICLE_VELOCITY: (f32, f32) = (-2.5, -2.5);
    pub const MAX_PARTICLES: usize = 50;

    /// Pickups
    pub const PICKUP_RADIUS: f32 = 10.0;
    pub const PICKUP_SPEED: f32 = 1.0;
    pub const PICKUP_SPIN: f32 = 3.0;
    pub const PICKUP_LIFETIME: u32 = 1200;
    /// Menu screen drops a pickup when `frame % PERIOD == PHASE`
    pub const MENU_PICKUP_PERIOD: u64 = 400;
    pub const MENU_PICKUP_PHASE: u64 = 20;

    /// Post-death invulnerability
    pub const IMMORTAL_TICKS: u32 = 180;
    /// Ship blink half-period while invulnerable
    pub const FLASH_TICKS: u32 = 14;

    /// Standing population of large asteroids in menu/practice
    pub const ENDLESS_ASTEROIDS: usize = 5;
    /// Levels mode spawns freely below this population
    pub const LEVELS_SOFT_CAP: usize = 10;
    /// Levels mode also spawns when `(frame / 2) % PERIOD == 0`
    pub const LEVELS_SPAWN_PERIOD: u64 = 360;

    /// Level and lives saturate here so the password digits stay in range
    pub const PROGRESS_CAP: u32 = 650;
    pub const STARTING_LEVEL: u32 = 1;
    pub const STARTING_LIVES: u32 = 3;
}

/// Wrap an angle in degrees into `[0, 360)`
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector pointing along `degrees` (0 = +x, counter-clockwise)
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
