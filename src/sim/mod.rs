//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, IDs ascending)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod entity;
pub mod pickup;
pub mod progress;
pub mod projectile;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, Fragment, SizeClass, SizeSpec};
pub use collision::{closest_distance, swept_hit};
pub use entity::{Body, Field, Flying, Point, Velocity};
pub use pickup::{Pickup, PickupColor, Reward};
pub use progress::{PasswordError, Progress, Quota, decode_password, encode_password};
pub use projectile::{Bullet, Particle};
pub use ship::{Ship, Turn};
pub use state::{GameState, Mode, SpawnCounters};
pub use tick::{Requests, TickInput, handle_input, tick};
