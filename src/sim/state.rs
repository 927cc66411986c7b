//! Game state and session bookkeeping
//!
//! One `GameState` is one session: every entity collection, the progress
//! tracker and the session flags live here and are mutated only by the tick
//! and input functions.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::asteroid::{Asteroid, Fragment, SizeClass};
use super::entity::{Field, Point};
use super::pickup::{Pickup, PickupColor, Reward};
use super::progress::Progress;
use super::projectile::{Bullet, Particle};
use super::ship::Ship;
use crate::consts::*;
use crate::highscores::HighScore;

/// Which game is being played, derived from the input snapshot each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Attract screen: endless asteroids, occasional pickups, no ship hits
    Menu,
    /// Endless asteroids and two fixed pickups; dying only zeroes the score
    Practice,
    /// Staged levels with lives and passwords
    Levels,
}

/// Asteroids of each size spawned so far on the current level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnCounters {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl SpawnCounters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    /// Background star dots (decorative)
    pub particles: Vec<Particle>,
    pub asteroids: Vec<Asteroid>,
    pub pickups: Vec<Pickup>,
    pub progress: Progress,
    pub spawned: SpawnCounters,
    pub score: u64,
    pub high_score: HighScore,
    pub game_over: bool,
    /// Shockwave charge held
    pub bonus_weapon: bool,
    /// Shield charge held
    pub bonus_shield: bool,
    /// Ticks left in the post-death invulnerability window (0 = vulnerable)
    pub immortal_ticks: u32,
    /// Ticks simulated since the current level (or run) started
    pub frame_count: u64,
    /// Outcome of the last submitted password, for the result screen
    pub password_valid: Option<bool>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_field(seed, Field::default())
    }

    pub fn with_field(seed: u64, field: Field) -> Self {
        Self {
            field,
            ship: Ship::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            asteroids: Vec::new(),
            pickups: Vec::new(),
            progress: Progress::default(),
            spawned: SpawnCounters::default(),
            score: 0,
            high_score: HighScore::new(),
            game_over: false,
            bonus_weapon: false,
            bonus_shield: false,
            immortal_ticks: 0,
            frame_count: 0,
            password_valid: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_immortal(&self) -> bool {
        self.immortal_ticks > 0
    }

    /// Ship blinks while invulnerable
    pub fn ship_visible(&self) -> bool {
        if !self.is_immortal() {
            return true;
        }
        let elapsed = IMMORTAL_TICKS.saturating_sub(self.immortal_ticks);
        elapsed % (2 * FLASH_TICKS) < FLASH_TICKS
    }

    /// Fresh asteroid of `size` on a random edge
    pub fn spawn_asteroid(&mut self, size: SizeClass) {
        let id = self.next_entity_id();
        let pos = self.field.random_edge_point(&mut self.rng);
        let rock = Asteroid::spawn(id, size, pos, &mut self.rng);
        self.asteroids.push(rock);
    }

    /// Append the children of a shattered asteroid to the live collection
    pub fn spawn_fragments(&mut self, fragments: Vec<Fragment>) {
        for fragment in fragments {
            let id = self.next_entity_id();
            let rotation = super::asteroid::random_rotation(&mut self.rng);
            self.asteroids.push(Asteroid::new(
                id,
                fragment.size,
                fragment.pos,
                fragment.vel,
                rotation,
            ));
        }
    }

    /// Pickup of `color` drifting in from a random edge
    pub fn spawn_pickup(&mut self, color: PickupColor) {
        let id = self.next_entity_id();
        let pos = self.field.random_edge_point(&mut self.rng);
        let pickup = Pickup::spawn(id, color, pos, &mut self.rng);
        self.pickups.push(pickup);
    }

    pub fn spawn_random_pickup(&mut self) {
        let color = PickupColor::random(&mut self.rng);
        self.spawn_pickup(color);
    }

    /// The two stationary targets of the practice range
    pub fn spawn_practice_pickups(&mut self) {
        let top_left = self.field.top_left();
        let bottom_right = self.field.bottom_right();
        let row = bottom_right.y + 80.0;
        for (color, x) in [
            (PickupColor::Blue, top_left.x + 120.0),
            (PickupColor::White, top_left.x + 240.0),
        ] {
            let id = self.next_entity_id();
            self.pickups.push(Pickup::fixed(id, color, Point::new(x, row)));
        }
    }

    pub fn spawn_particle(&mut self) {
        let pos = self.field.random_interior_point(&mut self.rng);
        self.particles.push(Particle::new(pos));
    }

    /// Grant a pickup's effect
    pub fn apply_reward(&mut self, reward: Reward) {
        match reward {
            Reward::ExtraLife => self.progress.add_life(),
            Reward::WeaponCharge => self.bonus_weapon = true,
            Reward::ShieldCharge => self.bonus_shield = true,
        }
        log::debug!("Collected {:?}", reward);
    }

    /// Destroy every asteroid at once, scoring each one's full-kill value
    pub fn fire_shockwave(&mut self) -> u64 {
        let gained: u64 = self
            .asteroids
            .iter()
            .map(|a| a.size.full_kill_value())
            .sum();
        self.score += gained;
        self.asteroids.clear();
        self.bonus_weapon = false;
        log::debug!("Shockwave cleared the field for {} points", gained);
        gained
    }

    /// Ship, level spawn counters, frame counter and bonuses back to a clean start
    pub fn reset_run(&mut self) {
        self.ship.reset();
        self.spawned.reset();
        self.frame_count = 0;
        self.bonus_shield = false;
        self.bonus_weapon = false;
    }

    /// Everything but the session high score back to a fresh game
    pub fn restart_session(&mut self) {
        self.reset_run();
        self.game_over = false;
        self.progress.reset();
        self.score = 0;
        self.immortal_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(1);
        assert_eq!(state.progress, Progress::new(1, 3));
        assert!(state.ship.body.alive);
        assert!(state.asteroids.is_empty());
        assert!(!state.game_over);
        assert!(state.ship_visible());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1);
        state.spawn_asteroid(SizeClass::Large);
        state.spawn_asteroid(SizeClass::Small);
        state.spawn_random_pickup();
        assert_ne!(state.asteroids[0].id, state.asteroids[1].id);
        assert_ne!(state.asteroids[1].id, state.pickups[0].id);
    }

    #[test]
    fn test_shockwave_awards_full_kill_values() {
        let mut state = GameState::new(5);
        state.spawn_asteroid(SizeClass::Large);
        state.spawn_asteroid(SizeClass::Medium);
        state.spawn_asteroid(SizeClass::Small);
        state.bonus_weapon = true;
        assert_eq!(state.fire_shockwave(), 13 + 5 + 2);
        assert_eq!(state.score, 20);
        assert!(state.asteroids.is_empty());
        assert!(!state.bonus_weapon);
    }

    #[test]
    fn test_practice_pickups_are_fixed() {
        let mut state = GameState::new(2);
        state.spawn_practice_pickups();
        assert_eq!(state.pickups.len(), 2);
        assert_eq!(state.pickups[0].color, PickupColor::Blue);
        assert_eq!(state.pickups[0].body.pos, Point::new(-280.0, -320.0));
        assert_eq!(state.pickups[1].color, PickupColor::White);
        assert_eq!(state.pickups[1].body.pos, Point::new(-160.0, -320.0));
        assert!(state.pickups.iter().all(|p| p.body.vel == Point::ZERO));
    }

    #[test]
    fn test_ship_blinks_while_immortal() {
        let mut state = GameState::new(2);
        state.immortal_ticks = IMMORTAL_TICKS;
        assert!(state.ship_visible());
        state.immortal_ticks = IMMORTAL_TICKS - FLASH_TICKS;
        assert!(!state.ship_visible());
        state.immortal_ticks = IMMORTAL_TICKS - 2 * FLASH_TICKS;
        assert!(state.ship_visible());
    }

    #[test]
    fn test_rewards() {
        let mut state = GameState::new(2);
        state.apply_reward(Reward::ExtraLife);
        assert_eq!(state.progress.lives, 4);
        state.apply_reward(Reward::WeaponCharge);
        state.apply_reward(Reward::ShieldCharge);
        assert!(state.bonus_weapon && state.bonus_shield);
    }
}
