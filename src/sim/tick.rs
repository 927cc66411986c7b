//! Fixed-step simulation tick
//!
//! The outer loop calls [`tick`], then [`handle_input`], then draws, once per
//! frame. Neither function blocks; both run to completion synchronously.

use rand::Rng;

use super::asteroid::SizeClass;
use super::collision::swept_hit;
use super::entity::Flying;
use super::projectile::Bullet;
use super::ship::Turn;
use super::state::{GameState, Mode};
use crate::consts::*;

/// Input snapshot for a single tick, built by the windowing/input layer
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    // Held keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub fire: bool,
    /// Trigger the shockwave (needs a weapon charge)
    pub shockwave: bool,

    // Mode and screen flags
    pub paused: bool,
    pub practice: bool,
    pub levels: bool,
    pub menu: bool,
    pub quit: bool,
    pub how_to_play: bool,
    pub entering_password: bool,
    pub password_submitted: bool,
    /// Screen-clearing transition between menu and game
    pub clear_screen: bool,
    /// The run starts from level 1 instead of resuming
    pub new_game: bool,
    /// Password overlay is up; gameplay is frozen
    pub show_password: bool,
    pub show_fps: bool,

    pub fps: u32,
    /// Password text typed so far
    pub password: String,
}

impl TickInput {
    /// Which game the flags describe. Practice wins over menu, menu over levels.
    pub fn mode(&self) -> Mode {
        if self.practice {
            Mode::Practice
        } else if self.menu || !self.levels {
            Mode::Menu
        } else {
            Mode::Levels
        }
    }

    /// Ship engines are firing (for the flame sprite)
    pub fn thrusting(&self) -> bool {
        self.up || self.strafe_left || self.strafe_right
    }
}

/// Flags the core asks the input layer to change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requests {
    /// Drop the menu flag: a game was chosen
    pub leave_menu: bool,
    /// Raise the password overlay (every tenth level)
    pub show_password: bool,
    /// Terminal: the outer loop should exit with success
    pub quit: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Requests {
    let mut requests = Requests::default();
    let mode = input.mode();

    if !input.paused {
        advance_particles(state);
        advance_bullets(state);
        if !input.show_password {
            advance_asteroids(state, input, mode, &mut requests);
            advance_ship(state);
            advance_pickups(state, input, mode);
            resolve_collisions(state, input, mode);
        }
        reap(state, input, mode);
        state.frame_count += 1;
    }

    if mode != Mode::Practice && state.high_score.observe(state.score) {
        log::debug!("New high score: {}", state.score);
    }

    if input.password_submitted {
        let accepted = match state.progress.apply_password(&input.password) {
            Ok(()) => true,
            Err(err) => {
                if state.password_valid != Some(false) {
                    log::info!("Password rejected: {}", err);
                }
                false
            }
        };
        if accepted && state.password_valid != Some(true) {
            log::info!(
                "Password accepted: level {}, {} lives",
                state.progress.level,
                state.progress.lives
            );
        }
        state.password_valid = Some(accepted);
    }

    requests
}

/// React to the held keys and menu choices for this frame
pub fn handle_input(state: &mut GameState, input: &TickInput) -> Requests {
    let mut requests = Requests::default();

    if !input.menu && !state.game_over && !input.paused {
        if input.left {
            state.ship.rotate(Turn::Left);
        }
        if input.right {
            state.ship.rotate(Turn::Right);
        }
        if input.up {
            state.ship.thrust();
        }
        if input.down {
            state.ship.reverse_thruster();
        }
        if input.strafe_left {
            state.ship.strafe(Turn::Left);
        }
        if input.strafe_right {
            state.ship.strafe(Turn::Right);
        }
        if input.fire {
            let ship = &state.ship;
            state
                .bullets
                .push(Bullet::fire(ship.body.pos, ship.angle, ship.velocity()));
        }
        if input.shockwave && state.bonus_weapon {
            state.fire_shockwave();
        }
    } else if state.game_over {
        if input.menu {
            log::info!("Back to menu after game over");
            state.restart_session();
        }
    } else if input.menu {
        if input.practice || input.levels {
            requests.leave_menu = true;
            state.high_score.clear_flag();
            state.reset_run();
            if input.new_game {
                state.progress.reset();
                state.score = 0;
            }
            log::info!(
                "Starting {} at level {}",
                if input.practice { "practice" } else { "levels" },
                state.progress.level
            );
        } else if input.password_submitted {
            state.reset_run();
        } else if input.quit {
            log::info!("Quit requested");
            requests.quit = true;
        }
    }

    requests
}

fn advance_particles(state: &mut GameState) {
    if state.particles.len() < MAX_PARTICLES && state.frame_count % 2 == 0 {
        state.spawn_particle();
    }

    let field = state.field;
    for particle in &mut state.particles {
        particle.advance();
        field.wrap(particle, BULLET_WRAP_MARGIN);
    }
}

fn advance_bullets(state: &mut GameState) {
    let field = state.field;
    for bullet in state.bullets.iter_mut().filter(|b| b.is_alive()) {
        bullet.advance();
        field.wrap(bullet, BULLET_WRAP_MARGIN);
    }
}

fn advance_asteroids(
    state: &mut GameState,
    input: &TickInput,
    mode: Mode,
    requests: &mut Requests,
) {
    if input.clear_screen {
        return;
    }

    match mode {
        Mode::Menu | Mode::Practice => {
            if state.asteroids.len() < ENDLESS_ASTEROIDS {
                state.spawn_asteroid(SizeClass::Large);
            }
        }
        Mode::Levels => spawn_for_level(state, requests),
    }

    let field = state.field;
    for rock in state.asteroids.iter_mut().filter(|a| a.is_alive()) {
        rock.advance();
        let radius = rock.radius();
        field.wrap(rock, radius);
    }
}

/// One spawn attempt for staged play: small first, then medium, then large.
/// With the quota spent and the field empty, the level is cleared.
fn spawn_for_level(state: &mut GameState, requests: &mut Requests) {
    let due = state.asteroids.len() < LEVELS_SOFT_CAP
        || (state.frame_count / 2) % LEVELS_SPAWN_PERIOD == 0;
    if !due {
        return;
    }

    let quota = state.progress.quota();
    if state.spawned.small < quota.small {
        state.spawned.small += 1;
        state.spawn_asteroid(SizeClass::Small);
    } else if state.spawned.medium < quota.medium {
        state.spawned.medium += 1;
        state.spawn_asteroid(SizeClass::Medium);
    } else if state.spawned.large < quota.large {
        state.spawned.large += 1;
        state.spawn_asteroid(SizeClass::Large);
    } else if state.asteroids.is_empty() {
        state.progress.add_level();
        state.spawned.reset();
        state.frame_count = 0;
        log::info!("Level {} reached", state.progress.level);
        if state.progress.level % 10 == 0 {
            requests.show_password = true;
        }
    }
}

fn advance_ship(state: &mut GameState) {
    if state.ship.is_alive() {
        state.ship.advance();
    }
    let radius = state.ship.radius();
    state.field.wrap(&mut state.ship, radius);
}

fn advance_pickups(state: &mut GameState, input: &TickInput, mode: Mode) {
    if !input.clear_screen {
        match mode {
            Mode::Practice => {
                if state.pickups.is_empty() {
                    state.spawn_practice_pickups();
                }
            }
            Mode::Menu => {
                if state.frame_count % MENU_PICKUP_PERIOD == MENU_PICKUP_PHASE {
                    state.spawn_random_pickup();
                }
            }
            Mode::Levels => {}
        }
    }

    // Practice targets stay put
    if mode == Mode::Practice {
        return;
    }
    let field = state.field;
    for pickup in state.pickups.iter_mut().filter(|p| p.is_alive()) {
        pickup.advance();
        field.wrap(pickup, PICKUP_RADIUS);
    }
}

/// Bullets against pickups and asteroids, then the ship against both
pub(crate) fn resolve_collisions(state: &mut GameState, input: &TickInput, mode: Mode) {
    for bi in 0..state.bullets.len() {
        if !state.bullets[bi].is_alive() {
            continue;
        }
        let shot = state.bullets[bi].body;

        // A shot collects pickups without being spent
        for pi in 0..state.pickups.len() {
            let pickup = &state.pickups[pi];
            if pickup.is_alive() && swept_hit(&shot, &pickup.body, pickup.radius()) {
                let reward = pickup.reward();
                state.pickups[pi].kill();
                state.apply_reward(reward);
            }
        }

        // Fragments are appended while scanning; the shot stops at its first hit
        let mut ai = 0;
        while ai < state.asteroids.len() {
            let rock = &state.asteroids[ai];
            if rock.is_alive() && swept_hit(&shot, &rock.body, rock.radius()) {
                let size = rock.size;
                let fragments = state.asteroids[ai].shatter();
                state.spawn_fragments(fragments);
                state.score += size.value();
                state.bullets[bi].kill();
                log::debug!("{:?} asteroid destroyed, score {}", size, state.score);

                if mode == Mode::Levels && !input.clear_screen {
                    roll_bonus_pickup(state);
                }
                break;
            }
            ai += 1;
        }
    }

    if state.ship.is_alive() && !state.is_immortal() && mode != Mode::Menu {
        collide_ship(state, mode);
    } else if state.is_immortal() {
        state.immortal_ticks -= 1;
        if state.frame_count == 0 {
            state.immortal_ticks = 0;
        }
    }
}

/// Chance of a bonus pickup after a kill shrinks as levels climb
fn roll_bonus_pickup(state: &mut GameState) {
    let level = state.progress.level;
    if state.rng().random_range(0..20 + level) <= 10 {
        state.spawn_random_pickup();
    }
}

fn collide_ship(state: &mut GameState, mode: Mode) {
    let ship_radius = state.ship.radius();

    for ai in 0..state.asteroids.len() {
        if !state.ship.is_alive() {
            break;
        }
        let rock = &state.asteroids[ai];
        let reach = rock.radius() + ship_radius;
        if !rock.is_alive() || !swept_hit(&state.ship.body, &rock.body, reach) {
            continue;
        }
        if state.bonus_shield {
            state.asteroids[ai].kill();
            state.bonus_shield = false;
            log::debug!("Shield absorbed an asteroid");
        } else {
            state.ship.kill();
            state.immortal_ticks = IMMORTAL_TICKS;
            log::debug!("Ship destroyed");
        }
    }

    if !state.ship.is_alive() {
        return;
    }
    for pi in 0..state.pickups.len() {
        let pickup = &state.pickups[pi];
        if !pickup.is_alive() {
            continue;
        }
        let touching = swept_hit(&state.ship.body, &pickup.body, pickup.radius() + ship_radius);
        let first_contact = touching && !pickup.touching_ship;
        let reward = pickup.reward();
        state.pickups[pi].touching_ship = touching;
        if first_contact {
            state.apply_reward(reward);
            if mode != Mode::Practice {
                state.pickups[pi].kill();
            }
        }
    }
}

/// Drop dead entities and settle the ship's fate
pub(crate) fn reap(state: &mut GameState, input: &TickInput, mode: Mode) {
    let keep = !input.clear_screen;
    state.asteroids.retain(|a| keep && a.is_alive());
    state.bullets.retain(|b| keep && b.is_alive());
    state.particles.retain(|p| keep && p.is_alive());

    if !state.ship.is_alive() && !state.game_over {
        if mode == Mode::Practice {
            state.ship.reset();
            state.score = 0;
        } else if state.progress.lives > 1 {
            state.ship.reset();
            state.progress.take_life();
            log::info!("Life lost, {} remaining", state.progress.lives);
        } else {
            state.game_over = true;
            state.progress.take_life();
            log::info!("Game over with {} points", state.score);
        }
    }

    state.pickups.retain(|p| keep && p.is_alive());
}
