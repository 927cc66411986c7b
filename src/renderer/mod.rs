//! Draw dispatch
//!
//! The simulation never draws anything itself. Once per frame the outer loop
//! hands a read-only view of the state to [`draw_frame`], which walks it and
//! calls the backend's primitives in a fixed order.

pub mod recorder;

pub use recorder::{DrawCommand, Recorder};

use glam::Vec2;

use crate::consts::SHIP_RADIUS;
use crate::sim::entity::{Flying, Point};
use crate::sim::{GameState, PickupColor, SizeClass, TickInput};

/// HUD and overlay anchors, in field coordinates
pub mod layout {
    use glam::Vec2;

    pub const SCORE: Vec2 = Vec2::new(-380.0, 370.0);
    pub const HIGH_SCORE: Vec2 = Vec2::new(-45.0, 370.0);
    pub const WEAPON: Vec2 = Vec2::new(-120.0, -360.0);
    pub const FPS: Vec2 = Vec2::new(340.0, 360.0);
    pub const LEVEL: Vec2 = Vec2::new(330.0, -370.0);
    pub const LIVES: Vec2 = Vec2::new(-380.0, -370.0);
    pub const HOW_TO: Vec2 = Vec2::new(-180.0, 160.0);
    pub const MENU: Vec2 = Vec2::new(-100.0, 50.0);
    pub const GAME_OVER: Vec2 = Vec2::new(-60.0, 90.0);
    pub const PAUSE: Vec2 = Vec2::new(-35.0, 0.0);
    pub const CENTER: Vec2 = Vec2::ZERO;
}

/// Gap between the ship hull and its shield ring
pub const SHIELD_GAP: f32 = 2.0;

/// Primitives a rendering backend provides. Every call is fire-and-forget.
pub trait Renderer {
    fn asteroid(&mut self, size: SizeClass, pos: Point, rotation: f32);
    fn pickup(&mut self, color: PickupColor, pos: Point, radius: f32, rotation: f32);
    fn bullet(&mut self, pos: Point);
    fn particle(&mut self, pos: Point);
    /// `angle` is the facing in degrees; sprite alignment is the backend's business
    fn ship(&mut self, pos: Point, angle: f32, thrusting: bool);
    fn circle(&mut self, center: Point, radius: f32);

    fn score(&mut self, at: Vec2, score: u64);
    fn high_score(&mut self, at: Vec2, best: u64);
    fn weapon_available(&mut self, at: Vec2);
    fn number(&mut self, at: Vec2, value: u64);
    fn level(&mut self, at: Vec2, level: u32);
    fn lives(&mut self, at: Vec2, lives: u32);

    fn how_to(&mut self, at: Vec2);
    /// Password being typed on the menu
    fn password_entry(&mut self, at: Vec2, typed: &str);
    fn password_result(&mut self, at: Vec2, valid: bool);
    fn menu(&mut self, at: Vec2);
    /// Password for the level just reached
    fn password(&mut self, at: Vec2, password: &str);
    fn game_over(&mut self, at: Vec2, best: u64, newly_set: bool);
    fn pause(&mut self, at: Vec2);
}

/// Issue every draw call for the current frame
pub fn draw_frame<R: Renderer + ?Sized>(state: &GameState, input: &TickInput, renderer: &mut R) {
    for rock in state.asteroids.iter().filter(|a| a.is_alive()) {
        renderer.asteroid(rock.size, rock.body.pos, rock.rotation);
    }
    for bullet in state.bullets.iter().filter(|b| b.is_alive()) {
        renderer.bullet(bullet.body.pos);
    }
    for particle in state.particles.iter().filter(|p| p.is_alive()) {
        renderer.particle(particle.body.pos);
    }
    for pickup in state.pickups.iter().filter(|p| p.is_alive()) {
        renderer.pickup(pickup.color, pickup.body.pos, pickup.radius(), pickup.rotation);
    }

    if !input.menu && !state.game_over && !input.show_password {
        draw_ship(state, input, renderer);
    } else if input.show_password {
        renderer.password(layout::CENTER, &state.progress.password());
    }

    renderer.score(layout::SCORE, state.score);
    renderer.high_score(layout::HIGH_SCORE, state.high_score.best);
    if state.bonus_weapon {
        renderer.weapon_available(layout::WEAPON);
    }
    if input.show_fps {
        renderer.number(layout::FPS, u64::from(input.fps));
    }

    if input.levels {
        renderer.level(layout::LEVEL, state.progress.level);
        renderer.lives(layout::LIVES, state.progress.lives);
    } else if input.menu {
        if input.how_to_play {
            renderer.how_to(layout::HOW_TO);
        } else if input.entering_password {
            renderer.password_entry(layout::CENTER, &input.password);
        } else if input.password_submitted {
            renderer.password_result(layout::CENTER, state.password_valid.unwrap_or(false));
        } else {
            renderer.menu(layout::MENU);
        }
    }

    if state.game_over {
        renderer.game_over(
            layout::GAME_OVER,
            state.high_score.best,
            state.high_score.newly_set,
        );
    } else if input.paused {
        renderer.pause(layout::PAUSE);
    }
}

fn draw_ship<R: Renderer + ?Sized>(state: &GameState, input: &TickInput, renderer: &mut R) {
    let ship = &state.ship;
    if state.is_immortal() {
        if state.ship_visible() {
            renderer.ship(ship.body.pos, ship.angle, input.thrusting());
        }
        return;
    }
    renderer.ship(ship.body.pos, ship.angle, input.thrusting());
    if state.bonus_shield {
        renderer.circle(ship.body.pos, SHIP_RADIUS + SHIELD_GAP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::asteroid::Asteroid;

    fn levels_input() -> TickInput {
        TickInput {
            levels: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_dead_entities_are_not_drawn() {
        let mut state = GameState::new(1);
        state
            .asteroids
            .push(Asteroid::new(1, SizeClass::Large, Vec2::ZERO, Vec2::ZERO, 0.0));
        state
            .asteroids
            .push(Asteroid::new(2, SizeClass::Small, Vec2::ONE, Vec2::ZERO, 0.0));
        state.asteroids[0].kill();
        let mut rec = Recorder::new();
        draw_frame(&state, &levels_input(), &mut rec);
        let rocks: Vec<_> = rec
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Asteroid { .. }))
            .collect();
        assert_eq!(rocks.len(), 1);
    }

    #[test]
    fn test_shield_ring_around_ship() {
        let mut state = GameState::new(1);
        state.bonus_shield = true;
        let mut rec = Recorder::new();
        draw_frame(&state, &levels_input(), &mut rec);
        assert!(rec.commands.contains(&DrawCommand::Circle {
            center: Vec2::ZERO,
            radius: SHIP_RADIUS + SHIELD_GAP,
        }));
    }

    #[test]
    fn test_ship_hidden_in_menu_and_password_overlay() {
        let state = GameState::new(1);
        let menu = TickInput {
            menu: true,
            ..Default::default()
        };
        let mut rec = Recorder::new();
        draw_frame(&state, &menu, &mut rec);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::Ship { .. })), 0);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::Menu { .. })), 1);

        let overlay = TickInput {
            levels: true,
            show_password: true,
            ..Default::default()
        };
        let mut rec = Recorder::new();
        draw_frame(&state, &overlay, &mut rec);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::Ship { .. })), 0);
        assert!(rec.commands.contains(&DrawCommand::Password {
            at: layout::CENTER,
            password: "cxabad".to_string(),
        }));
    }

    #[test]
    fn test_ship_flashes_while_immortal() {
        let mut state = GameState::new(1);
        state.bonus_shield = true;
        state.immortal_ticks = crate::consts::IMMORTAL_TICKS;
        let mut rec = Recorder::new();
        draw_frame(&state, &levels_input(), &mut rec);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::Ship { .. })), 1);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::Circle { .. })), 0);

        state.immortal_ticks -= crate::consts::FLASH_TICKS;
        let mut rec = Recorder::new();
        draw_frame(&state, &levels_input(), &mut rec);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::Ship { .. })), 0);
    }

    #[test]
    fn test_menu_sub_screens() {
        let mut state = GameState::new(1);
        state.password_valid = Some(true);
        let result = TickInput {
            menu: true,
            password_submitted: true,
            ..Default::default()
        };
        let mut rec = Recorder::new();
        draw_frame(&state, &result, &mut rec);
        assert!(rec.commands.contains(&DrawCommand::PasswordResult {
            at: layout::CENTER,
            valid: true,
        }));

        let typing = TickInput {
            menu: true,
            entering_password: true,
            password: "cxa".to_string(),
            ..Default::default()
        };
        let mut rec = Recorder::new();
        draw_frame(&state, &typing, &mut rec);
        assert!(rec.commands.contains(&DrawCommand::PasswordEntry {
            at: layout::CENTER,
            typed: "cxa".to_string(),
        }));
    }

    #[test]
    fn test_hud_and_overlays() {
        let mut state = GameState::new(1);
        state.score = 12;
        state.bonus_weapon = true;
        let input = TickInput {
            levels: true,
            paused: true,
            show_fps: true,
            fps: 60,
            ..Default::default()
        };
        let mut rec = Recorder::new();
        draw_frame(&state, &input, &mut rec);
        let expected = [
            DrawCommand::Score {
                at: layout::SCORE,
                score: 12,
            },
            DrawCommand::WeaponAvailable { at: layout::WEAPON },
            DrawCommand::Number {
                at: layout::FPS,
                value: 60,
            },
            DrawCommand::Level {
                at: layout::LEVEL,
                level: 1,
            },
            DrawCommand::Lives {
                at: layout::LIVES,
                lives: 3,
            },
            DrawCommand::Pause { at: layout::PAUSE },
        ];
        for command in &expected {
            assert!(rec.commands.contains(command), "missing {:?}", command);
        }

        state.game_over = true;
        let mut rec = Recorder::new();
        draw_frame(&state, &input, &mut rec);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::Pause { .. })), 0);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::GameOver { .. })), 1);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::Ship { .. })), 0);
    }
}
