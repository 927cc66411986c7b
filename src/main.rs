//! Asteroid Field entry point
//!
//! Headless native driver: an autopilot plays a Levels game for a fixed
//! number of ticks, recording draw calls instead of rendering them.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use asteroid_field::Settings;
use asteroid_field::renderer::{DrawCommand, Recorder, draw_frame};
use asteroid_field::sim::{GameState, Requests, TickInput, handle_input, tick};

/// Ticks the password overlay stays up before the autopilot dismisses it
const PASSWORD_OVERLAY_TICKS: u32 = 120;
/// Autopilot fires once every this many ticks
const FIRE_PERIOD: u64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Sitting on the main menu, about to pick a game
    Menu,
    Playing,
    /// Back at the menu after the run, about to quit
    Leaving,
}

/// Builds one input snapshot per tick, the way a player at the keyboard would
struct Autopilot {
    input: TickInput,
    phase: Phase,
    overlay_ticks: u32,
    clear_pending: bool,
    ticks: u64,
}

impl Autopilot {
    fn new(settings: &Settings) -> Self {
        Self {
            input: TickInput {
                menu: true,
                show_fps: settings.show_fps,
                ..Default::default()
            },
            phase: Phase::Menu,
            overlay_ticks: 0,
            clear_pending: false,
            ticks: 0,
        }
    }

    /// Input for the upcoming tick
    fn next_input(&mut self, state: &GameState, fps: u32, out_of_time: bool) -> &TickInput {
        let input = &mut self.input;
        input.fps = fps;
        input.clear_screen = std::mem::take(&mut self.clear_pending);

        if out_of_time || state.game_over {
            self.phase = Phase::Leaving;
        }

        match self.phase {
            Phase::Menu => {
                input.levels = true;
                input.new_game = true;
            }
            Phase::Playing => {
                input.new_game = false;
                input.left = true;
                input.up = self.ticks % 90 < 10;
                input.fire = self.ticks % FIRE_PERIOD == 0;
                input.shockwave = state.bonus_weapon && state.asteroids.len() >= 4;

                if input.show_password {
                    self.overlay_ticks += 1;
                    if self.overlay_ticks >= PASSWORD_OVERLAY_TICKS {
                        input.show_password = false;
                        self.overlay_ticks = 0;
                    }
                }
            }
            Phase::Leaving => {
                input.left = false;
                input.up = false;
                input.fire = false;
                input.shockwave = false;
                input.show_password = false;
                // The first menu frame after game over restarts the session; the next quits
                input.quit = input.menu && !state.game_over;
                input.menu = true;
                input.levels = false;
            }
        }

        self.ticks += 1;
        &self.input
    }

    /// Apply the flags the core asked to change
    fn apply(&mut self, requests: Requests) {
        if requests.leave_menu {
            self.input.menu = false;
            self.clear_pending = true;
            self.phase = Phase::Playing;
        }
        if requests.show_password {
            self.input.show_password = true;
            self.overlay_ticks = 0;
        }
    }
}

/// Ticks completed over the last second of wall time
struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            fps: 0,
        }
    }

    fn frame(&mut self) -> u32 {
        self.frames += 1;
        if self.window_start.elapsed().as_secs_f64() >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Instant::now();
        }
        self.fps
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Asteroid Field (headless) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = GameState::new(seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut pilot = Autopilot::new(&settings);
    let mut recorder = Recorder::new();
    let mut fps = FpsCounter::new();
    let mut draw_calls: usize = 0;
    let frame_budget = settings.frame_duration();

    loop {
        let started = Instant::now();
        let out_of_time = pilot.ticks >= u64::from(settings.demo_ticks);
        let input = pilot.next_input(&state, fps.fps, out_of_time).clone();

        let requests = tick(&mut state, &input);
        pilot.apply(requests);
        let requests = handle_input(&mut state, &input);
        pilot.apply(requests);

        recorder.clear();
        draw_frame(&state, &pilot.input, &mut recorder);
        draw_calls += recorder.commands.len();

        if requests.quit {
            let rocks = recorder.count(|c| matches!(c, DrawCommand::Asteroid { .. }));
            log::info!(
                "Done after {} ticks: score {}, best {}, level {}, lives {}, {} draws, {} rocks",
                pilot.ticks,
                state.score,
                state.high_score.best,
                state.progress.level,
                state.progress.lives,
                draw_calls,
                rocks
            );
            std::process::exit(0);
        }

        fps.frame();
        if settings.pace {
            if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
}
