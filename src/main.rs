//! Headless driver for the particle arena
//!
//! Seeds the arena from settings, then runs the tick loop at the
//! configured pacing until the process is stopped. Rendering and input
//! mapping are external concerns; the loop here only exercises the
//! simulation itself.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use particle_arena::Settings;
use particle_arena::sim::{SimState, TickInput, tick};

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());
    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "starting {}x{} arena with {} particles, seed {seed}",
        settings.arena_width,
        settings.arena_height,
        settings.initial_particles
    );

    let mut state = SimState::new(&settings, seed);
    let input = TickInput::default();

    loop {
        let started = Instant::now();
        tick(&mut state, &input);

        if state.time_ticks % 200 == 0 {
            let mean_speed = state
                .particles
                .iter()
                .map(|p| p.vel.length())
                .sum::<f64>()
                / state.particles.len().max(1) as f64;
            log::debug!(
                "tick {}: {} particles, mean speed {mean_speed:.3}",
                state.time_ticks,
                state.particles.len()
            );
        }

        let interval = Duration::from_secs_f64(state.tick_interval);
        if let Some(remaining) = interval.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
