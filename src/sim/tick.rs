//! Fixed-order simulation tick
//!
//! One tick = input commands, then a collision pass over pre-integration
//! positions, then per-particle integration. Collisions-before-movement is
//! deliberate; swapping the two changes how bounces feel.

use glam::DVec2;

use super::collision::resolve_collisions;
use super::placement::relocate_particle;
use super::state::SimState;
use crate::consts::BOOST_FACTOR;

/// Input commands for a single tick, assembled by external input mapping
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause or unpause the physics
    pub toggle_pause: bool,
    /// Spawn one particle with the configured radius and color
    pub spawn: bool,
    /// Pointer position of a boost click
    pub boost: Option<DVec2>,
    /// Pointer position of a repulsion burst
    pub repel: Option<DVec2>,
    /// Friction adjustment; the result is clamped to [0, 1]
    pub friction_delta: f64,
    /// Pacing adjustment in seconds
    pub interval_delta: f64,
}

/// Advance the simulation by one tick.
///
/// Input commands are honored even while paused, matching an event loop
/// that keeps reacting to the user; the physics pass only runs unpaused.
pub fn tick(state: &mut SimState, input: &TickInput) {
    if input.toggle_pause {
        state.toggle_pause();
    }
    if input.friction_delta != 0.0 {
        state.adjust_friction(input.friction_delta);
    }
    if input.interval_delta != 0.0 {
        state.adjust_tick_interval(input.interval_delta);
    }
    if let Some(point) = input.boost {
        if let Some(index) = state.particle_at(point) {
            state.boost_particle(index, BOOST_FACTOR);
        }
    }
    if let Some(point) = input.repel {
        state.repel_from(point);
    }
    if input.spawn && !state.spawn_default() {
        log::warn!(
            "spawn failed after {} attempts",
            state.max_placement_attempts
        );
    }

    if state.paused {
        return;
    }
    state.time_ticks += 1;

    resolve_collisions(&mut state.particles, &mut state.rng);

    for i in 0..state.particles.len() {
        let stray = state.particles[i].integrate(state.friction, &state.arena, &mut state.rng);
        if stray
            && !relocate_particle(
                &mut state.particles,
                i,
                &state.arena,
                state.max_placement_attempts,
                &mut state.rng,
            )
        {
            log::warn!("could not relocate particle {i}; leaving it out of bounds");
        }
    }
}
