//! Simulation state and core types
//!
//! Everything mutable lives in `SimState`; there are no module-level
//! globals. The state is deterministic given its seed.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::placement;
use crate::Settings;
use crate::consts::*;

/// An RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Rectangular simulation bounds. Origin is the top-left corner, y grows
/// downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether a disc of `radius` fits inside the bounds at all
    pub fn fits(&self, radius: f64) -> bool {
        self.width >= 2.0 * radius && self.height >= 2.0 * radius
    }
}

/// A circular body
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, color: Color) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    /// True when the discs touch or overlap
    pub fn overlaps(&self, other: &Particle) -> bool {
        self.pos.distance(other.pos) <= self.radius + other.radius
    }

    /// Advance one tick: Euler step, friction, wall reflection, stall kick.
    ///
    /// Returns true when the particle has strayed more than
    /// `EDGE_TOLERANCE` past the arena on some axis; the caller should
    /// relocate it rather than trust the bounce from that far out.
    pub fn integrate(&mut self, friction: f64, arena: &Arena, rng: &mut Pcg32) -> bool {
        debug_assert!((0.0..=1.0).contains(&friction));

        self.pos += self.vel;
        self.vel *= 1.0 - friction;

        // A pile-up of overlap corrections can shove a particle well
        // outside before reflection claws it back; flag those before the
        // clamp below hides them.
        let stray = self.pos.x - self.radius < -EDGE_TOLERANCE
            || self.pos.x + self.radius > arena.width + EDGE_TOLERANCE
            || self.pos.y - self.radius < -EDGE_TOLERANCE
            || self.pos.y + self.radius > arena.height + EDGE_TOLERANCE;

        if self.pos.x - self.radius <= 0.0 {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
        } else if self.pos.x + self.radius >= arena.width {
            self.pos.x = arena.width - self.radius;
            self.vel.x = -self.vel.x;
        }

        if self.pos.y - self.radius <= 0.0 {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
        } else if self.pos.y + self.radius >= arena.height {
            self.pos.y = arena.height - self.radius;
            self.vel.y = -self.vel.y;
        }

        // Friction alone would let particles creep to a standstill; kick
        // stalled ones back into motion.
        if self.vel.x.abs() < STALL_SPEED && self.vel.y.abs() < STALL_SPEED {
            self.vel = DVec2::new(
                rng.random_range(-STALL_KICK..=STALL_KICK),
                rng.random_range(-STALL_KICK..=STALL_KICK),
            );
        }

        stray
    }
}

/// Draw parameters for one particle, consumed by an external renderer
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
    pub color: Color,
}

/// Complete simulation state (deterministic given the seed)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Live particle set; append-only
    pub particles: Vec<Particle>,
    /// Current bounds; rewritten by the window resize handler
    pub arena: Arena,
    /// Fraction of velocity removed each tick, in [0, 1]
    pub friction: f64,
    /// Physics is skipped while set
    pub paused: bool,
    /// Seconds the driver sleeps between ticks; pacing only
    pub tick_interval: f64,
    /// Attempt budget for spawn/relocation sampling
    pub max_placement_attempts: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Radius and color for newly spawned particles
    pub spawn_radius: f64,
    pub spawn_color: Color,
    /// Seeded RNG driving placement, stall kicks and collision jitter
    pub rng: Pcg32,
}

impl SimState {
    /// Build a state from settings and place the initial population.
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let mut state = Self {
            particles: Vec::new(),
            arena: Arena::new(settings.arena_width, settings.arena_height),
            friction: settings.friction.clamp(0.0, 1.0),
            paused: false,
            tick_interval: settings.tick_interval.max(0.0),
            max_placement_attempts: settings.max_placement_attempts,
            time_ticks: 0,
            spawn_radius: settings.particle_radius,
            spawn_color: settings.particle_color,
            rng: Pcg32::seed_from_u64(seed),
        };

        for _ in 0..settings.initial_particles {
            if !state.spawn_default() {
                log::warn!("could not place an initial particle; arena too crowded");
            }
        }

        state
    }

    /// Spawn one particle with the configured radius and color.
    ///
    /// Returns false when no free spot turned up within the attempt budget.
    pub fn spawn_default(&mut self) -> bool {
        placement::spawn_particle(
            &mut self.particles,
            &self.arena,
            self.spawn_radius,
            self.spawn_color,
            self.max_placement_attempts,
            &mut self.rng,
        )
    }

    /// Resize-handler entry point. Junk dimensions are dropped here so the
    /// physics never sees them.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {width}x{height}");
            return;
        }
        self.arena = Arena::new(width, height);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "paused" } else { "unpaused" });
    }

    /// Nudge friction, clamped to [0, 1].
    pub fn adjust_friction(&mut self, delta: f64) {
        self.set_friction(self.friction + delta);
    }

    pub fn set_friction(&mut self, friction: f64) {
        self.friction = friction.clamp(0.0, 1.0);
        log::debug!("friction set to {:.2}", self.friction);
    }

    /// Nudge the pacing interval; never goes negative. Physics is
    /// unaffected either way.
    pub fn adjust_tick_interval(&mut self, delta: f64) {
        self.set_tick_interval(self.tick_interval + delta);
    }

    pub fn set_tick_interval(&mut self, seconds: f64) {
        self.tick_interval = seconds.max(0.0);
    }

    /// Picking query for the pointer
    pub fn particle_at(&self, pos: DVec2) -> Option<usize> {
        placement::particle_at(pos, &self.particles)
    }

    /// Speed a particle up along its current heading. A particle at rest
    /// has no heading and is left alone.
    pub fn boost_particle(&mut self, index: usize, factor: f64) -> bool {
        let Some(particle) = self.particles.get_mut(index) else {
            return false;
        };
        let speed = particle.vel.length();
        if speed == 0.0 {
            return false;
        }
        particle.vel += particle.vel / speed * factor;
        true
    }

    /// Shove every particle within a `REPEL_RANGE` square of `point`
    /// directly away from it.
    pub fn repel_from(&mut self, point: DVec2) {
        for particle in &mut self.particles {
            let delta = particle.pos - point;
            if delta.x.abs() < REPEL_RANGE && delta.y.abs() < REPEL_RANGE {
                let distance = delta.length();
                if distance == 0.0 {
                    // No direction to push along
                    continue;
                }
                particle.vel += delta / distance * REPEL_IMPULSE;
            }
        }
    }

    /// Read-only draw parameters for the external renderer
    pub fn circles(&self) -> impl Iterator<Item = Circle> + '_ {
        self.particles.iter().map(|p| Circle {
            center: p.pos,
            radius: p.radius,
            color: p.color,
        })
    }
}
