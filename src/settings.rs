//! Simulation settings
//!
//! Data-driven defaults for the arena and particle population, loadable
//! from an optional JSON file. Malformed values are clamped or replaced so
//! a bad file never stops the simulation from starting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Color;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial arena dimensions
    pub arena_width: f64,
    pub arena_height: f64,
    /// Fraction of velocity removed per tick, in [0, 1]
    pub friction: f64,
    /// Seconds the driver sleeps between ticks (pacing only)
    pub tick_interval: f64,
    /// Particles placed at startup
    pub initial_particles: usize,
    /// Radius and color used for spawned particles
    pub particle_radius: f64,
    pub particle_color: Color,
    /// Rejection-sampling attempt budget for spawn/relocate
    pub max_placement_attempts: u32,
    /// RNG seed; None draws one from system entropy
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            friction: DEFAULT_FRICTION,
            tick_interval: DEFAULT_TICK_INTERVAL,
            initial_particles: INITIAL_PARTICLES,
            particle_radius: PARTICLE_RADIUS,
            particle_color: Color::rgb(255, 0, 0),
            max_placement_attempts: PLACEMENT_ATTEMPTS,
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults when the
    /// path is absent, unreadable or malformed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("could not read settings {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Clamp or replace out-of-range values instead of refusing to start.
    pub fn sanitized(mut self) -> Self {
        self.friction = if self.friction.is_finite() {
            self.friction.clamp(0.0, 1.0)
        } else {
            DEFAULT_FRICTION
        };
        self.tick_interval = if self.tick_interval.is_finite() {
            self.tick_interval.max(0.0)
        } else {
            DEFAULT_TICK_INTERVAL
        };
        if !(self.particle_radius.is_finite() && self.particle_radius > 0.0) {
            log::warn!("replacing invalid particle radius {}", self.particle_radius);
            self.particle_radius = PARTICLE_RADIUS;
        }
        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            log::warn!("replacing invalid arena width {}", self.arena_width);
            self.arena_width = DEFAULT_ARENA_WIDTH;
        }
        if !(self.arena_height.is_finite() && self.arena_height > 0.0) {
            log::warn!("replacing invalid arena height {}", self.arena_height);
            self.arena_height = DEFAULT_ARENA_HEIGHT;
        }
        self
    }
}
