//! Particle Arena - an interactive 2D particle sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particles, collisions, placement)
//! - `settings`: Data-driven configuration

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Simulation constants
pub mod consts {
    /// Default arena dimensions (pixels)
    pub const DEFAULT_ARENA_WIDTH: f64 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f64 = 600.0;

    /// Default pacing interval between ticks, in seconds
    pub const DEFAULT_TICK_INTERVAL: f64 = 0.05;
    /// Default fraction of velocity removed per tick
    pub const DEFAULT_FRICTION: f64 = 0.0;

    /// Particle defaults
    pub const PARTICLE_RADIUS: f64 = 10.0;
    pub const INITIAL_PARTICLES: usize = 10;

    /// Freshly spawned particles get velocity components in [-SPAWN_SPEED, SPAWN_SPEED]
    pub const SPAWN_SPEED: f64 = 2.0;
    /// A particle slower than this on both axes counts as stalled
    pub const STALL_SPEED: f64 = 0.01;
    /// Stalled particles restart with components in [-STALL_KICK, STALL_KICK]
    pub const STALL_KICK: f64 = 1.0;

    /// How far past an arena edge a particle may stray before it gets relocated
    pub const EDGE_TOLERANCE: f64 = 21.0;

    /// Per-axis velocity jitter range applied on collision
    pub const JITTER_MIN: f64 = 0.8;
    pub const JITTER_MAX: f64 = 1.2;

    /// Repulsion affects particles within a square of this half-extent
    pub const REPEL_RANGE: f64 = 50.0;
    /// Impulse magnitude added away from the repulsion point
    pub const REPEL_IMPULSE: f64 = 5.0;

    /// Speed added along a particle's heading on a boost click
    pub const BOOST_FACTOR: f64 = 2.0;

    /// Rejection-sampling attempt budget for spawn/relocate
    pub const PLACEMENT_ATTEMPTS: u32 = 100;
}
