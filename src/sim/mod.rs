//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Unit timestep per tick
//! - Seeded RNG only
//! - Stable iteration order (by index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{resolve_collisions, resolve_pair};
pub use placement::{is_valid_position, particle_at, relocate_particle, spawn_particle};
pub use state::{Arena, Circle, Color, Particle, SimState};
pub use tick::{TickInput, tick};
