//! Spawn and relocation placement
//!
//! Positions come from rejection sampling against the live particle set.
//! Attempts are bounded so a crowded arena degrades to a reported failure
//! instead of a stall; callers decide whether to surface that.

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Arena, Color, Particle};
use crate::consts::SPAWN_SPEED;

/// True iff a disc at `pos` would keep clear of every existing particle.
/// Exact tangency passes.
pub fn is_valid_position(pos: DVec2, radius: f64, particles: &[Particle]) -> bool {
    particles
        .iter()
        .all(|p| pos.distance(p.pos) >= radius + p.radius)
}

/// Uniform position with the whole disc inside the arena
fn random_position(arena: &Arena, radius: f64, rng: &mut Pcg32) -> DVec2 {
    DVec2::new(
        rng.random_range(radius..=arena.width - radius),
        rng.random_range(radius..=arena.height - radius),
    )
}

/// Append a particle at a random non-overlapping position, with a fresh
/// random velocity in [-SPAWN_SPEED, SPAWN_SPEED] per axis.
///
/// Returns false, leaving the set untouched, when no valid spot turned up
/// within `max_attempts` or the arena cannot fit the disc at all.
pub fn spawn_particle(
    particles: &mut Vec<Particle>,
    arena: &Arena,
    radius: f64,
    color: Color,
    max_attempts: u32,
    rng: &mut Pcg32,
) -> bool {
    if !arena.fits(radius) {
        log::warn!(
            "arena {}x{} cannot fit a particle of radius {radius}",
            arena.width,
            arena.height
        );
        return false;
    }

    for _ in 0..max_attempts {
        let pos = random_position(arena, radius, rng);
        if is_valid_position(pos, radius, particles) {
            let vel = DVec2::new(
                rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
                rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
            );
            particles.push(Particle::new(pos, vel, radius, color));
            return true;
        }
    }
    false
}

/// Move one particle to a fresh non-overlapping position, keeping its
/// velocity.
///
/// The particle itself is excluded from the clearance check. On exhaustion
/// it stays where it is and false is returned.
pub fn relocate_particle(
    particles: &mut [Particle],
    index: usize,
    arena: &Arena,
    max_attempts: u32,
    rng: &mut Pcg32,
) -> bool {
    let radius = particles[index].radius;
    if !arena.fits(radius) {
        return false;
    }

    for _ in 0..max_attempts {
        let pos = random_position(arena, radius, rng);
        let clear = particles
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != index)
            .all(|(_, p)| pos.distance(p.pos) >= radius + p.radius);
        if clear {
            particles[index].pos = pos;
            return true;
        }
    }
    false
}

/// Index of the first particle whose disc covers `pos`
pub fn particle_at(pos: DVec2, particles: &[Particle]) -> Option<usize> {
    particles.iter().position(|p| pos.distance(p.pos) <= p.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const RED: Color = Color::rgb(255, 0, 0);

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(99)
    }

    #[test]
    fn test_spawned_particles_keep_clearance() {
        let arena = Arena::new(400.0, 300.0);
        let mut particles = Vec::new();
        let mut rng = rng();

        for _ in 0..20 {
            assert!(spawn_particle(&mut particles, &arena, 10.0, RED, 100, &mut rng));
        }

        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let distance = particles[i].pos.distance(particles[j].pos);
                assert!(distance >= particles[i].radius + particles[j].radius);
            }
        }
    }

    #[test]
    fn test_spawn_stays_inside_arena() {
        let arena = Arena::new(100.0, 80.0);
        let mut particles = Vec::new();
        let mut rng = rng();
        for _ in 0..5 {
            assert!(spawn_particle(&mut particles, &arena, 10.0, RED, 100, &mut rng));
        }
        for p in &particles {
            assert!(p.pos.x >= 10.0 && p.pos.x <= 90.0);
            assert!(p.pos.y >= 10.0 && p.pos.y <= 70.0);
            assert!(p.vel.x.abs() <= SPAWN_SPEED && p.vel.y.abs() <= SPAWN_SPEED);
        }
    }

    #[test]
    fn test_spawn_fails_on_saturated_arena() {
        // Every candidate position lies within a radius-sum of the blocker
        let arena = Arena::new(21.0, 21.0);
        let mut particles = vec![Particle::new(
            DVec2::new(10.5, 10.5),
            DVec2::ZERO,
            10.0,
            RED,
        )];
        let mut rng = rng();

        assert!(!spawn_particle(&mut particles, &arena, 10.0, RED, 100, &mut rng));
        assert_eq!(particles.len(), 1);
    }

    #[test]
    fn test_spawn_fails_when_disc_cannot_fit() {
        let arena = Arena::new(15.0, 100.0);
        let mut particles = Vec::new();
        assert!(!spawn_particle(&mut particles, &arena, 10.0, RED, 100, &mut rng()));
        assert!(particles.is_empty());
    }

    #[test]
    fn test_relocate_moves_stray_inside_and_keeps_velocity() {
        let arena = Arena::new(400.0, 300.0);
        let mut particles = vec![Particle::new(
            DVec2::new(-50.0, 50.0),
            DVec2::new(1.5, -0.5),
            10.0,
            RED,
        )];

        assert!(relocate_particle(&mut particles, 0, &arena, 100, &mut rng()));
        let p = &particles[0];
        assert!(p.pos.x >= 10.0 && p.pos.x <= 390.0);
        assert!(p.pos.y >= 10.0 && p.pos.y <= 290.0);
        assert_eq!(p.vel, DVec2::new(1.5, -0.5));
    }

    #[test]
    fn test_relocate_failure_leaves_particle_in_place() {
        let arena = Arena::new(21.0, 21.0);
        let mut particles = vec![
            Particle::new(DVec2::new(10.5, 10.5), DVec2::ZERO, 10.0, RED),
            Particle::new(DVec2::new(100.0, 100.0), DVec2::new(2.0, 0.0), 10.0, RED),
        ];

        assert!(!relocate_particle(&mut particles, 1, &arena, 100, &mut rng()));
        assert_eq!(particles[1].pos, DVec2::new(100.0, 100.0));
        assert_eq!(particles[1].vel, DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_particle_at_hits_inside_radius_only() {
        let particles = vec![
            Particle::new(DVec2::new(100.0, 100.0), DVec2::ZERO, 10.0, RED),
            Particle::new(DVec2::new(200.0, 100.0), DVec2::ZERO, 10.0, RED),
        ];

        assert_eq!(particle_at(DVec2::new(105.0, 100.0), &particles), Some(0));
        // Boundary counts as a hit
        assert_eq!(particle_at(DVec2::new(110.0, 100.0), &particles), Some(0));
        assert_eq!(particle_at(DVec2::new(200.0, 95.0), &particles), Some(1));
        assert_eq!(particle_at(DVec2::new(150.0, 100.0), &particles), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A successful spawn never lands overlapping anything already
            /// in the set.
            #[test]
            fn spawn_never_overlaps(
                width in 200.0f64..800.0,
                height in 200.0f64..600.0,
                count in 1usize..15,
                seed in 0u64..u64::MAX,
            ) {
                let arena = Arena::new(width, height);
                let mut particles = Vec::new();
                let mut rng = Pcg32::seed_from_u64(seed);

                for _ in 0..count {
                    let before = particles.clone();
                    if spawn_particle(&mut particles, &arena, 10.0, RED, 100, &mut rng) {
                        let spawned = particles.last().unwrap();
                        for p in &before {
                            prop_assert!(
                                spawned.pos.distance(p.pos) >= spawned.radius + p.radius
                            );
                        }
                    }
                }
            }
        }
    }
}
