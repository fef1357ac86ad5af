//! Pairwise collision detection and response
//!
//! Every unordered pair is tested once per tick. Resolution is an
//! approximate bounce: velocities flip with a random jitter factor and the
//! discs are pushed apart along the line between their centers. Pairs are
//! handled sequentially, so a particle overlapping several partners is
//! resolved against each in turn.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Particle;
use crate::consts::{JITTER_MAX, JITTER_MIN};

/// Scan all pairs and resolve every overlap found.
///
/// O(n²) over the set; later resolutions see positions already adjusted by
/// earlier ones.
pub fn resolve_collisions(particles: &mut [Particle], rng: &mut Pcg32) {
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let (head, tail) = particles.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            if a.overlaps(b) {
                resolve_pair(a, b, rng);
            }
        }
    }
}

/// Bounce two overlapping particles off each other.
///
/// Each velocity component is negated and scaled by an independent draw
/// from [JITTER_MIN, JITTER_MAX], then the discs are separated by half the
/// overlap each. Coincident centers leave no separation direction; the
/// positional correction is skipped and only the jittered velocities drive
/// the pair apart.
pub fn resolve_pair(a: &mut Particle, b: &mut Particle, rng: &mut Pcg32) {
    a.vel.x = -a.vel.x * rng.random_range(JITTER_MIN..=JITTER_MAX);
    a.vel.y = -a.vel.y * rng.random_range(JITTER_MIN..=JITTER_MAX);
    b.vel.x = -b.vel.x * rng.random_range(JITTER_MIN..=JITTER_MAX);
    b.vel.y = -b.vel.y * rng.random_range(JITTER_MIN..=JITTER_MAX);

    // Recomputed rather than handed in from detection: resolution is also
    // reachable with the pair in either order, and the jitter above does
    // not move the centers.
    let delta = a.pos - b.pos;
    let distance = delta.length();
    let overlap = (a.radius + b.radius) - distance;
    if overlap > 0.0 {
        if distance == 0.0 {
            log::trace!("coincident centers; skipping positional correction");
            return;
        }
        let dir = delta / distance;
        a.pos += dir * (overlap / 2.0);
        b.pos -= dir * (overlap / 2.0);
    }
}
