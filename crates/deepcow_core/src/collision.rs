//! Agent–agent and agent–border collision response.
//!
//! Each agent–agent pass works on the positions and velocities at the start
//! of the pass: every correction is computed first and applied afterwards,
//! so the outcome is independent of pair enumeration order. Passes repeat
//! until no pair overlaps, which also separates clusters of three or more.

use crate::agent::Agent;
use crate::config::ArenaConfig;
use crate::geometry::circle_overlap;
use deepcow_data::Vector2;

/// Upper bound on agent–agent passes per call.
pub const MAX_COLLISION_PASSES: usize = 1024;

/// Penetration depth treated as contact rather than overlap.
pub const CONTACT_SLOP: f64 = 1e-9;

/// Correction accumulated for one agent during a pass.
#[derive(Debug, Clone, Copy, Default)]
struct Correction {
    position: Vector2,
    velocity: Vector2,
}

/// Separates every overlapping pair of agents.
///
/// Returns the number of pairs that overlapped before the first pass.
/// Displacement is split by mass (the heavier agent moves less). The
/// approaching part of the relative velocity along the contact axis is
/// cancelled with equal and opposite impulses, so momentum is conserved.
/// Already separated agents are left untouched.
pub fn resolve_agent_collisions(agents: &mut [Agent]) -> usize {
    let overlapping = collision_pass(agents);
    if overlapping == 0 {
        return 0;
    }
    for _ in 1..MAX_COLLISION_PASSES {
        if collision_pass(agents) == 0 {
            return overlapping;
        }
    }
    tracing::debug!(
        agents = agents.len(),
        passes = MAX_COLLISION_PASSES,
        "Collision passes exhausted with residual overlap"
    );
    overlapping
}

/// One simultaneous pass. Returns how many pairs it corrected.
fn collision_pass(agents: &mut [Agent]) -> usize {
    let n = agents.len();
    let mut corrections = vec![Correction::default(); n];
    let mut resolved = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (&agents[i], &agents[j]);
            let Some(overlap) = circle_overlap(
                a.body.position,
                a.body.radius,
                b.body.position,
                b.body.radius,
            ) else {
                continue;
            };
            if overlap.depth <= CONTACT_SLOP {
                continue;
            }
            resolved += 1;

            let total_mass = a.mass + b.mass;
            let axis = overlap.axis;
            corrections[i].position -= axis * (overlap.depth * b.mass / total_mass);
            corrections[j].position += axis * (overlap.depth * a.mass / total_mass);

            let closing = (b.velocity - a.velocity).dot(axis);
            if closing < 0.0 {
                let impulse = -closing / (1.0 / a.mass + 1.0 / b.mass);
                corrections[i].velocity -= axis * (impulse / a.mass);
                corrections[j].velocity += axis * (impulse / b.mass);
            }
        }
    }

    if resolved > 0 {
        for (agent, c) in agents.iter_mut().zip(corrections) {
            agent.body.position += c.position;
            agent.velocity += c.velocity;
        }
    }
    resolved
}

/// Keeps the agent's circle inside the arena. Returns true if it was clamped.
///
/// The outward velocity component is reversed and scaled by `restitution`;
/// zero stops the agent against the wall.
pub fn resolve_border_collision(agent: &mut Agent, arena: &ArenaConfig, restitution: f64) -> bool {
    let r = agent.body.radius;
    let (x, vx, hit_x) = clamp_axis(
        agent.body.position.x,
        agent.velocity.x,
        r,
        arena.width,
        restitution,
    );
    let (y, vy, hit_y) = clamp_axis(
        agent.body.position.y,
        agent.velocity.y,
        r,
        arena.height,
        restitution,
    );
    agent.body.position = Vector2::new(x, y);
    agent.velocity = Vector2::new(vx, vy);
    hit_x || hit_y
}

fn clamp_axis(pos: f64, vel: f64, radius: f64, extent: f64, restitution: f64) -> (f64, f64, bool) {
    let (lo, hi) = (radius, extent - radius);
    if lo > hi {
        // Arena narrower than the agent: pin it to the middle.
        return (extent / 2.0, 0.0, true);
    }
    if pos < lo {
        let vel = if vel < 0.0 { -vel * restitution } else { vel };
        (lo, vel, true)
    } else if pos > hi {
        let vel = if vel > 0.0 { -vel * restitution } else { vel };
        (hi, vel, true)
    } else {
        (pos, vel, false)
    }
}
