use nalgebra::Vector2;
use rand::Rng;
use tracing::trace;

/// A movable circle with mass, as seen by the narrow phase and the collision response.
pub trait Collider {
    fn position(&self) -> Vector2<f32>;
    fn set_position(&mut self, position: Vector2<f32>);
    fn velocity(&self) -> Vector2<f32>;
    fn set_velocity(&mut self, velocity: Vector2<f32>);
    fn radius(&self) -> f32;
    fn mass(&self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    // Unit vector pointing from b's center to a's center.
    pub normal: Vector2<f32>,
    // Sum of radii minus center distance. Negative when the circles are apart.
    pub depth: f32,
}

// Touching counts as colliding.
pub fn is_colliding<A, B>(a: &A, b: &B) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let distance_sq = (a.position() - b.position()).norm_squared();
    let collision_distance = a.radius() + b.radius();
    distance_sq <= collision_distance * collision_distance
}

// None when the centers coincide and no normal exists.
pub fn contact<A, B>(a: &A, b: &B) -> Option<Contact>
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let delta = a.position() - b.position();
    let distance = delta.norm();
    if distance == 0.0 {
        return None;
    }
    Some(Contact {
        normal: delta / distance,
        depth: a.radius() + b.radius() - distance,
    })
}

/// Pushes two overlapping circles apart along the contact normal so that they end up
/// exactly touching. The penetration is split in inverse proportion to mass.
///
/// If both centers coincide, `a` is first nudged by a random offset in `[0, 1)` on each
/// axis so that a normal can be computed.
pub fn separate<A, B, R>(a: &mut A, b: &mut B, rng: &mut R)
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
    R: Rng + ?Sized,
{
    if a.position() == b.position() {
        let nudge = Vector2::new(rng.gen::<f32>(), rng.gen::<f32>());
        trace!(?nudge, "coincident centers, nudging first body");
        a.set_position(a.position() + nudge);
    }

    let Some(contact) = contact(a, b) else {
        return;
    };
    let total_mass = a.mass() + b.mass();
    let offset = contact.normal * contact.depth;
    a.set_position(a.position() + offset * (b.mass() / total_mass));
    b.set_position(b.position() - offset * (a.mass() / total_mass));
}

/// Impulse exchange along the contact normal. `restitution` is clamped to `[0, 1]`:
/// 0 leaves no relative normal velocity, 1 conserves kinetic energy. The tangential
/// components are untouched.
pub fn resolve_velocity<A, B>(a: &mut A, b: &mut B, restitution: f32)
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let Some(contact) = contact(a, b) else {
        return;
    };
    let restitution = restitution.clamp(0.0, 1.0);
    let normal = contact.normal;
    let relative_normal_speed = (a.velocity() - b.velocity()).dot(&normal);
    let impulse = (1.0 + restitution) / (a.mass() + b.mass()) * relative_normal_speed;

    a.set_velocity(a.velocity() - normal * (impulse * b.mass()));
    b.set_velocity(b.velocity() + normal * (impulse * a.mass()));
}

// Narrow phase plus response for a single pair. Returns whether the pair collided.
pub fn resolve_pair<A, B, R>(a: &mut A, b: &mut B, restitution: f32, rng: &mut R) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
    R: Rng + ?Sized,
{
    if !is_colliding(a, b) {
        return false;
    }
    separate(a, b, rng);
    resolve_velocity(a, b, restitution);
    true
}

/// All-pairs resolution inside one broad-phase bucket. Pairs are visited once each, in
/// container order. Returns the number of colliding pairs.
///
/// A body that lives in several buckets can be resolved against the same partner again
/// from another bucket during the same tick.
pub fn resolve_leaf<C, R>(
    indices: &[usize],
    bodies: &mut [C],
    restitution: f32,
    rng: &mut R,
) -> usize
where
    C: Collider,
    R: Rng + ?Sized,
{
    let mut collided = 0;
    for (i, &first) in indices.iter().enumerate() {
        for &second in &indices[i + 1..] {
            let Some((a, b)) = pair_mut(bodies, first, second) else {
                continue;
            };
            if resolve_pair(a, b, restitution, rng) {
                collided += 1;
            }
        }
    }
    collided
}

fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> Option<(&mut T, &mut T)> {
    if first == second {
        return None;
    }
    if first < second {
        let (head, tail) = items.split_at_mut(second);
        Some((&mut head[first], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(first);
        Some((&mut tail[0], &mut head[second]))
    }
}
