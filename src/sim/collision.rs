//! Swept collision checks between flying entities
//!
//! Fast objects can pass through each other between two ticks, so hits are
//! decided on the closest approach over the upcoming tick rather than on the
//! current positions.

use super::entity::Body;

/// Floor on the sample span so stationary pairs still get one sample
const MIN_SPAN: f32 = 0.1;

/// Smallest separation between `a` and `b` while both move by one tick of
/// their own velocity.
///
/// The tick is sampled at `i / span` for `i = 0, 1, ..` up to `span`, where
/// `span` is the largest velocity component magnitude of either body. When
/// `span` has a fractional part the final sample falls short of the full
/// step.
pub fn closest_distance(a: &Body, b: &Body) -> f32 {
    let span = a
        .vel
        .x
        .abs()
        .max(a.vel.y.abs())
        .max(b.vel.x.abs())
        .max(b.vel.y.abs())
        .max(MIN_SPAN);

    let mut min_sq = f32::MAX;
    for step in 0..=span.floor() as u64 {
        let t = step as f32 / span;
        let pa = a.pos + a.vel * t;
        let pb = b.pos + b.vel * t;
        min_sq = min_sq.min(pa.distance_squared(pb));
    }
    min_sq.sqrt()
}

/// Do `a` and `b` come within `reach` of each other during the next tick?
#[inline]
pub fn swept_hit(a: &Body, b: &Body, reach: f32) -> bool {
    closest_distance(a, b) <= reach
}
