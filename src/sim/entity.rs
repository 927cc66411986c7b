//! Shared kinematics for everything that flies
//!
//! Every entity carries a [`Body`] (position, per-tick velocity, alive flag)
//! and implements [`Flying`] for its per-tick advance. The play field is a
//! torus: leaving one edge re-enters from the mirrored edge.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Screen-space position
pub type Point = Vec2;
/// Per-tick displacement
pub type Velocity = Vec2;

/// Position, velocity and liveness shared by all flying entities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Point,
    pub vel: Velocity,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Point, vel: Velocity) -> Self {
        Self {
            pos,
            vel,
            alive: true,
        }
    }

    /// A live body sitting still at `pos`
    pub fn at_rest(pos: Point) -> Self {
        Self::new(pos, Vec2::ZERO)
    }

    /// Move by one tick of velocity
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    /// Count one tick of life, or die once `limit` ticks have been lived.
    /// Returns true if the body moved.
    pub fn age(&mut self, ticks_alive: &mut u32, limit: u32) -> bool {
        if *ticks_alive == limit {
            self.alive = false;
            false
        } else {
            self.step();
            *ticks_alive += 1;
            true
        }
    }
}

/// Capability shared by ships, bullets, asteroids, pickups and background dots
pub trait Flying {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Collision radius (also the off-screen margin used before wrapping)
    fn radius(&self) -> f32;

    /// Advance one tick. Default kinematics: move by velocity.
    fn advance(&mut self) {
        self.body_mut().step();
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn kill(&mut self) {
        self.body_mut().alive = false;
    }

    /// Mirror the crossed axes, keeping velocity
    fn wrap_if_offscreen(&mut self, y_crossed: bool, x_crossed: bool) {
        let body = self.body_mut();
        if y_crossed {
            body.pos.y = -body.pos.y;
        }
        if x_crossed {
            body.pos.x = -body.pos.x;
        }
    }
}

/// Square play field centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub half_extent: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(crate::consts::FIELD_HALF_EXTENT)
    }
}

impl Field {
    pub fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    pub fn top_left(&self) -> Point {
        Vec2::new(-self.half_extent, self.half_extent)
    }

    pub fn bottom_right(&self) -> Point {
        Vec2::new(self.half_extent, -self.half_extent)
    }

    /// Is `point` inside the field grown by `margin` on every side?
    pub fn contains(&self, point: Point, margin: f32) -> bool {
        let limit = self.half_extent + margin;
        point.x >= -limit && point.x <= limit && point.y >= -limit && point.y <= limit
    }

    /// Which axes have reached the field bound, as `(y_crossed, x_crossed)`
    pub fn crossed_axes(&self, point: Point) -> (bool, bool) {
        (
            point.y.abs() >= self.half_extent,
            point.x.abs() >= self.half_extent,
        )
    }

    /// Teleport an entity that drifted past the field (plus its radius)
    pub fn wrap<F: Flying + ?Sized>(&self, entity: &mut F, margin: f32) {
        let pos = entity.body().pos;
        if !self.contains(pos, margin) {
            let (y_crossed, x_crossed) = self.crossed_axes(pos);
            entity.wrap_if_offscreen(y_crossed, x_crossed);
        }
    }

    /// Uniform random point on one of the four edges (edge chosen uniformly)
    pub fn random_edge_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let h = self.half_extent;
        let along = rng.random_range(-h..=h);
        match rng.random_range(0..4u8) {
            0 => Vec2::new(-h, along),
            1 => Vec2::new(h, along),
            2 => Vec2::new(along, h),
            _ => Vec2::new(along, -h),
        }
    }

    /// Uniform random point anywhere inside the field
    pub fn random_interior_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let h = self.half_extent;
        Vec2::new(rng.random_range(-h..=h), rng.random_range(-h..=h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Dot(Body);

    impl Flying for Dot {
        fn body(&self) -> &Body {
            &self.0
        }
        fn body_mut(&mut self) -> &mut Body {
            &mut self.0
        }
        fn radius(&self) -> f32 {
            2.0
        }
    }

    #[test]
    fn test_wrap_only_crossed_y() {
        let field = Field::new(400.0);
        let mut dot = Dot(Body::new(Vec2::new(100.0, 403.0), Vec2::new(1.0, 2.0)));
        field.wrap(&mut dot, 2.0);
        assert_eq!(dot.0.pos, Vec2::new(100.0, -403.0));
        assert_eq!(dot.0.vel, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_wrap_only_crossed_x() {
        let field = Field::new(400.0);
        let mut dot = Dot(Body::new(Vec2::new(-410.0, 50.0), Vec2::new(-3.0, 0.0)));
        field.wrap(&mut dot, 2.0);
        assert_eq!(dot.0.pos, Vec2::new(410.0, 50.0));
        assert_eq!(dot.0.vel, Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_wrap_corner_flips_both() {
        let field = Field::new(400.0);
        let mut dot = Dot(Body::at_rest(Vec2::new(405.0, -405.0)));
        field.wrap(&mut dot, 2.0);
        assert_eq!(dot.0.pos, Vec2::new(-405.0, 405.0));
    }

    #[test]
    fn test_within_margin_does_not_wrap() {
        let field = Field::new(400.0);
        let mut dot = Dot(Body::at_rest(Vec2::new(401.5, 0.0)));
        field.wrap(&mut dot, 2.0);
        assert_eq!(dot.0.pos, Vec2::new(401.5, 0.0));
    }

    #[test]
    fn test_age_kills_at_limit() {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(1.0, 0.0));
        let mut ticks = 0;
        for _ in 0..3 {
            assert!(body.age(&mut ticks, 3));
        }
        assert!(body.alive);
        assert!(!body.age(&mut ticks, 3));
        assert!(!body.alive);
        assert_eq!(body.pos, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_random_edge_point_is_on_edge() {
        let field = Field::new(400.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let p = field.random_edge_point(&mut rng);
            assert!(p.x.abs() == 400.0 || p.y.abs() == 400.0);
            assert!(field.contains(p, 0.0));
        }
    }
}
