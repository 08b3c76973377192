use std::f32::consts::FRAC_PI_8;

use wgpufun_engine::coords::collision::circle_intersects_triangle;
use wgpufun_engine::coords::{ColorRgba, Vec2};
use wgpufun_engine::mesh::{MeshBuilder, Vertex};

use super::Ball;

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub x: f32,
    /// Horizontal velocity in -1..=1. Also tilts the paddle.
    pub velocity: f32,
}

impl Paddle {
    pub const WIDTH: f32 = 0.4;
    pub const HEIGHT: f32 = 0.2;
    pub const Y: f32 = -0.7;
    pub const COLOR: ColorRgba = ColorRgba::white();

    /// Body tilt per unit of velocity.
    const ANGLE_MULTIPLIER: f32 = FRAC_PI_8;
    /// Bounce-normal tilt per unit of velocity and per unit of x.
    const NORMAL_ANGLE_MULTIPLIER: f32 = FRAC_PI_8 / 2.0;

    pub fn new() -> Self {
        Self { x: 0.0, velocity: 0.0 }
    }

    /// Corners of the tilted body, counter-clockwise from bottom-left.
    pub fn points(&self) -> [Vec2; 4] {
        const HALF_W: f32 = Paddle::WIDTH / 2.0;
        const HALF_H: f32 = Paddle::HEIGHT / 2.0;

        let angle = self.velocity * Self::ANGLE_MULTIPLIER;
        let center = Vec2::new(self.x, Self::Y);

        [
            Vec2::new(-HALF_W, -HALF_H),
            Vec2::new(HALF_W, -HALF_H),
            Vec2::new(HALF_W, HALF_H),
            Vec2::new(-HALF_W, HALF_H),
        ]
        .map(|corner| center + corner.rotated(angle))
    }

    pub fn push(&self, mesh: &mut MeshBuilder) {
        mesh.push(
            self.points().map(|p| Vertex {
                position: p.to_array(),
                color: Self::COLOR.to_rgb(),
            }),
            [0, 1, 2, 0, 2, 3],
        );
    }

    /// Whether the ball overlaps the paddle body.
    pub fn contains(&self, ball: &Ball) -> bool {
        let [a, b, c, d] = self.points();
        circle_intersects_triangle(ball.position, Ball::RADIUS, a, b, c)
            || circle_intersects_triangle(ball.position, Ball::RADIUS, a, c, d)
    }

    /// Bounce direction: up, tilted by both the paddle's motion and its
    /// offset from the world center.
    pub fn normal(&self) -> Vec2 {
        let from_velocity = Vec2::UNIT_Y.rotated(self.velocity * Self::NORMAL_ANGLE_MULTIPLIER);
        let from_position = Vec2::UNIT_Y.rotated(self.x * Self::NORMAL_ANGLE_MULTIPLIER);

        from_velocity * 0.5 + from_position * 0.5
    }
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}
