use std::f32::consts::TAU;

use wgpufun_engine::coords::{ColorRgba, Vec2};
use wgpufun_engine::mesh::{MeshBuilder, Vertex};

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Ball {
    pub const SEGMENTS: usize = 20;
    pub const RADIUS: f32 = 0.05;
    pub const SPAWN: Vec2 = Vec2::new(0.0, 0.7);
    pub const COLOR: ColorRgba = ColorRgba::white();

    pub fn new() -> Self {
        Self {
            position: Self::SPAWN,
            velocity: Vec2::zero(),
        }
    }

    /// Moves the ball back to its spawn point. Velocity is kept.
    pub fn respawn(&mut self) {
        self.position = Self::SPAWN;
    }

    /// Pushes a triangle fan: the center, then `SEGMENTS + 1` rim points
    /// (the last one closes the loop).
    pub fn push(&self, mesh: &mut MeshBuilder) {
        let color = Self::COLOR.to_rgb();
        let center = Vertex {
            position: self.position.to_array(),
            color,
        };

        let rim = (0..=Self::SEGMENTS).map(|i| {
            let angle = i as f32 / Self::SEGMENTS as f32 * TAU;
            let offset = Vec2::new(angle.sin(), angle.cos()) * Self::RADIUS;
            Vertex {
                position: (self.position + offset).to_array(),
                color,
            }
        });

        let vertices: Vec<Vertex> = std::iter::once(center).chain(rim).collect();
        let len = vertices.len() as u16;

        let indices = (1..=Self::SEGMENTS as u16).flat_map(|i| [0, (i + 1) % len, i]);

        mesh.push(vertices, indices);
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_has_center_plus_closed_rim() {
        let mut mesh = MeshBuilder::new();
        Ball::new().push(&mut mesh);
        assert_eq!(mesh.vertices().len(), Ball::SEGMENTS + 2);
        assert_eq!(mesh.index_count() as usize, Ball::SEGMENTS * 3);
    }

    #[test]
    fn indices_stay_in_range() {
        let mut mesh = MeshBuilder::new();
        Ball::new().push(&mut mesh);
        let n = mesh.vertices().len() as u16;
        assert!(mesh.indices().iter().all(|&i| i < n));
    }

    #[test]
    fn rim_points_lie_on_radius() {
        let mut ball = Ball::new();
        ball.position = Vec2::new(1.0, -0.25);
        let mut mesh = MeshBuilder::new();
        ball.push(&mut mesh);

        for v in &mesh.vertices()[1..] {
            let d = (Vec2::from(v.position) - ball.position).length();
            assert!((d - Ball::RADIUS).abs() < 1e-6);
        }
    }

    #[test]
    fn respawn_keeps_velocity() {
        let mut ball = Ball::new();
        ball.position = Vec2::new(3.0, -0.95);
        ball.velocity = Vec2::new(0.01, -0.1);
        ball.respawn();
        assert_eq!(ball.position, Ball::SPAWN);
        assert_eq!(ball.velocity, Vec2::new(0.01, -0.1));
    }
}
