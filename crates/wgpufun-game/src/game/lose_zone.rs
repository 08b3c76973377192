use wgpufun_engine::coords::{ColorRgba, Vec2};
use wgpufun_engine::mesh::{MeshBuilder, Vertex};

/// Strip along the bottom of the world; touching it resets the ball.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoseZone;

impl LoseZone {
    pub const HEIGHT: f32 = 0.1;
    pub const COLOR: ColorRgba = ColorRgba::rgb([1.0, 0.6, 0.0]);

    /// Half-width; wider than anything the camera can show.
    const HALF_WIDTH: f32 = 10.0;

    pub fn push(&self, mesh: &mut MeshBuilder) {
        let top = -1.0 + Self::HEIGHT;
        mesh.push(
            [
                [-Self::HALF_WIDTH, -1.0],
                [Self::HALF_WIDTH, -1.0],
                [Self::HALF_WIDTH, top],
                [-Self::HALF_WIDTH, top],
            ]
            .map(|position| Vertex {
                position,
                color: Self::COLOR.to_rgb(),
            }),
            [0, 1, 2, 0, 2, 3],
        );
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.y < -1.0 + Self::HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_points_below_top_edge() {
        assert!(LoseZone.contains(Vec2::new(0.0, -0.95)));
        assert!(LoseZone.contains(Vec2::new(4.0, -3.0)));
        assert!(!LoseZone.contains(Vec2::new(0.0, -0.85)));
    }

    #[test]
    fn pushes_one_quad() {
        let mut mesh = MeshBuilder::new();
        LoseZone.push(&mut mesh);
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert!(mesh.vertices().iter().all(|v| v.color == [1.0, 0.6, 0.0]));
    }
}
