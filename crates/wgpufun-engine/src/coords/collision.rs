//! 2D intersection tests for triangles, segments and circles.
//!
//! Used by the game for paddle/ball contact and by the triangle module's
//! reference rasterizer for coverage.

use super::Vec2;

/// Tolerance for degenerate-triangle and edge checks.
const EPSILON: f32 = 1e-6;

/// Returns whether `p` lies on the "right" side of the line through `a` and `b`.
///
/// "Right" means above the line (greater y) for non-vertical lines and to the
/// right (greater x) for vertical ones. It is a side label, not an
/// orientation: only comparisons between two points against the same line are
/// meaningful.
pub fn is_right(p: Vec2, a: Vec2, b: Vec2) -> bool {
    if a.x == b.x {
        return p.x > a.x;
    }

    if a.y == b.y {
        return p.y > a.y;
    }

    // y = m·x + c through a and b
    let d = b - a;
    let m = d.y / d.x;
    let c = a.y - m * a.x;

    p.y > m * p.x + c
}

/// Returns whether `p` is inside the triangle `(v1, v2, v3)`.
///
/// `p` is inside when, for every edge, it sits on the same side as the
/// opposite vertex.
pub fn triangle_contains(p: Vec2, v1: Vec2, v2: Vec2, v3: Vec2) -> bool {
    let s1 = is_right(p, v1, v2) ^ is_right(v3, v1, v2);
    let s2 = is_right(p, v1, v3) ^ is_right(v2, v1, v3);
    let s3 = is_right(p, v2, v3) ^ is_right(v1, v2, v3);

    !s1 && !s2 && !s3
}

/// Closest point to `p` on the segment `[a, b]`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let line = b - a;
    let dir = line.normalized();
    let t = (p - a).dot(dir);

    if t < 0.0 {
        a
    } else if t > line.length() {
        b
    } else {
        a + dir * t
    }
}

/// Returns whether the circle `(c, r)` touches the segment `[a, b]`.
///
/// A zero-length segment is treated as the point `a`.
pub fn circle_intersects_line_segment(c: Vec2, r: f32, a: Vec2, b: Vec2) -> bool {
    (c - closest_point_on_segment(c, a, b)).length() <= r
}

/// Returns whether the circle `(c, r)` overlaps the triangle `(v1, v2, v3)`.
pub fn circle_intersects_triangle(c: Vec2, r: f32, v1: Vec2, v2: Vec2, v3: Vec2) -> bool {
    triangle_contains(c, v1, v2, v3)
        || circle_intersects_line_segment(c, r, v1, v2)
        || circle_intersects_line_segment(c, r, v1, v3)
        || circle_intersects_line_segment(c, r, v2, v3)
}

/// Signed area of the triangle `(a, b, c)`; positive for counter-clockwise.
#[inline]
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    0.5 * (b - a).cross(c - a)
}

/// Barycentric weights of `p` relative to `(v1, v2, v3)`.
///
/// Returns `None` for degenerate triangles. Weights sum to 1 and are all
/// non-negative (within tolerance) exactly when `p` is inside.
pub fn barycentric(p: Vec2, v1: Vec2, v2: Vec2, v3: Vec2) -> Option<[f32; 3]> {
    let e1 = v2 - v1;
    let e2 = v3 - v1;
    let area_x2 = e1.cross(e2);

    if area_x2.abs() < EPSILON {
        return None;
    }

    let rel = p - v1;
    let beta = rel.cross(e2) / area_x2;
    let gamma = e1.cross(rel) / area_x2;

    Some([1.0 - beta - gamma, beta, gamma])
}

/// Whether barycentric weights describe a point inside (or on) the triangle.
#[inline]
pub fn weights_inside(w: [f32; 3]) -> bool {
    w.iter().all(|&c| c >= -EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    // ── triangle_contains ─────────────────────────────────────────────────

    #[test]
    fn triangle_contains_interior_point() {
        assert!(triangle_contains(v(0.1, 0.1), v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)));
    }

    #[test]
    fn triangle_excludes_point_past_hypotenuse() {
        assert!(!triangle_contains(v(1.0, 1.0), v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)));
    }

    #[test]
    fn triangle_excludes_point_behind_origin() {
        assert!(!triangle_contains(v(-0.1, -0.1), v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)));
    }

    #[test]
    fn triangle_contains_is_winding_independent() {
        let (a, b, c) = (v(0.5, -0.5), v(0.0, 0.5), v(-0.5, -0.5));
        let p = v(0.0, 0.0);
        assert!(triangle_contains(p, a, b, c));
        assert!(triangle_contains(p, c, b, a));
    }

    // ── circle_intersects_line_segment ────────────────────────────────────

    #[test]
    fn circle_hits_segment_through_center() {
        assert!(circle_intersects_line_segment(v(0.0, 0.0), 1.0, v(-1.0, -1.0), v(1.0, 1.0)));
    }

    #[test]
    fn circle_hits_segment_starting_at_center() {
        assert!(circle_intersects_line_segment(v(0.0, 0.0), 1.0, v(0.0, 0.0), v(1.0, 1.0)));
        assert!(circle_intersects_line_segment(v(0.0, 0.0), 1.0, v(0.0, 0.0), v(0.1, 0.1)));
    }

    #[test]
    fn circle_misses_distant_point_segment() {
        assert!(!circle_intersects_line_segment(v(0.0, 0.0), 1.0, v(0.0, 2.0), v(0.0, 2.0)));
    }

    #[test]
    fn circle_touches_point_segment_within_radius() {
        assert!(circle_intersects_line_segment(v(0.0, 0.0), 1.0, v(0.0, 0.5), v(0.0, 0.5)));
    }

    #[test]
    fn closest_point_clamps_to_endpoints() {
        let (a, b) = (v(0.0, 0.0), v(1.0, 0.0));
        assert_eq!(closest_point_on_segment(v(-2.0, 1.0), a, b), a);
        assert_eq!(closest_point_on_segment(v(3.0, 1.0), a, b), b);
        assert_eq!(closest_point_on_segment(v(0.25, 1.0), a, b), v(0.25, 0.0));
    }

    // ── circle_intersects_triangle ────────────────────────────────────────

    #[test]
    fn circle_near_edge_intersects_triangle() {
        let (a, b, c) = (v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0));
        assert!(circle_intersects_triangle(v(0.5, -0.05), 0.1, a, b, c));
        assert!(!circle_intersects_triangle(v(0.5, -0.5), 0.1, a, b, c));
    }

    // ── area / barycentric ────────────────────────────────────────────────

    #[test]
    fn signed_area_sign_follows_winding() {
        let (a, b, c) = (v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0));
        assert_eq!(signed_area(a, b, c), 0.5);
        assert_eq!(signed_area(a, c, b), -0.5);
    }

    #[test]
    fn barycentric_of_vertices_are_unit_weights() {
        let (a, b, c) = (v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0));
        assert_eq!(barycentric(a, a, b, c), Some([1.0, 0.0, 0.0]));
        assert_eq!(barycentric(b, a, b, c), Some([0.0, 1.0, 0.0]));
        assert_eq!(barycentric(c, a, b, c), Some([0.0, 0.0, 1.0]));
    }

    #[test]
    fn barycentric_degenerate_is_none() {
        assert_eq!(barycentric(v(0.0, 0.0), v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)), None);
    }

    #[test]
    fn barycentric_outside_has_negative_weight() {
        let w = barycentric(v(1.0, 1.0), v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)).unwrap();
        assert!(!weights_inside(w));
    }
}
