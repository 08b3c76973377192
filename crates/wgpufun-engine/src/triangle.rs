//! The hard-coded triangle shader program.
//!
//! The WGSL source is the program the GPU runs (`render::TriangleRenderer`
//! draws it). The functions below evaluate the same two stages on the CPU so
//! the shader's outputs can be checked without a device.
//!
//! Vertex stage, for `i` in `{0, 1, 2}`:
//! - `x = (1 - i) * 0.5` (with `i` reinterpreted as signed)
//! - `y = ((i & 1) * 2 - 1) * 0.5`
//!
//! giving `(0.5, -0.5)`, `(0.0, 0.5)`, `(-0.5, -0.5)`.
//!
//! Fragment stage: `(0.1, px, py, 1.0)` for the interpolated position.

use crate::coords::collision::{barycentric, weights_inside};
use crate::coords::Vec2;

/// WGSL source of the triangle program.
pub const WGSL_SOURCE: &str = include_str!("render/shaders/triangle.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Vertex invocations per draw. Other counts are outside the shader's contract.
pub const TRIANGLE_VERTEX_COUNT: u32 = 3;

/// Red channel written by every fragment.
pub const FRAGMENT_RED: f32 = 0.1;

/// Output of one vertex invocation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexOutput {
    /// `@builtin(position)`: `(x, y, 0, 1)`.
    pub clip_position: [f32; 4],
    /// `@location(0)` varying: `(x, y)`.
    pub position: [f32; 2],
}

/// Evaluates `vs_main` for one vertex index.
///
/// Indices outside `{0, 1, 2}` still produce the formula's value; the
/// subtraction wraps like WGSL's `i32` arithmetic.
pub fn vertex_stage(vertex_index: u32) -> VertexOutput {
    let i = vertex_index as i32;
    let x = 1i32.wrapping_sub(i) as f32 * 0.5;
    let y = ((vertex_index & 1) as i32 * 2 - 1) as f32 * 0.5;

    VertexOutput {
        clip_position: [x, y, 0.0, 1.0],
        position: [x, y],
    }
}

/// Evaluates `fs_main` for an interpolated varying. No clamping.
#[inline]
pub fn fragment_stage(position: [f32; 2]) -> [f32; 4] {
    [FRAGMENT_RED, position[0], position[1], 1.0]
}

/// Runs the vertex stage for the whole draw.
pub fn vertices() -> [VertexOutput; TRIANGLE_VERTEX_COUNT as usize] {
    [0, 1, 2].map(vertex_stage)
}

/// Rasterizes the triangle into a `width × height` grid on the CPU.
///
/// Samples pixel centers, maps them to NDC (+Y up), interpolates the varying
/// with barycentric weights (w = 1, so no perspective correction) and shades
/// covered pixels with [`fragment_stage`]. Returns row-major pixels from the
/// top row down; `None` means not covered.
pub fn rasterize(width: u32, height: u32) -> Vec<Option<[f32; 4]>> {
    let [a, b, c] = vertices();
    let (pa, pb, pc) = (
        Vec2::from(a.position),
        Vec2::from(b.position),
        Vec2::from(c.position),
    );

    let mut out = Vec::with_capacity((width * height) as usize);
    for py in 0..height {
        for px in 0..width {
            let p = pixel_center_ndc(px, py, width, height);
            let shaded = barycentric(p, pa, pb, pc)
                .filter(|w| weights_inside(*w))
                .map(|w| {
                    let varying = pa * w[0] + pb * w[1] + pc * w[2];
                    fragment_stage(varying.to_array())
                });
            out.push(shaded);
        }
    }
    out
}

/// NDC position of a pixel center. Row 0 is the top of the target.
pub fn pixel_center_ndc(px: u32, py: u32, width: u32, height: u32) -> Vec2 {
    let x = (px as f32 + 0.5) / width as f32 * 2.0 - 1.0;
    let y = 1.0 - (py as f32 + 0.5) / height as f32 * 2.0;
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::collision::signed_area;

    // ── vertex stage ──────────────────────────────────────────────────────

    #[test]
    fn vertex_zero_is_bottom_right() {
        let v = vertex_stage(0);
        assert_eq!(v.position, [0.5, -0.5]);
        assert_eq!(v.clip_position, [0.5, -0.5, 0.0, 1.0]);
    }

    #[test]
    fn vertex_one_is_top_center() {
        let v = vertex_stage(1);
        assert_eq!(v.position, [0.0, 0.5]);
        assert_eq!(v.clip_position, [0.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn vertex_two_is_bottom_left() {
        let v = vertex_stage(2);
        assert_eq!(v.position, [-0.5, -0.5]);
        assert_eq!(v.clip_position, [-0.5, -0.5, 0.0, 1.0]);
    }

    #[test]
    fn clip_position_extends_varying() {
        for v in vertices() {
            assert_eq!(&v.clip_position[..2], &v.position[..]);
            assert_eq!(v.clip_position[2..], [0.0, 1.0]);
        }
    }

    #[test]
    fn triangle_is_not_degenerate() {
        let [a, b, c] = vertices().map(|v| Vec2::from(v.position));
        let area = signed_area(a, b, c);
        assert_ne!(area, 0.0);
        // Counter-clockwise, matching wgpu's default front face.
        assert_eq!(area, 0.5);
    }

    #[test]
    fn out_of_range_index_is_defined() {
        let v = vertex_stage(3);
        assert_eq!(v.position, [-1.0, 0.5]);

        let v = vertex_stage(u32::MAX);
        assert!(v.position[0].is_finite());
        assert_eq!(v.position[1], 0.5);
    }

    #[test]
    fn stages_are_deterministic() {
        for i in 0..TRIANGLE_VERTEX_COUNT {
            let (a, b) = (vertex_stage(i), vertex_stage(i));
            assert_eq!(a.position.map(f32::to_bits), b.position.map(f32::to_bits));
        }
        let p = [0.123_456_7, -0.765_432_1];
        assert_eq!(
            fragment_stage(p).map(f32::to_bits),
            fragment_stage(p).map(f32::to_bits)
        );
    }

    // ── fragment stage ────────────────────────────────────────────────────

    #[test]
    fn fragment_passes_varying_through_unclamped() {
        assert_eq!(fragment_stage([0.25, -0.5]), [0.1, 0.25, -0.5, 1.0]);
        assert_eq!(fragment_stage([3.0, -7.0]), [0.1, 3.0, -7.0, 1.0]);
    }

    // ── reference rasterization ───────────────────────────────────────────

    #[test]
    fn center_pixel_is_covered_and_shaded_by_position() {
        let (w, h) = (33, 33);
        let image = rasterize(w, h);
        let center = image[(16 * w + 16) as usize].expect("center should be covered");
        assert_eq!(center[0], FRAGMENT_RED);
        assert!(center[1].abs() < 1e-5);
        assert!(center[2].abs() < 1e-5);
        assert_eq!(center[3], 1.0);
    }

    #[test]
    fn corners_are_not_covered() {
        let (w, h) = (32, 32);
        let image = rasterize(w, h);
        for (px, py) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            assert!(image[(py * w + px) as usize].is_none());
        }
    }

    #[test]
    fn covered_pixels_interpolate_their_own_position() {
        let (w, h) = (48, 32);
        let image = rasterize(w, h);
        for py in 0..h {
            for px in 0..w {
                let Some(color) = image[(py * w + px) as usize] else { continue };
                let p = pixel_center_ndc(px, py, w, h);
                assert!((color[1] - p.x).abs() < 1e-5);
                assert!((color[2] - p.y).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn coverage_matches_triangle_area() {
        // Area 0.5 out of the 4.0 NDC square.
        let (w, h) = (128, 128);
        let covered = rasterize(w, h).iter().filter(|p| p.is_some()).count() as f32;
        let expected = (w * h) as f32 / 8.0;
        assert!((covered - expected).abs() / expected < 0.05, "covered {covered}");
    }

    // ── WGSL ──────────────────────────────────────────────────────────────

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(WGSL_SOURCE).expect("triangle.wgsl should parse")
    }

    #[test]
    fn wgsl_validates() {
        let module = parse();
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .expect("triangle.wgsl should validate");
    }

    #[test]
    fn wgsl_exposes_one_vertex_and_one_fragment_entry() {
        let module = parse();
        assert_eq!(module.entry_points.len(), 2);

        let vs = module
            .entry_points
            .iter()
            .find(|ep| ep.name == VERTEX_ENTRY)
            .expect("vertex entry");
        assert_eq!(vs.stage, naga::ShaderStage::Vertex);
        assert_eq!(vs.function.arguments.len(), 1);

        let fs = module
            .entry_points
            .iter()
            .find(|ep| ep.name == FRAGMENT_ENTRY)
            .expect("fragment entry");
        assert_eq!(fs.stage, naga::ShaderStage::Fragment);
        let binding = fs.function.result.as_ref().and_then(|r| r.binding.as_ref());
        assert!(matches!(
            binding,
            Some(naga::Binding::Location { location: 0, .. })
        ));
    }
}
