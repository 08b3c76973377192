/// Drawable size in physical pixels, as seen by renderers.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Height over width, used to keep world units square on screen.
    ///
    /// Returns 1.0 for invalid viewports.
    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        if self.is_valid() { self.height / self.width } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_is_height_over_width() {
        assert_eq!(Viewport::new(1280.0, 720.0).aspect_ratio(), 0.5625);
    }

    #[test]
    fn invalid_viewport_has_unit_aspect() {
        assert_eq!(Viewport::new(0.0, 720.0).aspect_ratio(), 1.0);
        assert_eq!(Viewport::new(f32::NAN, 1.0).aspect_ratio(), 1.0);
    }
}
