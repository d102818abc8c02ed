use glam::{UVec2, Vec2};

/// Size of the display surface in pixels.
///
/// Relative coordinates put the camera at [`Viewport::center_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    size: UVec2,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: UVec2::new(width, height) }
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Resize on display change.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = UVec2::new(width, height);
    }

    /// Half the size, rounded down to whole pixels.
    pub fn center_offset(&self) -> Vec2 {
        (self.size / 2).as_vec2()
    }

    /// Whether an axis-aligned rectangle in viewport space overlaps the surface.
    pub fn is_rect_visible(&self, top_left: Vec2, size: Vec2) -> bool {
        let surface = self.size.as_vec2();
        let bottom_right = top_left + size;
        bottom_right.x > 0.0
            && bottom_right.y > 0.0
            && top_left.x < surface.x
            && top_left.y < surface.y
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_800_by_600() {
        let vp = Viewport::default();
        assert_eq!((vp.width(), vp.height()), (800, 600));
        assert_eq!(vp.center_offset(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn center_offset_rounds_down() {
        assert_eq!(Viewport::new(1921, 1081).center_offset(), Vec2::new(960.0, 540.0));
    }

    #[test]
    fn resize_updates_center() {
        let mut vp = Viewport::default();
        vp.resize(1280, 720);
        assert_eq!(vp.size(), UVec2::new(1280, 720));
        assert_eq!(vp.center_offset(), Vec2::new(640.0, 360.0));
    }

    #[test]
    fn rect_visibility_detects_overlap() {
        let vp = Viewport::new(100, 50);
        // Fully inside
        assert!(vp.is_rect_visible(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0)));
        // Hanging off the left edge
        assert!(vp.is_rect_visible(Vec2::new(-15.0, 10.0), Vec2::new(20.0, 20.0)));
        // Entirely left of the surface
        assert!(!vp.is_rect_visible(Vec2::new(-30.0, 10.0), Vec2::new(20.0, 20.0)));
        // Entirely below
        assert!(!vp.is_rect_visible(Vec2::new(10.0, 50.0), Vec2::new(20.0, 20.0)));
    }
}
