use super::{Vec2, Viewport};

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// A `size` rect anchored to the top-right corner of `viewport`, `margin`
    /// pixels in from both edges.
    pub fn anchored_top_right(viewport: Viewport, size: Vec2, margin: f32) -> Self {
        Rect::new(
            (viewport.width - size.x - margin).max(0.0),
            margin,
            size.x,
            size.y,
        )
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// Same rect with its width replaced.
    #[inline]
    pub fn with_width(self, w: f32) -> Self {
        Rect::new(self.origin.x, self.origin.y, w.max(0.0), self.size.y)
    }

    /// Vertical center line.
    #[inline]
    pub fn center_y(self) -> f32 {
        self.origin.y + self.size.y * 0.5
    }
}
