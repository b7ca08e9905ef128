use std::fmt;

use foundation::math::Vec2;

use crate::svg::fmt_num;

/// Pan/zoom transform applied on top of projected geometry:
/// `screen = local * k + (x, y)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    pub fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Local (projected) coordinates → screen coordinates.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    /// Screen coordinates → local (projected) coordinates.
    pub fn invert(&self, p: Vec2) -> Vec2 {
        Vec2::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Same transform translated by `delta` screen pixels.
    pub fn translate_by(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.k)
    }

    /// Rescales to `k` keeping the screen point `anchor` fixed.
    pub fn scale_to(&self, k: f64, anchor: Vec2) -> Self {
        let local = self.invert(anchor);
        Self::new(anchor.x - local.x * k, anchor.y - local.y * k, k)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({},{}) scale({})",
            fmt_num(self.x),
            fmt_num(self.y),
            fmt_num(self.k)
        )
    }
}
