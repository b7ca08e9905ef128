use crate::math::Vec2;

/// Axis-aligned 2D bounding box in device space.
///
/// The empty box has `min = +inf` and `max = -inf`, so extending it with the
/// first point yields a zero-size box at that point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb2 {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Aabb2 { min, max }
    }

    pub fn empty() -> Self {
        Aabb2 {
            min: Vec2::new(f64::INFINITY, f64::INFINITY),
            max: Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Vec2>>(points: I) -> Self {
        let mut out = Self::empty();
        for p in points {
            out.extend(p);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn extend(&mut self, p: Vec2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        let mut out = *self;
        out.extend(other.min);
        out.extend(other.max);
        out
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.max.y - self.min.y
    }

    /// Center of the box; the origin for an empty box.
    pub fn center(&self) -> Vec2 {
        if self.is_empty() {
            return Vec2::ZERO;
        }
        Vec2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2;
    use crate::math::Vec2;

    #[test]
    fn extends_from_points() {
        let b = Aabb2::from_points([
            Vec2::new(1.0, 5.0),
            Vec2::new(-3.0, 2.0),
            Vec2::new(0.0, 7.0),
        ]);
        assert_eq!(b.min, Vec2::new(-3.0, 2.0));
        assert_eq!(b.max, Vec2::new(1.0, 7.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 5.0);
        assert_eq!(b.center(), Vec2::new(-1.0, 4.5));
    }

    #[test]
    fn empty_box_is_zero_sized_at_origin() {
        let b = Aabb2::empty();
        assert!(b.is_empty());
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
        assert_eq!(b.center(), Vec2::ZERO);
        assert!(!b.contains(Vec2::ZERO));
    }

    #[test]
    fn union_ignores_empty() {
        let a = Aabb2::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert_eq!(a.union(&Aabb2::empty()), a);
        let b = Aabb2::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 0.5));
        let u = Aabb2::empty().union(&a).union(&b);
        assert_eq!(u, Aabb2::new(Vec2::new(0.0, -1.0), Vec2::new(3.0, 1.0)));
    }
}
