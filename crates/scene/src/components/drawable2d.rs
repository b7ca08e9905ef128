use foundation::bounds::Aabb2;
use foundation::math::Vec2;

use crate::svg::fmt_num;

/// Device-space path: one or more subpaths plus the serialized path data.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub d: String,
    pub subpaths: Vec<Vec<Vec2>>,
    pub closed: bool,
    pub bounds: Aabb2,
}

impl PathShape {
    /// Closed polygon rings (exterior rings and holes alike).
    pub fn polygon(rings: Vec<Vec<Vec2>>) -> Self {
        Self::build(rings, true)
    }

    /// Open polylines.
    pub fn lines(lines: Vec<Vec<Vec2>>) -> Self {
        Self::build(lines, false)
    }

    fn build(subpaths: Vec<Vec<Vec2>>, closed: bool) -> Self {
        let d = path_data(&subpaths, closed);
        let bounds = Aabb2::from_points(subpaths.iter().flatten().copied());
        Self {
            d,
            subpaths,
            closed,
            bounds,
        }
    }

    /// Even-odd containment test over all rings, so holes and disjoint parts
    /// of a multipolygon behave as drawn.
    pub fn contains(&self, p: Vec2) -> bool {
        if !self.closed || !self.bounds.contains(p) {
            return false;
        }
        let mut inside = false;
        for ring in &self.subpaths {
            if ring.len() < 3 {
                continue;
            }
            let mut j = ring.len() - 1;
            for i in 0..ring.len() {
                let (a, b) = (ring[i], ring[j]);
                if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
                {
                    inside = !inside;
                }
                j = i;
            }
        }
        inside
    }
}

/// SVG path data (`M x,y L x,y ... Z`). Closed subpaths drop a repeated
/// closing vertex and end with `Z`.
pub fn path_data(subpaths: &[Vec<Vec2>], closed: bool) -> String {
    let mut d = String::new();
    for sub in subpaths {
        let mut pts: &[Vec2] = sub;
        if closed && pts.len() > 1 && pts.first() == pts.last() {
            pts = &pts[..pts.len() - 1];
        }
        let Some((first, rest)) = pts.split_first() else {
            continue;
        };
        d.push_str(&format!("M{},{}", fmt_num(first.x), fmt_num(first.y)));
        for p in rest {
            d.push_str(&format!("L{},{}", fmt_num(p.x), fmt_num(p.y)));
        }
        if closed {
            d.push('Z');
        }
    }
    d
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape2D {
    Path(PathShape),
    Circle { center: Vec2, radius: f64 },
    Text { anchor: Vec2, text: String },
}

impl Shape2D {
    pub fn circle(center: Vec2, radius: f64) -> Self {
        Shape2D::Circle { center, radius }
    }

    pub fn text(anchor: Vec2, text: impl Into<String>) -> Self {
        Shape2D::Text {
            anchor,
            text: text.into(),
        }
    }

    /// Hit test in the owning layer's local coordinates.
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Shape2D::Path(path) => path.contains(p),
            Shape2D::Circle { center, radius } => {
                let d = p - *center;
                d.x * d.x + d.y * d.y <= radius * radius
            }
            Shape2D::Text { .. } => false,
        }
    }
}

/// Presentation attributes of a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paint {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub font_size: Option<f64>,
    /// Node receives pointer events (and shows a pointer cursor).
    pub interactive: bool,
}

impl Paint {
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn stroke(color: impl Into<String>) -> Self {
        Self {
            stroke: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn with_font_size(mut self, px: f64) -> Self {
        self.font_size = Some(px);
        self
    }
}
