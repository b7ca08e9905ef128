use formats::RegionGeometry;
use foundation::math::{Projection, Vec2};
use scene::components::{Paint, Shape2D};
use scene::{LayerKind, NodeId, NodeKey, Surface};

use crate::layer::MapLayer;
use crate::symbology::LabelStyle;
use crate::vector::{bounds_of, project_rings};

/// Area-weighted planar centroid of the projected geometry.
///
/// Ring winding decides the sign of each ring's contribution, so holes wound
/// against their exterior subtract. Degenerate (zero-area) geometry falls
/// back to its bounding-box center; empty geometry has no centroid.
pub fn centroid<P: Projection + ?Sized>(geometry: &RegionGeometry, projection: &P) -> Option<Vec2> {
    let rings = project_rings(geometry, projection);
    if rings.iter().all(|r| r.is_empty()) {
        return None;
    }

    let (mut area2, mut cx, mut cy) = (0.0, 0.0, 0.0);
    for ring in &rings {
        let Some(&last) = ring.last() else {
            continue;
        };
        let mut prev = last;
        for &p in ring {
            let cross = prev.x * p.y - p.x * prev.y;
            area2 += cross;
            cx += (prev.x + p.x) * cross;
            cy += (prev.y + p.y) * cross;
            prev = p;
        }
    }

    if area2.abs() <= f64::EPSILON {
        return Some(bounds_of(geometry, projection).center());
    }
    Some(Vec2::new(cx / (3.0 * area2), cy / (3.0 * area2)))
}

/// At most one region name label, shown while its region is hovered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LabelLayer {
    shown: Option<(usize, NodeId)>,
}

impl LabelLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `text` for region `index` at `anchor`, replacing any previous
    /// label. Blank names produce no label.
    pub fn show(
        &mut self,
        surface: &mut Surface,
        index: usize,
        text: &str,
        anchor: Vec2,
        style: &LabelStyle,
    ) {
        self.clear(surface);
        let text = text.trim();
        if text.is_empty() || !anchor.is_finite() {
            return;
        }
        let id = surface.add(
            LayerKind::Labels,
            NodeKey::Label(index),
            Shape2D::text(anchor, text),
            Paint::fill(style.color.clone()).with_font_size(style.font_size_px),
        );
        self.shown = Some((index, id));
    }

    pub fn hide(&mut self, surface: &mut Surface) {
        self.clear(surface);
    }

    /// Region index of the visible label.
    pub fn shown(&self) -> Option<usize> {
        self.shown.map(|(index, _)| index)
    }
}

impl MapLayer for LabelLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Labels
    }

    fn clear(&mut self, surface: &mut Surface) {
        surface.clear_layer(self.kind());
        self.shown = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelLayer, centroid};
    use crate::symbology::LabelStyle;
    use formats::RegionGeometry;
    use foundation::math::{GeoPoint, Projection, Vec2};
    use scene::components::Shape2D;
    use scene::{LayerKind, Surface, Viewport};

    struct Plate;

    impl Projection for Plate {
        fn project(&self, p: GeoPoint) -> Vec2 {
            Vec2::new(p.lon_deg, p.lat_deg)
        }
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    fn ring(points: &[(f64, f64)]) -> Vec<GeoPoint> {
        points.iter().map(|&(x, y)| GeoPoint::new(x, y)).collect()
    }

    #[test]
    fn centroid_of_square_is_its_center() {
        let g = RegionGeometry::Polygon(vec![ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (0.0, 2.0),
            (0.0, 0.0),
        ])]);
        assert_close(centroid(&g, &Plate).unwrap(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn centroid_weights_multipolygon_parts_by_area() {
        let big = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        let small = ring(&[(10.0, 0.0), (11.0, 0.0), (11.0, 1.0), (10.0, 1.0), (10.0, 0.0)]);
        let g = RegionGeometry::MultiPolygon(vec![vec![big], vec![small]]);
        // Areas 4 and 1: x = (4 * 1 + 1 * 10.5) / 5.
        assert_close(centroid(&g, &Plate).unwrap(), Vec2::new(2.9, 0.9));
    }

    #[test]
    fn degenerate_and_empty_geometry() {
        let line = RegionGeometry::Polygon(vec![ring(&[(0.0, 0.0), (2.0, 2.0), (0.0, 0.0)])]);
        assert_close(centroid(&line, &Plate).unwrap(), Vec2::new(1.0, 1.0));
        assert_eq!(centroid(&RegionGeometry::Polygon(vec![]), &Plate), None);
    }

    #[test]
    fn only_one_label_at_a_time() {
        let mut surface = Surface::new(Viewport::new(10.0, 10.0));
        let mut labels = LabelLayer::new();
        let style = LabelStyle::default();
        labels.show(&mut surface, 0, "Seoul", Vec2::new(1.0, 1.0), &style);
        labels.show(&mut surface, 3, " Busan ", Vec2::new(2.0, 2.0), &style);
        assert_eq!(labels.shown(), Some(3));
        let texts: Vec<_> = surface
            .layer_nodes(LayerKind::Labels)
            .filter_map(|(_, n)| match &n.shape {
                Shape2D::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Busan".to_string()]);

        labels.show(&mut surface, 1, "  ", Vec2::new(2.0, 2.0), &style);
        assert_eq!(labels.shown(), None);
        assert!(surface.layer(LayerKind::Labels).is_empty());
    }
}
