//! The map's render surface: the scene graph plus the four layer renderers.

use formats::{BorderMesh, RegionFeature};
use foundation::bounds::Aabb2;
use foundation::math::{Projection, Vec2};
use layers::{
    BorderLayer, LabelLayer, MapLayer, Marker, PointLayer, RegionLayer, Symbology, centroid,
};
use scene::components::ViewTransform;
use scene::{LayerKind, PickHit, PointStates, RegionStates, Surface, Viewport, pick};

use crate::options::Point;

/// Markers for `points` at their projected (not view-transformed) positions.
pub fn markers_for<P: Projection + ?Sized>(
    points: &[Point],
    projection: &P,
    symbology: &Symbology,
) -> Vec<Marker> {
    points
        .iter()
        .map(|p| Marker {
            position: projection.project(p.geo()),
            base_radius: p.radius.unwrap_or(symbology.point.base_radius),
            color: p.color.clone().unwrap_or_else(|| symbology.point.fill.clone()),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct MapSurface {
    surface: Surface,
    regions: RegionLayer,
    borders: BorderLayer,
    labels: LabelLayer,
    points: PointLayer,
    symbology: Symbology,
}

impl MapSurface {
    pub fn new(viewport: Viewport, symbology: Symbology) -> Self {
        Self {
            surface: Surface::new(viewport),
            regions: RegionLayer::new(),
            borders: BorderLayer::new(),
            labels: LabelLayer::new(),
            points: PointLayer::new(),
            symbology,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn symbology(&self) -> &Symbology {
        &self.symbology
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn regions(&self) -> &RegionLayer {
        &self.regions
    }

    pub fn points(&self) -> &PointLayer {
        &self.points
    }

    /// Redraws regions and the border mesh, then the current points, all
    /// under the current transform `t`.
    pub fn load<P: Projection + ?Sized>(
        &mut self,
        features: &[RegionFeature],
        mesh: &BorderMesh,
        projection: &P,
        points: &[Point],
        t: ViewTransform,
    ) {
        self.labels.clear(&mut self.surface);
        self.regions
            .draw(&mut self.surface, features, projection, &self.symbology.region);
        self.borders
            .draw(&mut self.surface, mesh, projection, &self.symbology.border);
        self.set_points(points, projection, t);
        self.apply_transform(t, &PointStates::new(points.len()));
    }

    /// Redraws only the point layer; every marker starts idle.
    pub fn set_points<P: Projection + ?Sized>(
        &mut self,
        points: &[Point],
        projection: &P,
        t: ViewTransform,
    ) {
        let markers = markers_for(points, projection, &self.symbology);
        self.points
            .draw(&mut self.surface, markers, t.k, &self.symbology.point);
    }

    /// Sets `t` on all four layers, counter-scaling border width and point
    /// radii.
    pub fn apply_transform(&mut self, t: ViewTransform, point_states: &PointStates) {
        for kind in LayerKind::ALL {
            self.surface.set_layer_transform(kind, t);
        }
        self.borders.apply_zoom(&mut self.surface, t.k);
        self.points
            .rescale(&mut self.surface, t.k, point_states, &self.symbology.point);
    }

    pub fn paint_regions(&mut self, states: &RegionStates) {
        self.regions
            .repaint(&mut self.surface, states, &self.symbology.region);
    }

    pub fn set_point_hovered(&mut self, index: usize, hovered: bool, k: f64) {
        self.points
            .set_hovered(&mut self.surface, index, hovered, k, &self.symbology.point);
    }

    /// Shows the name label at the centroid of `feature`.
    pub fn show_label<P: Projection + ?Sized>(
        &mut self,
        index: usize,
        feature: &RegionFeature,
        projection: &P,
    ) {
        let Some(anchor) = centroid(&feature.geometry, projection) else {
            self.labels.hide(&mut self.surface);
            return;
        };
        self.labels.show(
            &mut self.surface,
            index,
            &feature.name,
            anchor,
            &self.symbology.label,
        );
    }

    pub fn hide_label(&mut self) {
        self.labels.hide(&mut self.surface);
    }

    pub fn label_shown(&self) -> Option<usize> {
        self.labels.shown()
    }

    pub fn region_bounds(&self, index: usize) -> Option<Aabb2> {
        self.regions.bounds(&self.surface, index)
    }

    pub fn pick(&self, screen: Vec2) -> Option<PickHit> {
        pick(&self.surface, screen)
    }

    /// Removes every node; safe to call repeatedly.
    pub fn destroy(&mut self) {
        self.regions.clear(&mut self.surface);
        self.borders.clear(&mut self.surface);
        self.labels.clear(&mut self.surface);
        self.points.clear(&mut self.surface);
        self.surface.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{MapSurface, markers_for};
    use crate::options::Point;
    use formats::{BorderMesh, RegionFeature, RegionGeometry};
    use foundation::math::{GeoPoint, Projection, Vec2};
    use layers::Symbology;
    use scene::components::{Shape2D, ViewTransform};
    use scene::{LayerKind, PointStates, Viewport};
    use serde_json::Map;

    struct Plate;

    impl Projection for Plate {
        fn project(&self, p: GeoPoint) -> Vec2 {
            Vec2::new(p.lon_deg * 10.0, p.lat_deg * 10.0)
        }
    }

    fn feature(name: &str, x0: f64) -> RegionFeature {
        let ring = [(x0, 0.0), (x0 + 1.0, 0.0), (x0 + 1.0, 1.0), (x0, 1.0), (x0, 0.0)]
            .iter()
            .map(|&(lon, lat)| GeoPoint::new(lon, lat))
            .collect();
        RegionFeature {
            name: name.to_string(),
            id: None,
            properties: Map::new(),
            geometry: RegionGeometry::Polygon(vec![ring]),
        }
    }

    fn surface() -> MapSurface {
        MapSurface::new(Viewport::new(100.0, 100.0), Symbology::default())
    }

    #[test]
    fn markers_use_point_overrides() {
        let s = Symbology::default();
        let points = vec![
            Point::new("a", 1.0, 2.0),
            Point::new("b", 3.0, 4.0).with_radius(7.0).with_color("#123456"),
        ];
        let m = markers_for(&points, &Plate, &s);
        assert_eq!(m[0].position, Vec2::new(10.0, 20.0));
        assert_eq!(m[0].base_radius, 3.0);
        assert_eq!(m[0].color, "#3b82f6");
        assert_eq!(m[1].base_radius, 7.0);
        assert_eq!(m[1].color, "#123456");
    }

    #[test]
    fn load_replaces_regions_and_keeps_points() {
        let mut r = surface();
        let points = vec![Point::new("p", 0.5, 0.5)];
        let fs = vec![feature("a", 0.0), feature("b", 1.0)];
        r.load(&fs, &BorderMesh::default(), &Plate, &points, ViewTransform::IDENTITY);
        r.load(&fs[..1], &BorderMesh::default(), &Plate, &points, ViewTransform::IDENTITY);

        let s = r.surface();
        assert_eq!(s.layer(LayerKind::Regions).len(), 1);
        assert_eq!(s.layer(LayerKind::Borders).len(), 1);
        assert_eq!(s.layer(LayerKind::Points).len(), 1);
    }

    #[test]
    fn transform_applies_to_all_layers() {
        let mut r = surface();
        let points = vec![Point::new("p", 0.5, 0.5)];
        let fs = [feature("a", 0.0)];
        r.load(&fs, &BorderMesh::default(), &Plate, &points, ViewTransform::IDENTITY);
        let t = ViewTransform::new(5.0, 5.0, 2.0);
        r.apply_transform(t, &PointStates::new(1));

        for layer in r.surface().layers() {
            assert_eq!(layer.transform, t);
        }
        assert_eq!(r.surface().layer(LayerKind::Borders).stroke_width, Some(0.5));
        let radius = r
            .points()
            .node(0)
            .and_then(|id| r.surface().node(id))
            .map(|n| match n.shape {
                Shape2D::Circle { radius, .. } => radius,
                _ => f64::NAN,
            });
        assert_eq!(radius, Some(1.5));
    }

    #[test]
    fn labels_and_destroy() {
        let mut r = surface();
        let fs = vec![feature("Jongno-gu", 0.0)];
        r.load(&fs, &BorderMesh::default(), &Plate, &[], ViewTransform::IDENTITY);
        r.show_label(0, &fs[0], &Plate);
        assert_eq!(r.label_shown(), Some(0));
        r.hide_label();
        assert_eq!(r.label_shown(), None);

        r.destroy();
        r.destroy();
        assert_eq!(r.surface().node_count(), 0);
        assert_eq!(r.region_count(), 0);
    }
}
