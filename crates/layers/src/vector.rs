use formats::{BorderMesh, RegionFeature, RegionGeometry};
use foundation::bounds::Aabb2;
use foundation::math::{Projection, Vec2};
use scene::components::{Paint, PathShape, Shape2D, path_data};
use scene::{LayerKind, NodeId, NodeKey, RegionStates, Surface};

use crate::layer::MapLayer;
use crate::symbology::{BorderStyle, RegionStyle};

/// Every ring of `geometry` in device space.
pub fn project_rings<P: Projection + ?Sized>(
    geometry: &RegionGeometry,
    projection: &P,
) -> Vec<Vec<Vec2>> {
    geometry
        .rings()
        .map(|ring| ring.iter().map(|p| projection.project(*p)).collect())
        .collect()
}

/// SVG path data for `geometry` under `projection`.
pub fn path_for<P: Projection + ?Sized>(geometry: &RegionGeometry, projection: &P) -> String {
    path_data(&project_rings(geometry, projection), true)
}

/// Device-space bounding box of `geometry` under `projection`.
pub fn bounds_of<P: Projection + ?Sized>(geometry: &RegionGeometry, projection: &P) -> Aabb2 {
    Aabb2::from_points(
        geometry
            .rings()
            .flat_map(|ring| ring.iter().map(|p| projection.project(*p))),
    )
}

/// Bounding box of a whole feature collection; empty for no features.
pub fn collection_bounds<P: Projection + ?Sized>(
    features: &[RegionFeature],
    projection: &P,
) -> Aabb2 {
    features.iter().fold(Aabb2::empty(), |acc, f| {
        acc.union(&bounds_of(&f.geometry, projection))
    })
}

/// Region paths, one node per feature, indexed by feature index.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RegionLayer {
    nodes: Vec<NodeId>,
}

impl RegionLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the layer contents with one idle path per feature.
    pub fn draw<P: Projection + ?Sized>(
        &mut self,
        surface: &mut Surface,
        features: &[RegionFeature],
        projection: &P,
        style: &RegionStyle,
    ) {
        self.clear(surface);
        for (index, feature) in features.iter().enumerate() {
            let shape = PathShape::polygon(project_rings(&feature.geometry, projection));
            let id = surface.add(
                LayerKind::Regions,
                NodeKey::Region(index),
                Shape2D::Path(shape),
                Paint::fill(style.fill.clone()).interactive(),
            );
            self.nodes.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    /// Device-space (pre-view-transform) box of region `index`.
    pub fn bounds(&self, surface: &Surface, index: usize) -> Option<Aabb2> {
        let node = surface.node(self.node(index)?)?;
        match &node.shape {
            Shape2D::Path(path) => Some(path.bounds),
            _ => None,
        }
    }

    /// Sets every region fill from its interaction state.
    pub fn repaint(&self, surface: &mut Surface, states: &RegionStates, style: &RegionStyle) {
        for (index, id) in self.nodes.iter().enumerate() {
            if let Some(node) = surface.node_mut(*id) {
                node.paint.fill = Some(style.fill_for(states.state(index)).to_string());
            }
        }
    }
}

impl MapLayer for RegionLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Regions
    }

    fn clear(&mut self, surface: &mut Surface) {
        surface.clear_layer(self.kind());
        self.nodes.clear();
    }
}

/// The single interior-border path.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BorderLayer {
    node: Option<NodeId>,
}

impl BorderLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the layer contents with exactly one stroked path, empty when
    /// the mesh has no lines.
    pub fn draw<P: Projection + ?Sized>(
        &mut self,
        surface: &mut Surface,
        mesh: &BorderMesh,
        projection: &P,
        style: &BorderStyle,
    ) {
        self.clear(surface);
        let lines = mesh
            .lines
            .iter()
            .map(|line| line.iter().map(|p| projection.project(*p)).collect())
            .collect();
        self.node = Some(surface.add(
            LayerKind::Borders,
            NodeKey::Border,
            Shape2D::Path(PathShape::lines(lines)),
            Paint::stroke(style.stroke.clone()),
        ));
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Keeps borders one screen pixel wide at zoom `k`.
    pub fn apply_zoom(&self, surface: &mut Surface, k: f64) {
        surface.set_layer_stroke_width(self.kind(), Some(1.0 / k));
    }
}

impl MapLayer for BorderLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Borders
    }

    fn clear(&mut self, surface: &mut Surface) {
        surface.clear_layer(self.kind());
        self.node = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderLayer, RegionLayer, bounds_of, collection_bounds, path_for};
    use crate::symbology::{BorderStyle, RegionStyle};
    use formats::{BorderMesh, RegionFeature, RegionGeometry};
    use foundation::math::{GeoPoint, Projection, Vec2};
    use pretty_assertions::assert_eq;
    use scene::{LayerKind, RegionStates, Surface, Viewport};
    use serde_json::Map;

    /// Identity lon/lat → x/y for readable assertions.
    struct Plate;

    impl Projection for Plate {
        fn project(&self, p: GeoPoint) -> Vec2 {
            Vec2::new(p.lon_deg, p.lat_deg)
        }
    }

    fn square(x0: f64, y0: f64) -> RegionGeometry {
        RegionGeometry::Polygon(vec![vec![
            GeoPoint::new(x0, y0),
            GeoPoint::new(x0 + 1.0, y0),
            GeoPoint::new(x0 + 1.0, y0 + 1.0),
            GeoPoint::new(x0, y0 + 1.0),
            GeoPoint::new(x0, y0),
        ]])
    }

    fn feature(name: &str, geometry: RegionGeometry) -> RegionFeature {
        RegionFeature {
            name: name.to_string(),
            id: None,
            properties: Map::new(),
            geometry,
        }
    }

    #[test]
    fn path_and_bounds_follow_projection() {
        let g = square(2.0, 3.0);
        assert_eq!(path_for(&g, &Plate), "M2,3L3,3L3,4L2,4Z");
        let b = bounds_of(&g, &Plate);
        assert_eq!(b.min, Vec2::new(2.0, 3.0));
        assert_eq!(b.max, Vec2::new(3.0, 4.0));

        let fs = [feature("a", square(0.0, 0.0)), feature("b", square(4.0, 1.0))];
        let all = collection_bounds(&fs, &Plate);
        assert_eq!(all.min, Vec2::new(0.0, 0.0));
        assert_eq!(all.max, Vec2::new(5.0, 2.0));
        assert!(collection_bounds(&[], &Plate).is_empty());
    }

    #[test]
    fn redraw_replaces_region_nodes() {
        let mut surface = Surface::new(Viewport::new(10.0, 10.0));
        let mut regions = RegionLayer::new();
        let style = RegionStyle::default();
        let fs = [feature("a", square(0.0, 0.0)), feature("b", square(4.0, 1.0))];
        regions.draw(&mut surface, &fs, &Plate, &style);
        let stale = regions.node(0);
        assert_eq!(surface.layer(LayerKind::Regions).len(), 2);

        regions.draw(&mut surface, &fs[..1], &Plate, &style);
        assert_eq!(surface.layer(LayerKind::Regions).len(), 1);
        assert!(stale.and_then(|id| surface.node(id)).is_none());
        assert_eq!(regions.bounds(&surface, 0).map(|b| b.width()), Some(1.0));
    }

    #[test]
    fn repaint_uses_state_fill() {
        let mut surface = Surface::new(Viewport::new(10.0, 10.0));
        let mut regions = RegionLayer::new();
        let style = RegionStyle::default();
        let fs = [feature("a", square(0.0, 0.0)), feature("b", square(4.0, 1.0))];
        regions.draw(&mut surface, &fs, &Plate, &style);

        let mut states = RegionStates::new(2);
        states.select(1);
        regions.repaint(&mut surface, &states, &style);
        let fill = |i: usize| {
            regions
                .node(i)
                .and_then(|id| surface.node(id))
                .and_then(|n| n.paint.fill.clone())
        };
        assert_eq!(fill(0).as_deref(), Some("#e5e7eb"));
        assert_eq!(fill(1).as_deref(), Some("#93c5fd"));
    }

    #[test]
    fn border_layer_holds_exactly_one_path() {
        let mut surface = Surface::new(Viewport::new(10.0, 10.0));
        let mut borders = BorderLayer::new();
        let mesh = BorderMesh {
            lines: vec![vec![GeoPoint::new(1.0, 0.0), GeoPoint::new(1.0, 1.0)]],
        };
        borders.draw(&mut surface, &mesh, &Plate, &BorderStyle::default());
        borders.draw(&mut surface, &BorderMesh::default(), &Plate, &BorderStyle::default());
        assert_eq!(surface.layer(LayerKind::Borders).len(), 1);

        borders.apply_zoom(&mut surface, 4.0);
        assert_eq!(surface.layer(LayerKind::Borders).stroke_width, Some(0.25));
    }
}
