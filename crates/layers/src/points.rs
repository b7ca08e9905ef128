use foundation::math::Vec2;
use scene::components::{Paint, Shape2D};
use scene::{LayerKind, NodeId, NodeKey, PointStates, Surface};

use crate::layer::MapLayer;
use crate::symbology::PointStyle;

/// A point marker in device (pre-view-transform) space.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Vec2,
    pub base_radius: f64,
    /// The marker's own idle color.
    pub color: String,
}

/// Local radius that keeps a marker `base_radius` screen pixels wide under
/// zoom `k`, enlarged by `hover_scale` while hovered.
pub fn marker_radius(base_radius: f64, k: f64, hovered: bool, hover_scale: f64) -> f64 {
    let r = base_radius / k;
    if hovered { r * hover_scale } else { r }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointLayer {
    markers: Vec<(NodeId, Marker)>,
}

impl PointLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every marker; all start idle.
    pub fn draw(
        &mut self,
        surface: &mut Surface,
        markers: Vec<Marker>,
        k: f64,
        style: &PointStyle,
    ) {
        self.clear(surface);
        for (index, marker) in markers.into_iter().enumerate() {
            let radius = marker_radius(marker.base_radius, k, false, style.hover_scale);
            let id = surface.add(
                LayerKind::Points,
                NodeKey::Point(index),
                Shape2D::circle(marker.position, radius),
                Paint::fill(marker.color.clone()).interactive(),
            );
            self.markers.push((id, marker));
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<NodeId> {
        self.markers.get(index).map(|(id, _)| *id)
    }

    pub fn marker(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index).map(|(_, m)| m)
    }

    /// Recolors and resizes marker `index` for its hover state.
    pub fn set_hovered(
        &self,
        surface: &mut Surface,
        index: usize,
        hovered: bool,
        k: f64,
        style: &PointStyle,
    ) {
        let Some((id, marker)) = self.markers.get(index) else {
            return;
        };
        let Some(node) = surface.node_mut(*id) else {
            return;
        };
        let fill = if hovered { &style.hover_fill } else { &marker.color };
        node.paint.fill = Some(fill.clone());
        node.shape = Shape2D::circle(
            marker.position,
            marker_radius(marker.base_radius, k, hovered, style.hover_scale),
        );
    }

    /// Recomputes every radius for zoom `k`, keeping hover enlargement.
    pub fn rescale(&self, surface: &mut Surface, k: f64, states: &PointStates, style: &PointStyle) {
        for (index, (id, marker)) in self.markers.iter().enumerate() {
            if let Some(node) = surface.node_mut(*id) {
                let hovered = states.is_hovered(index);
                node.shape = Shape2D::circle(
                    marker.position,
                    marker_radius(marker.base_radius, k, hovered, style.hover_scale),
                );
            }
        }
    }
}

impl MapLayer for PointLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Points
    }

    fn clear(&mut self, surface: &mut Surface) {
        surface.clear_layer(self.kind());
        self.markers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{Marker, PointLayer, marker_radius};
    use crate::symbology::PointStyle;
    use foundation::math::Vec2;
    use scene::components::Shape2D;
    use scene::{LayerKind, PointStates, Surface, Viewport};

    fn marker(x: f64, color: &str) -> Marker {
        Marker {
            position: Vec2::new(x, 5.0),
            base_radius: 4.0,
            color: color.to_string(),
        }
    }

    fn radius(surface: &Surface, layer: &PointLayer, index: usize) -> Option<f64> {
        let node = surface.node(layer.node(index)?)?;
        match node.shape {
            Shape2D::Circle { radius, .. } => Some(radius),
            _ => None,
        }
    }

    #[test]
    fn radius_counter_scales_zoom() {
        assert_eq!(marker_radius(4.0, 1.0, false, 1.5), 4.0);
        assert_eq!(marker_radius(4.0, 2.0, false, 1.5), 2.0);
        assert_eq!(marker_radius(4.0, 2.0, true, 1.5), 3.0);
    }

    #[test]
    fn hover_recolors_and_leave_restores_own_color() {
        let mut surface = Surface::new(Viewport::new(10.0, 10.0));
        let mut layer = PointLayer::new();
        let style = PointStyle::default();
        layer.draw(&mut surface, vec![marker(1.0, "#10b981")], 1.0, &style);

        layer.set_hovered(&mut surface, 0, true, 1.0, &style);
        let fill = |s: &Surface| {
            layer
                .node(0)
                .and_then(|id| s.node(id))
                .and_then(|n| n.paint.fill.clone())
        };
        assert_eq!(fill(&surface).as_deref(), Some("#ef4444"));
        assert_eq!(radius(&surface, &layer, 0), Some(6.0));

        layer.set_hovered(&mut surface, 0, false, 1.0, &style);
        assert_eq!(fill(&surface).as_deref(), Some("#10b981"));
        assert_eq!(radius(&surface, &layer, 0), Some(4.0));
    }

    #[test]
    fn redraw_and_rescale() {
        let mut surface = Surface::new(Viewport::new(10.0, 10.0));
        let mut layer = PointLayer::new();
        let style = PointStyle::default();
        layer.draw(&mut surface, vec![marker(1.0, "#000"), marker(2.0, "#111")], 1.0, &style);
        assert_eq!(surface.layer(LayerKind::Points).len(), 2);

        let mut states = PointStates::new(2);
        states.hover(1);
        layer.rescale(&mut surface, 4.0, &states, &style);
        assert_eq!(radius(&surface, &layer, 0), Some(1.0));
        assert_eq!(radius(&surface, &layer, 1), Some(1.5));

        layer.draw(&mut surface, Vec::new(), 4.0, &style);
        assert!(surface.layer(LayerKind::Points).is_empty());
        assert!(layer.is_empty());
    }
}
