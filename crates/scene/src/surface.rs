use foundation::arena::Arena;

use crate::components::{Paint, Shape2D, ViewTransform};
use crate::node::{Node, NodeId, NodeKey};

/// Drawing layers, bottom to top.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Regions,
    Borders,
    Labels,
    Points,
}

impl LayerKind {
    pub const ALL: [LayerKind; 4] = [
        LayerKind::Regions,
        LayerKind::Borders,
        LayerKind::Labels,
        LayerKind::Points,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            LayerKind::Regions => "regions",
            LayerKind::Borders => "borders",
            LayerKind::Labels => "labels",
            LayerKind::Points => "points",
        }
    }

    fn slot(self) -> usize {
        match self {
            LayerKind::Regions => 0,
            LayerKind::Borders => 1,
            LayerKind::Labels => 2,
            LayerKind::Points => 3,
        }
    }
}

/// Pixel size of the drawing surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub transform: ViewTransform,
    /// Group-level stroke width, inherited by nodes without their own.
    pub stroke_width: Option<f64>,
    nodes: Vec<NodeId>,
}

impl Layer {
    fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            transform: ViewTransform::IDENTITY,
            stroke_width: None,
            nodes: Vec::new(),
        }
    }

    /// Node ids in draw order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Retained scene graph: four stacked layers of styled shapes over a fixed
/// viewport.
#[derive(Debug, Clone)]
pub struct Surface {
    viewport: Viewport,
    nodes: Arena<Node>,
    layers: [Layer; 4],
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            nodes: Arena::new(),
            layers: LayerKind::ALL.map(Layer::new),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.layers[kind.slot()]
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Appends a node on top of `layer`.
    pub fn add(&mut self, layer: LayerKind, key: NodeKey, shape: Shape2D, paint: Paint) -> NodeId {
        let id = NodeId(self.nodes.alloc(Node {
            layer,
            key,
            shape,
            paint,
        }));
        self.layers[layer.slot()].nodes.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(id.0)?;
        self.layers[node.layer.slot()].nodes.retain(|n| *n != id);
        Some(node)
    }

    /// Nodes of `layer` in draw order.
    pub fn layer_nodes(&self, layer: LayerKind) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.layer(layer)
            .nodes
            .iter()
            .filter_map(move |id| self.nodes.get(id.0).map(|n| (*id, n)))
    }

    pub fn clear_layer(&mut self, layer: LayerKind) {
        let ids = std::mem::take(&mut self.layers[layer.slot()].nodes);
        for id in ids {
            self.nodes.remove(id.0);
        }
    }

    /// Removes every node and resets layer state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.layers = LayerKind::ALL.map(Layer::new);
    }

    pub fn set_layer_transform(&mut self, layer: LayerKind, transform: ViewTransform) {
        self.layers[layer.slot()].transform = transform;
    }

    pub fn set_layer_stroke_width(&mut self, layer: LayerKind, width: Option<f64>) {
        self.layers[layer.slot()].stroke_width = width;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
