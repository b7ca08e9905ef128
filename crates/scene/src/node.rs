use foundation::handles::Handle;

use crate::components::{Paint, Shape2D};
use crate::surface::LayerKind;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(pub Handle);

impl NodeId {
    pub fn index(&self) -> u32 {
        self.0.index()
    }
}

/// The datum a node was drawn from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// Index into the loaded region features.
    Region(usize),
    Border,
    /// Label of the region with this feature index.
    Label(usize),
    /// Index into the current point set.
    Point(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub layer: LayerKind,
    pub key: NodeKey,
    pub shape: Shape2D,
    pub paint: Paint,
}
