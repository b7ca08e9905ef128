use foundation::math::Vec2;

use crate::node::{NodeId, NodeKey};
use crate::surface::Surface;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    pub key: NodeKey,
    /// Hit position in the owning layer's local coordinates.
    pub local: Vec2,
}

/// Screen-space picking over interactive nodes.
///
/// Ordering contract:
/// - Layers are searched top to bottom, so a point marker shadows the region
///   beneath it.
/// - Within a layer the most recently drawn node wins.
///
/// Notes:
/// - Each layer's own view transform is inverted before testing its shapes.
/// - Nodes whose paint is not `interactive` never produce a hit.
pub fn pick(surface: &Surface, screen: Vec2) -> Option<PickHit> {
    if !screen.is_finite() {
        return None;
    }
    for layer in surface.layers().iter().rev() {
        let local = layer.transform.invert(screen);
        for id in layer.nodes().iter().rev() {
            let Some(node) = surface.node(*id) else {
                continue;
            };
            if node.paint.interactive && node.shape.contains(local) {
                return Some(PickHit {
                    node: *id,
                    key: node.key,
                    local,
                });
            }
        }
    }
    None
}
