use scene::{LayerKind, Surface};

/// A renderer that owns the nodes of one surface layer.
pub trait MapLayer {
    fn kind(&self) -> LayerKind;

    /// Removes this layer's nodes from `surface` and forgets them.
    fn clear(&mut self, surface: &mut Surface);
}
