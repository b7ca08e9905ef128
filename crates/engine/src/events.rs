use scene::components::ViewTransform;

/// Change notifications recorded for the host to drain.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    TopologyLoaded { object: String, regions: usize },
    PointsReplaced { count: usize },
    RegionSelected { index: usize, name: String },
    SelectionReset,
    TransformChanged(ViewTransform),
    TooltipShown { point: usize },
    TooltipHidden,
}
