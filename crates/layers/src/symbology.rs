use scene::RegionState;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionStyle {
    pub fill: String,
    pub hover_fill: String,
    pub selected_fill: String,
}

impl RegionStyle {
    pub fn fill_for(&self, state: RegionState) -> &str {
        match state {
            RegionState::Idle => &self.fill,
            RegionState::Hovered => &self.hover_fill,
            RegionState::Selected => &self.selected_fill,
        }
    }
}

impl Default for RegionStyle {
    fn default() -> Self {
        Self {
            fill: "#e5e7eb".to_string(),
            hover_fill: "#d1d5db".to_string(),
            selected_fill: "#93c5fd".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorderStyle {
    pub stroke: String,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            stroke: "#6b7280".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointStyle {
    /// Fill for points without their own color.
    pub fill: String,
    pub hover_fill: String,
    /// Radius for points without their own radius.
    pub base_radius: f64,
    pub hover_scale: f64,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            fill: "#3b82f6".to_string(),
            hover_fill: "#ef4444".to_string(),
            base_radius: 3.0,
            hover_scale: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub color: String,
    pub font_size_px: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: "#374151".to_string(),
            font_size_px: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipStyle {
    pub background: String,
    pub text: String,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background: "rgba(0, 0, 0, 0.8)".to_string(),
            text: "#ffffff".to_string(),
        }
    }
}

/// Every color and size the map draws with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Symbology {
    pub region: RegionStyle,
    pub border: BorderStyle,
    pub point: PointStyle,
    pub label: LabelStyle,
    pub tooltip: TooltipStyle,
}
