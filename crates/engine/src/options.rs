use std::fmt;

use foundation::math::GeoPoint;
use layers::{BorderStyle, LabelStyle, PointStyle, RegionStyle, Symbology, TooltipStyle};
use scene::Viewport;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::tooltip::TooltipContent;

/// The host element the map mounts under, with its measured size.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

impl Container {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// A caller-supplied point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// `(lon, lat)` in degrees.
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Point {
    pub fn new(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            region: String::new(),
            location: String::new(),
            kind: String::new(),
            coordinates: [lon, lat],
            radius: None,
            color: None,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn geo(&self) -> GeoPoint {
        GeoPoint::new(self.coordinates[0], self.coordinates[1])
    }
}

/// Rejects the whole set on the first point with unusable coordinates.
pub fn validate_points(points: &[Point]) -> Result<(), MapError> {
    match points.iter().position(|p| !p.geo().is_valid()) {
        Some(index) => Err(MapError::InvalidPoint {
            index,
            lon: points[index].coordinates[0],
            lat: points[index].coordinates[1],
        }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorOptions {
    pub region: String,
    pub region_hover: String,
    pub selected: String,
    pub point: String,
    pub point_hover: String,
    pub border: String,
    pub label: String,
    pub tooltip_background: String,
    pub tooltip_text: String,
}

impl Default for ColorOptions {
    fn default() -> Self {
        let s = Symbology::default();
        Self {
            region: s.region.fill,
            region_hover: s.region.hover_fill,
            selected: s.region.selected_fill,
            point: s.point.fill,
            point_hover: s.point.hover_fill,
            border: s.border.stroke,
            label: s.label.color,
            tooltip_background: s.tooltip.background,
            tooltip_text: s.tooltip.text,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomOptions {
    pub k_min: f64,
    pub k_max: f64,
    /// Upper bound on the zoom-to-region scale.
    pub max_region_scale: f64,
    pub duration_ms: f64,
}

impl ZoomOptions {
    pub fn validate(&self) -> Result<(), MapError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let ok = positive(self.k_min)
            && positive(self.k_max)
            && self.k_min <= self.k_max
            && positive(self.max_region_scale)
            && self.duration_ms.is_finite()
            && self.duration_ms >= 0.0;
        if ok {
            Ok(())
        } else {
            Err(MapError::InvalidZoom {
                k_min: self.k_min,
                k_max: self.k_max,
                max_region_scale: self.max_region_scale,
                duration_ms: self.duration_ms,
            })
        }
    }
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            k_min: 0.3,
            k_max: 10.0,
            max_region_scale: 8.0,
            duration_ms: 750.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Fixed-mode projection center `(lon, lat)`.
    pub center: Option<[f64; 2]>,
    /// Present ⇒ fixed projection; absent ⇒ fit to the loaded features.
    pub scale: Option<f64>,
    pub points: Vec<Point>,
    pub colors: ColorOptions,
    pub zoom: ZoomOptions,
    pub show_labels: bool,
    pub name_property: String,
    pub margin_factor: f64,
    pub point_radius: f64,
    pub point_hover_scale: f64,
    pub label_font_size: f64,
    pub tooltip_offset: [f64; 2],
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            center: None,
            scale: None,
            points: Vec::new(),
            colors: ColorOptions::default(),
            zoom: ZoomOptions::default(),
            show_labels: false,
            name_property: "name".to_string(),
            margin_factor: 0.9,
            point_radius: 3.0,
            point_hover_scale: 1.5,
            label_font_size: 12.0,
            tooltip_offset: [15.0, -15.0],
        }
    }
}

impl MapOptions {
    /// Rejects zoom and tuning values that would break the projection or the
    /// transform clamp. Points are checked separately by [`validate_points`].
    pub fn validate(&self) -> Result<(), MapError> {
        self.zoom.validate()?;
        let mut checks = vec![
            ("marginFactor", self.margin_factor),
            ("pointRadius", self.point_radius),
            ("pointHoverScale", self.point_hover_scale),
        ];
        if let Some(scale) = self.scale {
            checks.push(("scale", scale));
        }
        match checks
            .into_iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
        {
            Some((name, value)) => Err(MapError::InvalidOption { name, value }),
            None => Ok(()),
        }
    }

    /// Explicit size, falling back to the container's measured size per axis.
    pub fn viewport(&self, container: &Container) -> Viewport {
        Viewport::new(
            self.width.unwrap_or(container.width),
            self.height.unwrap_or(container.height),
        )
    }

    pub fn center(&self) -> GeoPoint {
        self.center
            .map(|[lon, lat]| GeoPoint::new(lon, lat))
            .unwrap_or_default()
    }

    pub fn symbology(&self) -> Symbology {
        let c = &self.colors;
        Symbology {
            region: RegionStyle {
                fill: c.region.clone(),
                hover_fill: c.region_hover.clone(),
                selected_fill: c.selected.clone(),
            },
            border: BorderStyle {
                stroke: c.border.clone(),
            },
            point: PointStyle {
                fill: c.point.clone(),
                hover_fill: c.point_hover.clone(),
                base_radius: self.point_radius,
                hover_scale: self.point_hover_scale,
            },
            label: LabelStyle {
                color: c.label.clone(),
                font_size_px: self.label_font_size,
            },
            tooltip: TooltipStyle {
                background: c.tooltip_background.clone(),
                text: c.tooltip_text.clone(),
            },
        }
    }
}

pub type RegionClickFn = Box<dyn FnMut(&str)>;
pub type TooltipRendererFn = Box<dyn Fn(&Point) -> TooltipContent>;

/// Host callbacks. Dropped when the map is destroyed.
#[derive(Default)]
pub struct MapCallbacks {
    /// Called with the region name on selection and with `""` on reset.
    pub on_region_click: Option<RegionClickFn>,
    /// Replaces the built-in tooltip formatter.
    pub tooltip_renderer: Option<TooltipRendererFn>,
}

impl MapCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region_click(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_region_click = Some(Box::new(f));
        self
    }

    pub fn with_tooltip_renderer(mut self, f: impl Fn(&Point) -> TooltipContent + 'static) -> Self {
        self.tooltip_renderer = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for MapCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapCallbacks")
            .field("on_region_click", &self.on_region_click.is_some())
            .field("tooltip_renderer", &self.tooltip_renderer.is_some())
            .finish()
    }
}
