use formats::{RegionFeature, Topology, decode_border_mesh, decode_object};
use foundation::math::{Mercator, Vec2};
use foundation::time::Time;
use runtime::{EventBus, Frame};
use scene::components::ViewTransform;
use scene::{PointState, PointStates, RegionState, RegionStates, Surface, Viewport};
use tracing::{debug, info};

use crate::error::MapError;
use crate::events::MapEvent;
use crate::fit::resolve_projection;
use crate::interaction::Target;
use crate::options::{Container, MapCallbacks, MapOptions, Point, validate_points};
use crate::render::MapSurface;
use crate::tooltip::Tooltip;
use crate::transform_stack::TransformStack;

/// An interactive choropleth map over one topology object plus a point set.
///
/// Driven from a single thread: pointer events, gestures and animation frames
/// all go through `&mut self`.
#[derive(Debug)]
pub struct ChoroplethMap {
    pub(crate) container_id: String,
    pub(crate) viewport: Viewport,
    pub(crate) options: MapOptions,
    pub(crate) callbacks: MapCallbacks,
    pub(crate) projection: Mercator,
    pub(crate) render: MapSurface,
    pub(crate) transforms: TransformStack,
    pub(crate) features: Vec<RegionFeature>,
    pub(crate) points: Vec<Point>,
    pub(crate) regions: RegionStates,
    pub(crate) point_states: PointStates,
    pub(crate) tooltip: Tooltip,
    /// Element under the pointer, for position-level dispatch.
    pub(crate) hovered: Target,
    pub(crate) events: EventBus<MapEvent>,
    pub(crate) frame: Option<Frame>,
    pub(crate) destroyed: bool,
}

impl ChoroplethMap {
    pub fn new(
        container: &Container,
        options: MapOptions,
        callbacks: MapCallbacks,
    ) -> Result<Self, MapError> {
        if container.id.trim().is_empty() {
            return Err(MapError::MissingMountPoint);
        }
        let viewport = options.viewport(container);
        if !viewport.is_valid() {
            return Err(MapError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        options.validate()?;
        validate_points(&options.points)?;

        let projection = resolve_projection(&options, &[], viewport);
        let mut render = MapSurface::new(viewport, options.symbology());
        let points = options.points.clone();
        render.set_points(&points, &projection, ViewTransform::IDENTITY);
        let transforms = TransformStack::new(viewport, options.zoom);

        debug!(
            container = %container.id,
            width = viewport.width,
            height = viewport.height,
            fixed = options.scale.is_some(),
            "map created"
        );
        Ok(Self {
            container_id: container.id.clone(),
            viewport,
            options,
            callbacks,
            projection,
            render,
            transforms,
            features: Vec::new(),
            point_states: PointStates::new(points.len()),
            points,
            regions: RegionStates::default(),
            tooltip: Tooltip::default(),
            hovered: Target::Background,
            events: EventBus::new(),
            frame: None,
            destroyed: false,
        })
    }

    /// Decodes `object_name` and redraws regions, borders and points.
    ///
    /// An unknown object name or an empty collection loads zero regions; a
    /// topology without any objects is an error.
    pub fn load_topology(
        &mut self,
        topology: &Topology,
        object_name: &str,
    ) -> Result<(), MapError> {
        if self.destroyed {
            debug!(op = "load_topology", "ignored on destroyed map");
            return Ok(());
        }
        topology.validate()?;

        let decoded = decode_object(topology, object_name, &self.options.name_property);
        if decoded.skipped > 0 {
            debug!(
                object = object_name,
                skipped = decoded.skipped,
                "skipped non-polygonal geometries"
            );
        }
        let mesh = decode_border_mesh(topology, object_name);

        self.features = decoded.features;
        self.projection = resolve_projection(&self.options, &self.features, self.viewport);
        self.regions.reset(self.features.len());
        self.point_states.reset(self.points.len());
        self.hovered = Target::Background;
        self.hide_tooltip();
        // A zoom toward a region of the previous dataset has no target now.
        self.transforms.cancel();
        self.render.load(
            &self.features,
            &mesh,
            &self.projection,
            &self.points,
            self.transforms.current(),
        );

        info!(
            container = %self.container_id,
            object = object_name,
            regions = self.features.len(),
            border_lines = mesh.lines.len(),
            scale = self.projection.scale,
            translate_x = self.projection.translate.x,
            translate_y = self.projection.translate.y,
            "topology loaded"
        );
        self.events.emit(MapEvent::TopologyLoaded {
            object: object_name.to_string(),
            regions: self.features.len(),
        });
        Ok(())
    }

    /// Replaces the point set. An invalid coordinate rejects the whole set and
    /// keeps the previous points.
    pub fn set_points(&mut self, points: Vec<Point>) -> Result<(), MapError> {
        if self.destroyed {
            debug!(op = "set_points", "ignored on destroyed map");
            return Ok(());
        }
        validate_points(&points)?;

        self.points = points;
        self.point_states.reset(self.points.len());
        if matches!(self.hovered, Target::Point(_)) {
            self.hovered = Target::Background;
        }
        self.hide_tooltip();
        self.render
            .set_points(&self.points, &self.projection, self.transforms.current());

        debug!(count = self.points.len(), "points replaced");
        self.events.emit(MapEvent::PointsReplaced {
            count: self.points.len(),
        });
        Ok(())
    }

    /// Removes every element and drops the callbacks. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.render.destroy();
        self.transforms.cancel();
        self.tooltip.hide();
        self.callbacks = MapCallbacks::default();
        self.features.clear();
        self.points.clear();
        self.regions.reset(0);
        self.point_states.reset(0);
        self.hovered = Target::Background;
        self.destroyed = true;
        debug!(container = %self.container_id, "map destroyed");
    }

    /// Replaces the view transform (pan/zoom gesture), cancelling any
    /// animation.
    pub fn apply_gesture(&mut self, raw: ViewTransform) {
        if self.destroyed {
            return;
        }
        let t = self.transforms.apply_gesture(raw);
        self.transform_changed(t);
    }

    pub fn zoom_by(&mut self, factor: f64, anchor: Vec2) {
        if self.destroyed || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let t = self.transforms.zoom_by(factor, anchor);
        self.transform_changed(t);
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        if self.destroyed || !delta.is_finite() {
            return;
        }
        let t = self.transforms.pan_by(delta);
        self.transform_changed(t);
    }

    /// Advances the animation to `now`.
    pub fn tick(&mut self, now: Time) {
        if self.destroyed {
            return;
        }
        if let Some(t) = self.transforms.tick(now) {
            self.transform_changed(t);
        }
    }

    pub fn on_frame(&mut self, frame: Frame) {
        self.frame = Some(frame);
        self.tick(frame.time);
    }

    /// Finishes any animation in flight immediately.
    pub fn settle(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(t) = self.transforms.settle() {
            self.transform_changed(t);
        }
    }

    pub(crate) fn transform_changed(&mut self, t: ViewTransform) {
        self.render.apply_transform(t, &self.point_states);
        self.events.emit(MapEvent::TransformChanged(t));
    }

    pub(crate) fn hide_tooltip(&mut self) {
        if self.tooltip.hide() {
            self.events.emit(MapEvent::TooltipHidden);
        }
    }

    pub fn surface(&self) -> &Surface {
        self.render.surface()
    }

    pub fn render_surface(&self) -> &MapSurface {
        &self.render
    }

    pub fn view_transform(&self) -> ViewTransform {
        self.transforms.current()
    }

    pub fn is_animating(&self) -> bool {
        self.transforms.is_animating()
    }

    pub fn projection(&self) -> Mercator {
        self.projection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn features(&self) -> &[RegionFeature] {
        &self.features
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn tooltip_html(&self) -> Option<String> {
        self.tooltip.to_html(&self.render.symbology().tooltip)
    }

    /// Name of the selected region.
    pub fn selected_region(&self) -> Option<&str> {
        let index = self.regions.selected()?;
        self.features.get(index).map(|f| f.name.as_str())
    }

    pub fn region_state(&self, index: usize) -> RegionState {
        self.regions.state(index)
    }

    pub fn point_state(&self, index: usize) -> PointState {
        self.point_states.state(index)
    }

    /// Index of the first region named `name`.
    pub fn region_index(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|f| f.name == name)
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.frame
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        self.events.drain()
    }

    pub fn to_svg(&self) -> String {
        self.render.surface().to_svg()
    }
}
