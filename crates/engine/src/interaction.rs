//! Pointer events → region/point state transitions.

use foundation::math::Vec2;
use scene::NodeKey;
use tracing::debug;

use crate::events::MapEvent;
use crate::map::ChoroplethMap;
use crate::tooltip::default_tooltip;

/// The element a pointer event is aimed at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Region(usize),
    Point(usize),
    /// Empty map area (no region or point under the pointer).
    Background,
}

/// Pointer event kinds; positions are screen coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEventKind {
    Enter { at: Vec2 },
    Move { at: Vec2 },
    Leave,
    Click,
}

impl ChoroplethMap {
    /// Element-level entry point for hosts that do their own hit testing.
    pub fn dispatch(&mut self, target: Target, event: PointerEventKind) {
        if self.destroyed {
            return;
        }
        match (target, event) {
            (Target::Region(i), PointerEventKind::Enter { .. }) => self.region_enter(i),
            (Target::Region(i), PointerEventKind::Leave) => self.region_leave(i),
            (Target::Region(i), PointerEventKind::Click) => self.select_region(i),
            (Target::Point(i), PointerEventKind::Enter { at }) => self.point_enter(i, at),
            (Target::Point(i), PointerEventKind::Move { at }) => self.point_move(i, at),
            (Target::Point(i), PointerEventKind::Leave) => self.point_leave(i),
            (Target::Background, PointerEventKind::Click) => self.reset_selection(),
            // Region moves, point clicks and background hover change nothing.
            _ => {}
        }
    }

    /// Element under the screen position `at`; points win over regions.
    pub fn hit_test(&self, at: Vec2) -> Target {
        match self.render.pick(at).map(|hit| hit.key) {
            Some(NodeKey::Region(i)) => Target::Region(i),
            Some(NodeKey::Point(i)) => Target::Point(i),
            _ => Target::Background,
        }
    }

    /// Position-level move: synthesizes leave/enter when the element under
    /// the pointer changes, a move otherwise.
    pub fn pointer_move(&mut self, at: Vec2) {
        if self.destroyed {
            return;
        }
        let target = self.hit_test(at);
        if target == self.hovered {
            self.dispatch(target, PointerEventKind::Move { at });
            return;
        }
        let previous = std::mem::replace(&mut self.hovered, target);
        self.dispatch(previous, PointerEventKind::Leave);
        self.dispatch(target, PointerEventKind::Enter { at });
    }

    /// The pointer left the map.
    pub fn pointer_leave(&mut self) {
        if self.destroyed {
            return;
        }
        let previous = std::mem::replace(&mut self.hovered, Target::Background);
        self.dispatch(previous, PointerEventKind::Leave);
    }

    pub fn click(&mut self, at: Vec2) {
        if self.destroyed {
            return;
        }
        let target = self.hit_test(at);
        self.dispatch(target, PointerEventKind::Click);
    }

    fn region_enter(&mut self, index: usize) {
        if !self.regions.hover(index) {
            return;
        }
        self.render.paint_regions(&self.regions);
        if self.options.show_labels
            && let Some(feature) = self.features.get(index)
        {
            self.render.show_label(index, feature, &self.projection);
        }
        debug!(region = index, "region hovered");
    }

    fn region_leave(&mut self, index: usize) {
        if self.regions.unhover(index) {
            self.render.paint_regions(&self.regions);
        }
        if self.render.label_shown() == Some(index) {
            self.render.hide_label();
        }
    }

    /// Selects region `index`, notifies the host and zooms to its bounds.
    pub fn select_region(&mut self, index: usize) {
        if self.destroyed || !self.regions.select(index) {
            return;
        }
        self.render.paint_regions(&self.regions);

        let name = self
            .features
            .get(index)
            .map(|f| f.name.clone())
            .unwrap_or_default();
        debug!(region = index, name = %name, "region selected");
        if let Some(on_click) = self.callbacks.on_region_click.as_mut() {
            on_click(&name);
        }
        if let Some(bounds) = self.render.region_bounds(index) {
            let target = self.transforms.region_target(bounds);
            self.transforms.animate_to(target);
        }
        self.events.emit(MapEvent::RegionSelected { index, name });
    }

    /// Clears selection and label, notifies the host with `""` and animates
    /// back to the identity transform.
    pub fn reset_selection(&mut self) {
        if self.destroyed {
            return;
        }
        self.regions.clear();
        self.render.paint_regions(&self.regions);
        self.render.hide_label();
        debug!("selection reset");
        if let Some(on_click) = self.callbacks.on_region_click.as_mut() {
            on_click("");
        }
        let target = self.transforms.reset_target();
        self.transforms.animate_to(target);
        self.events.emit(MapEvent::SelectionReset);
    }

    fn point_enter(&mut self, index: usize, at: Vec2) {
        let Some(point) = self.points.get(index) else {
            return;
        };
        if !self.point_states.hover(index) {
            return;
        }
        let content = match self.callbacks.tooltip_renderer.as_ref() {
            Some(render) => render(point),
            None => default_tooltip(point),
        };
        let k = self.transforms.current().k;
        let offset = self.tooltip_offset();
        self.render.set_point_hovered(index, true, k);
        self.tooltip.show(index, content, at, offset);
        debug!(point = index, "point hovered");
        self.events.emit(MapEvent::TooltipShown { point: index });
    }

    fn point_move(&mut self, index: usize, at: Vec2) {
        if self.point_states.is_hovered(index) && self.tooltip.point() == Some(index) {
            let offset = self.tooltip_offset();
            self.tooltip.move_to(at, offset);
        }
    }

    fn point_leave(&mut self, index: usize) {
        if !self.point_states.unhover(index) {
            return;
        }
        let k = self.transforms.current().k;
        self.render.set_point_hovered(index, false, k);
        // Another hovered point may own the tooltip.
        if self.tooltip.point() == Some(index) {
            self.hide_tooltip();
        }
    }

    fn tooltip_offset(&self) -> Vec2 {
        let [x, y] = self.options.tooltip_offset;
        Vec2::new(x, y)
    }
}
