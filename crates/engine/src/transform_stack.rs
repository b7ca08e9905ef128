//! Current pan/zoom transform plus the one-shot animation toward a target.

use foundation::bounds::Aabb2;
use foundation::math::Vec2;
use foundation::time::{Time, TimeSpan};
use scene::Viewport;
use scene::components::ViewTransform;

use crate::options::ZoomOptions;

/// Cubic ease-in-out over `t ∈ [0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Animation {
    from: ViewTransform,
    to: ViewTransform,
    /// Set by the first tick after the animation was requested.
    span: Option<TimeSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    current: ViewTransform,
    viewport: Viewport,
    zoom: ZoomOptions,
    animation: Option<Animation>,
}

impl TransformStack {
    pub fn new(viewport: Viewport, zoom: ZoomOptions) -> Self {
        Self {
            current: ViewTransform::IDENTITY,
            viewport,
            zoom,
            animation: None,
        }
    }

    pub fn current(&self) -> ViewTransform {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animation target, if one is in flight.
    pub fn target(&self) -> Option<ViewTransform> {
        self.animation.map(|a| a.to)
    }

    fn viewport_center(&self) -> Vec2 {
        Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Clamps `k` into the zoom range, keeping the viewport center fixed.
    pub fn clamp(&self, t: ViewTransform) -> ViewTransform {
        let k = t.k.clamp(self.zoom.k_min, self.zoom.k_max);
        if k == t.k {
            return t;
        }
        t.scale_to(k, self.viewport_center())
    }

    /// Replaces the current transform and cancels any animation.
    pub fn apply_gesture(&mut self, raw: ViewTransform) -> ViewTransform {
        self.animation = None;
        self.current = self.clamp(raw);
        self.current
    }

    /// Zooms by `factor` around the screen point `anchor`.
    pub fn zoom_by(&mut self, factor: f64, anchor: Vec2) -> ViewTransform {
        let k = (self.current.k * factor).clamp(self.zoom.k_min, self.zoom.k_max);
        let raw = self.current.scale_to(k, anchor);
        self.apply_gesture(raw)
    }

    pub fn pan_by(&mut self, delta: Vec2) -> ViewTransform {
        let raw = self.current.translate_by(delta);
        self.apply_gesture(raw)
    }

    /// Starts animating toward `target`, replacing any animation in flight.
    pub fn animate_to(&mut self, target: ViewTransform) {
        self.animation = Some(Animation {
            from: self.current,
            to: self.clamp(target),
            span: None,
        });
    }

    pub fn cancel(&mut self) {
        self.animation = None;
    }

    /// Advances the animation to `now`. Returns the new transform when it
    /// changed.
    pub fn tick(&mut self, now: Time) -> Option<ViewTransform> {
        let anim = self.animation.as_mut()?;
        let span = *anim
            .span
            .get_or_insert_with(|| TimeSpan::starting_at(now, self.zoom.duration_ms));
        let (from, to) = (anim.from, anim.to);

        let progress = span.progress(now);
        let next = if progress >= 1.0 {
            self.animation = None;
            to
        } else {
            self.interpolate(from, to, ease_cubic_in_out(progress))
        };

        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }

    /// Jumps to the end of any animation in flight.
    pub fn settle(&mut self) -> Option<ViewTransform> {
        let anim = self.animation.take()?;
        if anim.to == self.current {
            return None;
        }
        self.current = anim.to;
        Some(anim.to)
    }

    /// Interpolates the world point under the viewport center and `k`, so the
    /// motion does not drift sideways while zooming.
    fn interpolate(&self, from: ViewTransform, to: ViewTransform, e: f64) -> ViewTransform {
        let vc = self.viewport_center();
        let p = from.invert(vc).lerp(to.invert(vc), e);
        let k = from.k + (to.k - from.k) * e;
        ViewTransform::new(vc.x - p.x * k, vc.y - p.y * k, k)
    }

    /// Transform that centers `bounds` (device space) in the viewport at
    /// `min(max_region_scale, 0.5 / max(dx / w, dy / h))`, clamped.
    pub fn region_target(&self, bounds: Aabb2) -> ViewTransform {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let extent = (bounds.width() / w).max(bounds.height() / h);
        let k = (0.5 / extent)
            .min(self.zoom.max_region_scale)
            .clamp(self.zoom.k_min, self.zoom.k_max);
        let c = bounds.center();
        ViewTransform::new(w / 2.0 - k * c.x, h / 2.0 - k * c.y, k)
    }

    pub fn reset_target(&self) -> ViewTransform {
        ViewTransform::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::{TransformStack, ease_cubic_in_out};
    use crate::options::ZoomOptions;
    use foundation::bounds::Aabb2;
    use foundation::math::Vec2;
    use foundation::time::Time;
    use scene::Viewport;
    use scene::components::ViewTransform;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn stack() -> TransformStack {
        TransformStack::new(Viewport::new(800.0, 600.0), ZoomOptions::default())
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_close(ease_cubic_in_out(0.25), 0.0625);
    }

    #[test]
    fn gestures_clamp_k() {
        let mut s = stack();
        assert_eq!(s.apply_gesture(ViewTransform::new(0.0, 0.0, 50.0)).k, 10.0);
        assert_eq!(s.apply_gesture(ViewTransform::new(0.0, 0.0, 0.01)).k, 0.3);
        let t = s.apply_gesture(ViewTransform::new(3.0, 4.0, 2.0));
        assert_eq!(t, ViewTransform::new(3.0, 4.0, 2.0));
    }

    #[test]
    fn zoom_by_keeps_anchor_and_pan_translates() {
        let mut s = stack();
        let anchor = Vec2::new(100.0, 200.0);
        let t = s.zoom_by(2.0, anchor);
        assert_eq!(t.k, 2.0);
        assert_eq!(t.apply(t.invert(anchor)), anchor);
        assert_eq!(t.invert(anchor), anchor);
        let p = s.pan_by(Vec2::new(10.0, -5.0));
        assert_eq!((p.x - t.x, p.y - t.y), (10.0, -5.0));
    }

    #[test]
    fn region_target_scale_rule() {
        let s = stack();
        // 80 x 30 box: 0.5 / max(0.1, 0.05) = 5.
        let b = Aabb2::new(Vec2::new(100.0, 100.0), Vec2::new(180.0, 130.0));
        let t = s.region_target(b);
        assert_close(t.k, 5.0);
        let c = t.apply(b.center());
        assert_close(c.x, 400.0);
        assert_close(c.y, 300.0);

        // Tiny regions cap at the max region scale.
        let tiny = Aabb2::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert_close(s.region_target(tiny).k, 8.0);
        // Huge regions clamp at k_min.
        let huge = Aabb2::new(Vec2::new(0.0, 0.0), Vec2::new(8000.0, 100.0));
        assert_close(s.region_target(huge).k, 0.3);
    }

    #[test]
    fn animation_runs_over_duration_and_lands_exactly() {
        let mut s = stack();
        let target = ViewTransform::new(-400.0, -300.0, 2.0);
        s.animate_to(target);
        assert!(s.is_animating());

        let t0 = Time(1.0);
        assert_eq!(s.tick(t0), None);
        let mid = s.tick(t0.after_millis(375.0)).unwrap();
        assert_close(mid.k, 1.5);
        // The viewport center's world point moves linearly with the eased progress.
        let vc = Vec2::new(400.0, 300.0);
        let w = mid.invert(vc);
        assert_close(w.x, 400.0);
        assert_close(w.y, 300.0);

        assert_eq!(s.tick(t0.after_millis(750.0)), Some(target));
        assert!(!s.is_animating());
        assert_eq!(s.current(), target);
    }

    #[test]
    fn new_animation_and_gestures_preempt() {
        let mut s = stack();
        s.animate_to(ViewTransform::new(0.0, 0.0, 4.0));
        s.tick(Time(0.0));
        s.tick(Time(0.1));
        s.animate_to(ViewTransform::IDENTITY);
        assert_eq!(s.target(), Some(ViewTransform::IDENTITY));

        s.apply_gesture(ViewTransform::new(1.0, 1.0, 1.0));
        assert!(!s.is_animating());
        assert_eq!(s.tick(Time(5.0)), None);

        s.animate_to(ViewTransform::new(0.0, 0.0, 3.0));
        assert_eq!(s.settle().map(|t| t.k), Some(3.0));
        assert_eq!(s.settle(), None);
    }
}
