//! Projection parameters for a viewport: fixed, or fitted to the features.

use formats::RegionFeature;
use foundation::bounds::Aabb2;
use foundation::math::{GeoPoint, Mercator, Vec2};
use layers::collection_bounds;
use scene::Viewport;

use crate::options::MapOptions;

/// Caller-chosen scale with `center` projected onto the viewport center.
pub fn fixed_projection(scale: f64, center: GeoPoint, viewport: Viewport) -> Mercator {
    Mercator::new(
        scale,
        Vec2::new(viewport.width / 2.0, viewport.height / 2.0),
        center,
    )
}

/// Fits a probe-space box (scale 1, translate 0, center `(0, 0)`) into the
/// viewport, shrunk by `margin_factor`.
///
/// A zero extent on either axis counts as 1 and an empty box as a zero-size
/// box at the origin.
pub fn fit_box(bounds: Aabb2, viewport: Viewport, margin_factor: f64) -> Mercator {
    let nonzero = |v: f64| if v > 0.0 { v } else { 1.0 };
    let dx = nonzero(bounds.width());
    let dy = nonzero(bounds.height());
    let c = bounds.center();

    let scale = (viewport.width / dx).min(viewport.height / dy) * margin_factor;
    let translate = Vec2::new(
        viewport.width / 2.0 - scale * c.x,
        viewport.height / 2.0 - scale * c.y,
    );
    Mercator::new(scale, translate, GeoPoint::default())
}

pub fn fit_projection(
    features: &[RegionFeature],
    viewport: Viewport,
    margin_factor: f64,
) -> Mercator {
    fit_box(
        collection_bounds(features, &Mercator::probe()),
        viewport,
        margin_factor,
    )
}

/// Fixed mode when the options carry a scale, auto-fit otherwise.
pub fn resolve_projection(
    options: &MapOptions,
    features: &[RegionFeature],
    viewport: Viewport,
) -> Mercator {
    match options.scale {
        Some(scale) => fixed_projection(scale, options.center(), viewport),
        None => fit_projection(features, viewport, options.margin_factor),
    }
}
