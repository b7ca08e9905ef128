//! Geographic to device-space projections.
//!
//! Device space follows screen conventions: x grows to the right, y grows
//! downward, so north is up.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::Vec2;

/// Latitude (degrees) beyond which spherical Mercator diverges.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_779_806_59;

/// Geographic coordinate in degrees, canonical `(lon, lat)` order.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    /// True for finite coordinates with `lon ∈ [-180, 180]` and `lat ∈ [-90, 90]`.
    pub fn is_valid(&self) -> bool {
        self.lon_deg.is_finite()
            && self.lat_deg.is_finite()
            && (-180.0..=180.0).contains(&self.lon_deg)
            && (-90.0..=90.0).contains(&self.lat_deg)
    }
}

pub trait Projection {
    fn project(&self, point: GeoPoint) -> Vec2;
}

/// Spherical Mercator parameterized by `scale`, `translate` and a reference
/// `center`; `center` always projects onto `translate`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mercator {
    pub scale: f64,
    pub translate: Vec2,
    pub center: GeoPoint,
}

impl Mercator {
    pub fn new(scale: f64, translate: Vec2, center: GeoPoint) -> Self {
        Self {
            scale,
            translate,
            center,
        }
    }

    /// Scale 1, no translation, centered on `(0, 0)`. Used to measure geometry
    /// before fitting.
    pub fn probe() -> Self {
        Self::new(1.0, Vec2::ZERO, GeoPoint::default())
    }

    pub fn project(&self, point: GeoPoint) -> Vec2 {
        let raw = mercator_raw(point);
        let c = mercator_raw(self.center);
        Vec2::new(
            self.translate.x + self.scale * (raw.x - c.x),
            self.translate.y - self.scale * (raw.y - c.y),
        )
    }

    pub fn invert(&self, p: Vec2) -> GeoPoint {
        let c = mercator_raw(self.center);
        let x = (p.x - self.translate.x) / self.scale + c.x;
        let y = (self.translate.y - p.y) / self.scale + c.y;
        GeoPoint::new(x.to_degrees(), (2.0 * y.exp().atan() - FRAC_PI_2).to_degrees())
    }
}

impl Projection for Mercator {
    fn project(&self, point: GeoPoint) -> Vec2 {
        Mercator::project(self, point)
    }
}

fn mercator_raw(point: GeoPoint) -> Vec2 {
    let lambda = point.lon_deg.to_radians();
    let phi = point
        .lat_deg
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    Vec2::new(lambda, (FRAC_PI_4 + phi / 2.0).tan().ln())
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, MERCATOR_MAX_LAT_DEG, Mercator};
    use crate::math::Vec2;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn center_maps_to_translate() {
        let m = Mercator::new(28_000.0, Vec2::new(400.0, 300.0), GeoPoint::new(128.35, 37.68));
        let p = m.project(GeoPoint::new(128.35, 37.68));
        assert_close(p.x, 400.0, 1e-9);
        assert_close(p.y, 300.0, 1e-9);
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let m = Mercator::new(100.0, Vec2::ZERO, GeoPoint::default());
        let ne = m.project(GeoPoint::new(10.0, 10.0));
        assert!(ne.x > 0.0);
        assert!(ne.y < 0.0);
        assert_close(ne.x, 100.0 * 10f64.to_radians(), 1e-9);
    }

    #[test]
    fn invert_round_trips() {
        let m = Mercator::new(5_000.0, Vec2::new(12.0, -7.0), GeoPoint::new(127.0, 36.0));
        let g = GeoPoint::new(126.9784, 37.5666);
        let back = m.invert(m.project(g));
        assert_close(back.lon_deg, g.lon_deg, 1e-9);
        assert_close(back.lat_deg, g.lat_deg, 1e-9);
    }

    #[test]
    fn poles_stay_finite() {
        let m = Mercator::probe();
        let north = m.project(GeoPoint::new(0.0, 90.0));
        let clamped = m.project(GeoPoint::new(0.0, MERCATOR_MAX_LAT_DEG));
        assert!(north.is_finite());
        assert_close(north.y, clamped.y, 1e-12);
    }

    #[test]
    fn validates_coordinate_ranges() {
        assert!(GeoPoint::new(126.97, 37.56).is_valid());
        assert!(!GeoPoint::new(37.56, 126.97).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(-181.0, 0.0).is_valid());
    }
}
