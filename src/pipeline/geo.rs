//! Great-circle distance and the device geolocation capability.

use crate::domain::Coordinates;
use futures_util::future::LocalBoxFuture;
use std::time::Duration;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two optional points.
///
/// Returns `f64::INFINITY` when either point is absent, so places without a
/// location always rank behind located ones in ascending distance order.
///
/// # Examples
///
/// ```
/// use placesheet::domain::Coordinates;
/// use placesheet::pipeline::distance_km;
///
/// let kuching = Coordinates::new(1.5533, 110.3592);
/// let miri = Coordinates::new(4.3995, 113.9914);
/// let d = distance_km(Some(kuching), Some(miri));
/// assert!((d - 511.0).abs() < 5.0);
/// assert!(distance_km(Some(kuching), None).is_infinite());
/// ```
#[must_use]
pub fn distance_km(a: Option<Coordinates>, b: Option<Coordinates>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return f64::INFINITY;
    };

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let s = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push `s` a hair past 1.0 for antipodal points.
    2.0 * EARTH_RADIUS_KM * s.clamp(0.0, 1.0).sqrt().asin()
}

/// Device geolocation, provided by the host.
///
/// Implementations must resolve within `timeout`, yielding `None` on denial,
/// unavailability or timeout. Failures are never surfaced to the user.
///
/// The returned future owns everything it needs, so the runtime can hand it to the
/// host's executor and keep handling events while it is pending.
pub trait Geolocation {
    fn current_position(&self, timeout: Duration) -> LocalBoxFuture<'static, Option<Coordinates>>;
}

/// A fixed position, handy for hosts that already know where the user is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Option<Coordinates>);

impl Geolocation for FixedLocation {
    fn current_position(&self, _timeout: Duration) -> LocalBoxFuture<'static, Option<Coordinates>> {
        Box::pin(std::future::ready(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        let p = Coordinates::new(1.5, 110.3);
        assert!(distance_km(Some(p), Some(p)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_km(Some(Coordinates::new(0.0, 0.0)), Some(Coordinates::new(1.0, 0.0)));
        assert!((d - 111.19).abs() < 0.05, "got {d}");
    }

    #[test]
    fn antipodes_stay_finite() {
        let d = distance_km(Some(Coordinates::new(0.0, 0.0)), Some(Coordinates::new(0.0, 180.0)));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn absent_points_are_infinite_not_nan() {
        assert_eq!(distance_km(None, None), f64::INFINITY);
        assert_eq!(distance_km(None, Some(Coordinates::new(1.0, 1.0))), f64::INFINITY);
    }
}
