use crate::map_interface::Position;

/// Mean Earth radius in meters, the convention web map layers use for
/// ground distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub struct DistanceHelper;

impl DistanceHelper {
    /// Great-circle distance between two positions in meters (haversine).
    pub fn haversine_m(from: Position, to: Position) -> f64 {
        let lat1 = from.lat.to_radians();
        let lat2 = to.lat.to_radians();
        let dlat = (to.lat - from.lat).to_radians();
        let dlng = (to.lng - from.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_meters_apart() {
        let p = Position::new(16.1622, 74.8298);
        assert_eq!(DistanceHelper::haversine_m(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let d = DistanceHelper::haversine_m(Position::new(0.0, 0.0), Position::new(0.0, 1.0));
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1.0, "got {d}, expected {expected}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position::new(16.1622, 74.8298);
        let b = Position::new(16.1585, 74.8278);
        let ab = DistanceHelper::haversine_m(a, b);
        let ba = DistanceHelper::haversine_m(b, a);
        assert!((ab - ba).abs() < 1e-9);
        assert!(ab > 0.0);
    }
}
