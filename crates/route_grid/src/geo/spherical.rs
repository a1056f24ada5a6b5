//! Spherical approximations used to size and bound the corridor.
use std::f64::consts::PI;

/// Mean Earth radius used by [`haversine_distance_m`] (WGS84 equatorial).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Multiplier applied to the arc-tangent term of the haversine formula, in place
/// of the textbook factor of 2. Corridor radii and containment checks both use it,
/// so grid extents are defined in terms of this scaled distance.
pub const HAVERSINE_INFLATION: f64 = 1.2;

/// Approximate meters per degree of latitude.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

#[inline]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Haversine distance in meters with the angular term scaled by [`HAVERSINE_INFLATION`].
///
/// Grid extents depend on the scaled value, so this is intentionally not the
/// textbook great-circle distance.
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = degrees_to_radians(lat2 - lat1);
    let d_lon = degrees_to_radians(lon2 - lon1);

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();
    let a = sin_lat * sin_lat
        + degrees_to_radians(lat1).cos() * degrees_to_radians(lat2).cos() * sin_lon * sin_lon;
    let c = HAVERSINE_INFLATION * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_radian_conversions_are_inverse() {
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-15);
        assert!((radians_to_degrees(PI) - 180.0).abs() < 1e-12);
        for d in [-720.0, -45.5, 0.0, 1.27, 359.9] {
            assert!((radians_to_degrees(degrees_to_radians(d)) - d).abs() < 1e-9);
        }
    }

    #[test]
    fn angular_term_uses_scaled_factor() {
        // One degree of longitude on the equator: the central angle is pi / 180
        // and atan2(sqrt(a), sqrt(1 - a)) is half of it.
        let central = PI / 180.0;
        let d = haversine_distance_m(0.0, 0.0, 0.0, 1.0);
        let expected = EARTH_RADIUS_M * HAVERSINE_INFLATION * central / 2.0;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn short_distance_near_singapore() {
        let d = haversine_distance_m(1.2700, 103.8667, 1.2456, 103.9700);
        // ~11.8 km of true arc, scaled by 1.2 / 2.
        assert!(d > 6_000.0 && d < 8_000.0, "unexpected distance {d}");
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_identity() {
        let a = (1.2700, 103.8667);
        let b = (1.2456, 103.9700);
        let ab = haversine_distance_m(a.0, a.1, b.0, b.1);
        let ba = haversine_distance_m(b.0, b.1, a.0, a.1);
        assert!((ab - ba).abs() < 1e-9);
        assert_eq!(haversine_distance_m(a.0, a.1, a.0, a.1), 0.0);
    }
}
