//! Great-circle distance and distance-based scoring.

use crate::types::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Points awarded for a perfect guess.
pub const MAX_POINTS: u32 = 5000;

/// Distance at which a guess is worth `MAX_POINTS / e` points.
const DECAY_KM: f64 = 2000.0;

/// Haversine great-circle distance between two lat/lng points in kilometers.
///
/// Longitude differences are taken as signed degrees with no explicit
/// wraparound normalization; `sin²` is periodic, so pairs straddling the
/// antimeridian still resolve to the short arc. Callers must not
/// pre-normalize longitudes; scoring depends on the raw signed difference.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Convert a guess distance to round points: `round(5000 · e^(-d/2000))`,
/// floored at zero.
///
/// 5000 at distance zero, ~1839 at 2000 km, effectively zero beyond the
/// antipodal maximum. Monotonically decreasing in distance.
pub fn score_from_distance(distance_km: f64) -> u32 {
    let points = (MAX_POINTS as f64 * (-distance_km / DECAY_KM).exp()).round();
    points.max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_same_point_is_zero() {
        let tabriz = GeoPoint {
            lat: 38.08,
            lng: 46.2919,
        };
        let dist = haversine_km(tabriz, tabriz);
        assert!(dist < 0.001, "Same point should be 0km, got {dist}");
    }

    #[test]
    fn haversine_is_symmetric() {
        let london = GeoPoint {
            lat: 51.5074,
            lng: -0.1278,
        };
        let paris = GeoPoint {
            lat: 48.8566,
            lng: 2.3522,
        };
        let there = haversine_km(london, paris);
        let back = haversine_km(paris, london);
        assert!(
            (there - back).abs() < 1e-9,
            "Distance should be symmetric, got {there} vs {back}"
        );
    }

    #[test]
    fn haversine_london_to_paris() {
        // London to Paris is ~344km
        let dist = haversine_km(
            GeoPoint {
                lat: 51.5074,
                lng: -0.1278,
            },
            GeoPoint {
                lat: 48.8566,
                lng: 2.3522,
            },
        );
        assert!(
            (dist - 344.0).abs() < 5.0,
            "London to Paris should be ~344km, got {dist}"
        );
    }

    #[test]
    fn haversine_equator_quarter_circle() {
        // A quarter of the great circle: 6371 * π/2 ≈ 10007.5km
        let dist = haversine_km(GeoPoint { lat: 0.0, lng: 0.0 }, GeoPoint { lat: 0.0, lng: 90.0 });
        assert!(
            (dist - 10_007.5).abs() < 1.0,
            "Quarter circle should be ~10007.5km, got {dist}"
        );
    }

    #[test]
    fn haversine_antimeridian_pair_takes_short_arc() {
        // One degree of longitude apart across the date line ≈ 111.2km
        let dist = haversine_km(
            GeoPoint {
                lat: 0.0,
                lng: 179.5,
            },
            GeoPoint {
                lat: 0.0,
                lng: -179.5,
            },
        );
        assert!(
            (dist - 111.2).abs() < 1.0,
            "Antimeridian pair should be ~111.2km, got {dist}"
        );
    }

    #[test]
    fn score_zero_distance_is_max() {
        assert_eq!(score_from_distance(0.0), 5000);
    }

    #[test]
    fn score_at_decay_distance() {
        // 5000 / e ≈ 1839
        assert_eq!(score_from_distance(2000.0), 1839);
    }

    #[test]
    fn score_far_distance_is_zero() {
        assert_eq!(score_from_distance(20_000.0), 0);
    }

    #[test]
    fn score_decreases_with_distance() {
        let near = score_from_distance(100.0);
        let mid = score_from_distance(800.0);
        let far = score_from_distance(4000.0);
        assert!(near > mid, "{near} should beat {mid}");
        assert!(mid > far, "{mid} should beat {far}");
    }
}
