use super::geodesy::{
    RADIUS_EARTH_M, destination_point, distance, heading, normalize_heading, normalize_longitude,
};
use super::{GeoPoint, Vec2D};
use proptest::prelude::*;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

const EPS: f64 = 1e-9;

fn angle_diff(a: f64, b: f64) -> f64 {
    let d = normalize_heading(a - b);
    d.min(TAU - d)
}

#[test]
fn test_vec2d_rotate_origin_and_center() {
    let mut v = Vec2D::new(1.0, 0.0);
    v.rotate(FRAC_PI_2);
    assert!((v.x()).abs() < EPS);
    assert!((v.y() - 1.0).abs() < EPS);

    let mut c = Vec2D::new(2.0, 1.0);
    c.rotate_around(1.0, 1.0, PI);
    assert!((c.x() - 0.0).abs() < EPS);
    assert!((c.y() - 1.0).abs() < EPS);
}

#[test]
fn test_vec2d_translate_scale_swap() {
    let mut v = Vec2D::new(3.0, -4.0);
    v.scale(2.0, 0.5);
    assert_eq!(v, Vec2D::new(6.0, -2.0));
    v.translate(-1.0, 1.0);
    assert_eq!(v, Vec2D::new(5.0, -1.0));
    v.swap();
    assert_eq!(v, Vec2D::new(-1.0, 5.0));
    assert_ne!(v, Vec2D::new(-1.0, 5.000_000_1));
}

#[test]
fn test_vec2d_norms() {
    let v = Vec2D::new(3.0_f64, -4.0);
    assert!((v.abs() - 5.0).abs() < EPS);
    assert!((v.norm1() - 7.0).abs() < EPS);
    assert!((v.norm_inf() - 4.0).abs() < EPS);
    assert!((v.euclid_distance(&Vec2D::new(0.0, 0.0)) - 5.0).abs() < EPS);
}

#[test]
fn test_same_point_is_well_defined() {
    let mut rng = rand::rng();
    for _ in 0..500 {
        let lat = rng.random_range(-FRAC_PI_2..=FRAC_PI_2);
        let lon = rng.random_range(-PI..PI);
        assert!(distance(lat, lon, lat, lon).abs() < f64::EPSILON);
        let h = heading(lat, lon, lat, lon);
        assert!(!h.is_nan());
        assert!((0.0..TAU).contains(&h));
    }
}

#[test]
fn test_antipodal_distance_is_half_circumference() {
    let d = distance(0.3, 0.0, -0.3, PI);
    assert!((d - PI * RADIUS_EARTH_M).abs() < 1.0);
}

#[test]
fn test_heading_cardinal_directions() {
    assert!(angle_diff(heading(0.0, 0.0, 0.01, 0.0), 0.0) < 1e-9);
    assert!(angle_diff(heading(0.0, 0.0, 0.0, 0.01), FRAC_PI_2) < 1e-9);
    assert!(angle_diff(heading(0.0, 0.0, -0.01, 0.0), PI) < 1e-9);
    assert!(angle_diff(heading(0.0, 0.0, 0.0, -0.01), 3.0 * FRAC_PI_2) < 1e-9);
}

#[test]
fn test_heading_pole_fallback() {
    assert!((heading(FRAC_PI_2, 0.0, 0.1, 0.2) - PI).abs() < EPS);
    assert!(heading(-FRAC_PI_2, 0.0, 0.1, 0.2).abs() < EPS);
}

#[test]
fn test_four_quarter_turns_restore_heading() {
    let start = 0.7;
    let mut h = start;
    for _ in 0..4 {
        h = normalize_heading(h + FRAC_PI_2);
        assert!((0.0..TAU).contains(&h));
    }
    assert!(angle_diff(h, start) < 1e-12);
}

#[test]
fn test_destination_longitude_wraps() {
    let (_, lon) = destination_point(0.0, PI - 1e-6, 1000.0, FRAC_PI_2);
    assert!((-PI..PI).contains(&lon));
    assert!(lon < 0.0);
    assert!((normalize_longitude(PI) + PI).abs() < EPS);
}

#[test]
fn test_offset_distances_match_meter_offsets() {
    let origin = GeoPoint::new(0.0, 0.0);
    let offsets = [(0.0, 0.0), (-800.0, 1500.0), (600.0, -250.0)];
    for (x, y) in offsets {
        let p = origin.offset_by(Vec2D::new(y, x), 0.0);
        let expected = Vec2D::new(x, y).abs();
        assert!((origin.distance_to(&p) - expected).abs() < 0.05);
    }
}

#[test]
fn test_offset_rotates_with_heading() {
    let origin = GeoPoint::from_degrees(45.0, 7.0);
    // one kilometer ahead, heading east
    let p = origin.offset_by(Vec2D::new(1000.0, 0.0), FRAC_PI_2);
    assert!(angle_diff(origin.heading_to(&p), FRAC_PI_2) < 1e-3);
    assert!((origin.distance_to(&p) - 1000.0).abs() < 0.5);
}

#[test]
fn test_offset_across_antimeridian_wraps_longitude() {
    let origin = GeoPoint::new(0.0, PI - 1e-6);
    let p = origin.offset_by(Vec2D::new(0.0, 1000.0), 0.0);
    assert!((-PI..PI).contains(&p.lon()));
    let (_, lon_deg) = p.to_degrees();
    assert!((-180.0..180.0).contains(&lon_deg));
    assert!(lon_deg < -179.9);
    assert!((origin.distance_to(&p) - 1000.0).abs() < 0.5);
}

proptest! {
    #[test]
    fn prop_heading_in_range(
        lat1 in -1.5..1.5f64, lon1 in -PI..PI,
        lat2 in -1.5..1.5f64, lon2 in -PI..PI,
    ) {
        let h = heading(lat1, lon1, lat2, lon2);
        prop_assert!((0.0..TAU).contains(&h));
    }

    #[test]
    fn prop_destination_recovers_distance(
        lat in -1.2..1.2f64, lon in -PI..PI,
        dist in 10.0..50_000.0f64, bearing in -TAU..TAU,
    ) {
        let (n_lat, n_lon) = destination_point(lat, lon, dist, bearing);
        prop_assert!((-PI..PI).contains(&n_lon));
        let back = distance(lat, lon, n_lat, n_lon);
        prop_assert!((back - dist).abs() < 0.5 + dist * 1e-6);
        prop_assert!(angle_diff(heading(lat, lon, n_lat, n_lon), bearing) < 1e-4);
    }
}
