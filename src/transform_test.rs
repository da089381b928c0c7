#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::style::StyleConfig;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn config() -> StyleConfig {
    StyleConfig { map_horizontal_padding: 0.0, ..StyleConfig::default() }
}

// --- Point / Rect ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn rect_contains_inside() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains(Point::new(15.0, 15.0)));
}

#[test]
fn rect_contains_edges_inclusive() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(r.contains(Point::new(30.0, 30.0)));
}

#[test]
fn rect_contains_outside() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(!r.contains(Point::new(9.9, 15.0)));
    assert!(!r.contains(Point::new(15.0, 30.1)));
}

#[test]
fn rect_union_covers_both() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(20.0, 5.0, 10.0, 10.0);
    let u = a.union(b);
    assert_eq!(u, Rect::new(0.0, 0.0, 30.0, 15.0));
}

#[test]
fn rect_bounding_of_points() {
    let pts = [Point::new(3.0, 7.0), Point::new(-1.0, 2.0), Point::new(5.0, 4.0)];
    let r = Rect::bounding(&pts);
    assert_eq!(r, Rect::new(-1.0, 2.0, 6.0, 5.0));
}

#[test]
fn rect_bounding_empty_is_zero() {
    assert_eq!(Rect::bounding(&[]), Rect::new(0.0, 0.0, 0.0, 0.0));
}

// --- compute: divisor semantics ---

#[test]
fn compute_unset_divisors_fit_reference() {
    // Both divisors unset: the reference box scales to fit the surface.
    let t = MapTransform::compute(200.0, 100.0, &config(), 100.0, 50.0);
    assert!(approx_eq(t.scale, 2.0));
    assert!(approx_eq(t.offset_x, 0.0));
    assert!(approx_eq(t.offset_y, 0.0));
}

#[test]
fn compute_explicit_divisors_override_reference() {
    let cfg = StyleConfig {
        horizontal_ratio_divisor: 400,
        vertical_ratio_divisor: 200,
        map_horizontal_padding: 0.0,
        ..StyleConfig::default()
    };
    // 800/400 = 2, 100/200 = 0.5: the vertical axis constrains the scale.
    let t = MapTransform::compute(800.0, 100.0, &cfg, 100.0, 50.0);
    assert!(approx_eq(t.scale, 0.5));
}

#[test]
fn compute_horizontal_divisor_derives_vertical() {
    let cfg = StyleConfig {
        horizontal_ratio_divisor: 200,
        vertical_ratio_divisor: 0,
        map_horizontal_padding: 0.0,
        ..StyleConfig::default()
    };
    // Derived vertical divisor = 200 * (50/100) = 100.
    let t = MapTransform::compute(400.0, 100.0, &cfg, 100.0, 50.0);
    assert!(approx_eq(t.scale, 1.0));
}

#[test]
fn compute_vertical_divisor_derives_horizontal() {
    let cfg = StyleConfig {
        horizontal_ratio_divisor: -3,
        vertical_ratio_divisor: 100,
        map_horizontal_padding: 0.0,
        ..StyleConfig::default()
    };
    // Derived horizontal divisor = 100 * (100/50) = 200.
    let t = MapTransform::compute(400.0, 300.0, &cfg, 100.0, 50.0);
    assert!(approx_eq(t.scale, 2.0));
}

#[test]
fn compute_negative_divisors_treated_as_unset() {
    let cfg = StyleConfig {
        horizontal_ratio_divisor: -1,
        vertical_ratio_divisor: -7,
        map_horizontal_padding: 0.0,
        ..StyleConfig::default()
    };
    let unset = MapTransform::compute(200.0, 100.0, &cfg, 100.0, 50.0);
    let defaulted = MapTransform::compute(200.0, 100.0, &config(), 100.0, 50.0);
    assert_eq!(unset, defaulted);
}

// --- compute: padding and centering ---

#[test]
fn compute_padding_shrinks_horizontal_extent() {
    let cfg = StyleConfig { map_horizontal_padding: 50.0, ..StyleConfig::default() };
    // Available width 200 - 100 = 100, so scale 1.0 instead of 2.0.
    let t = MapTransform::compute(200.0, 100.0, &cfg, 100.0, 50.0);
    assert!(approx_eq(t.scale, 1.0));
}

#[test]
fn compute_centers_scaled_reference_box() {
    let cfg = StyleConfig { map_horizontal_padding: 50.0, ..StyleConfig::default() };
    let t = MapTransform::compute(200.0, 100.0, &cfg, 100.0, 50.0);
    // 100x50 at scale 1.0 centered in 200x100.
    assert!(approx_eq(t.offset_x, 50.0));
    assert!(approx_eq(t.offset_y, 25.0));
}

#[test]
fn compute_degenerate_surface_keeps_scale_positive() {
    let t = MapTransform::compute(0.0, 0.0, &config(), 100.0, 50.0);
    assert!(t.scale > 0.0);
    assert!(t.scale.is_finite());
}

#[test]
fn compute_oversized_padding_keeps_scale_positive() {
    let cfg = StyleConfig { map_horizontal_padding: 500.0, ..StyleConfig::default() };
    let t = MapTransform::compute(200.0, 100.0, &cfg, 100.0, 50.0);
    assert!(t.scale > 0.0);
    assert!(t.scale.is_finite());
}

// --- to_surface / to_reference ---

#[test]
fn to_surface_applies_scale_and_offset() {
    let t = MapTransform { scale: 2.0, offset_x: 10.0, offset_y: 5.0 };
    let p = t.to_surface(Point::new(3.0, 4.0));
    assert!(point_approx_eq(p, Point::new(16.0, 13.0)));
}

#[test]
fn to_reference_inverts_scale_and_offset() {
    let t = MapTransform { scale: 2.0, offset_x: 10.0, offset_y: 5.0 };
    let p = t.to_reference(Point::new(16.0, 13.0));
    assert!(point_approx_eq(p, Point::new(3.0, 4.0)));
}

#[test]
fn round_trip_identity_transform() {
    let t = MapTransform::default();
    let p = Point::new(12.5, -7.25);
    assert!(point_approx_eq(t.to_reference(t.to_surface(p)), p));
}

#[test]
fn round_trip_across_configs() {
    let configs = [
        StyleConfig::default(),
        StyleConfig { horizontal_ratio_divisor: 320, ..StyleConfig::default() },
        StyleConfig { vertical_ratio_divisor: 175, map_horizontal_padding: 22.5, ..StyleConfig::default() },
        StyleConfig {
            horizontal_ratio_divisor: 850,
            vertical_ratio_divisor: 418,
            map_horizontal_padding: 4.0,
            ..StyleConfig::default()
        },
    ];
    let sizes = [(320.0, 240.0), (1024.0, 768.0), (50.0, 900.0)];
    let p = Point::new(33.3, 41.7);
    for cfg in &configs {
        for &(w, h) in &sizes {
            let t = MapTransform::compute(w, h, cfg, 850.4, 418.9);
            assert!(
                point_approx_eq(t.to_reference(t.to_surface(p)), p),
                "round trip failed for {w}x{h}"
            );
        }
    }
}

#[test]
fn round_trip_surface_first() {
    let t = MapTransform::compute(640.0, 480.0, &StyleConfig::default(), 850.4, 418.9);
    let surface = Point::new(400.0, 300.0);
    assert!(point_approx_eq(t.to_surface(t.to_reference(surface)), surface));
}
