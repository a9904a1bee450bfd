#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

// --- Rect ---

#[test]
fn rect_dimensions() {
    let r = Rect::new(10.0, 20.0, 110.0, 70.0);
    assert_eq!(r.width(), 100.0);
    assert_eq!(r.height(), 50.0);
    assert_eq!(r.center_x(), 60.0);
    assert_eq!(r.center_y(), 45.0);
    assert_eq!(r.center(), Point::new(60.0, 45.0));
}

#[test]
fn rect_from_size_is_origin_anchored() {
    let r = Rect::from_size(800.0, 600.0);
    assert_eq!(r, Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn rect_default_is_empty() {
    assert!(Rect::default().is_empty());
}

#[test]
fn rect_zero_width_is_empty() {
    assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
    assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_empty());
}

#[test]
fn rect_inverted_is_empty() {
    assert!(Rect::new(10.0, 0.0, 0.0, 10.0).is_empty());
}

#[test]
fn rect_nan_is_empty() {
    assert!(Rect::new(0.0, 0.0, f64::NAN, 10.0).is_empty());
}

#[test]
fn rect_positive_area_is_not_empty() {
    assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
}

#[test]
fn rect_offset_to_keeps_size() {
    let r = Rect::new(0.0, 0.0, 40.0, 30.0).offset_to(100.0, 200.0);
    assert_eq!(r, Rect::new(100.0, 200.0, 140.0, 230.0));
}

#[test]
fn rect_scaled_scales_every_edge() {
    let r = Rect::new(10.0, 20.0, 110.0, 220.0).scaled(0.5);
    assert_eq!(r, Rect::new(5.0, 10.0, 55.0, 110.0));
}

#[test]
fn rect_contains_rect_with_tolerance() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 90.0, 90.0), 0.0));
    assert!(outer.contains_rect(&outer, 0.0));
    assert!(!outer.contains_rect(&Rect::new(-1.0, 0.0, 50.0, 50.0), 0.0));
    assert!(outer.contains_rect(&Rect::new(-1e-9, 0.0, 50.0, 50.0), 1e-6));
}

// --- Transform::fill ---

#[test]
fn fill_same_rect_is_identity() {
    let r = Rect::from_size(800.0, 600.0);
    assert_eq!(Transform::fill(&r, &r), Transform::IDENTITY);
}

#[test]
fn fill_half_size_viewport_doubles_scale() {
    let viewport = Rect::new(250.0, 250.0, 750.0, 750.0);
    let canvas = Rect::from_size(1000.0, 1000.0);
    let t = Transform::fill(&viewport, &canvas);
    assert!(approx_eq(t.scale_x, 2.0));
    assert!(approx_eq(t.scale_y, 2.0));
    assert!(approx_eq(t.translate_x, -500.0));
    assert!(approx_eq(t.translate_y, -500.0));
}

#[test]
fn fill_maps_source_corners_onto_destination_corners() {
    let src = Rect::new(10.0, 20.0, 60.0, 220.0);
    let dst = Rect::new(0.0, 0.0, 400.0, 300.0);
    let t = Transform::fill(&src, &dst);
    assert!(point_approx_eq(t.map_point(Point::new(10.0, 20.0)), Point::new(0.0, 0.0)));
    assert!(point_approx_eq(t.map_point(Point::new(60.0, 220.0)), Point::new(400.0, 300.0)));
}

#[test]
fn fill_ignores_aspect_ratio() {
    let src = Rect::from_size(100.0, 50.0);
    let dst = Rect::from_size(100.0, 100.0);
    let t = Transform::fill(&src, &dst);
    assert!(approx_eq(t.scale_x, 1.0));
    assert!(approx_eq(t.scale_y, 2.0));
}

#[test]
fn fill_with_empty_source_is_identity() {
    let t = Transform::fill(&Rect::default(), &Rect::from_size(100.0, 100.0));
    assert_eq!(t, Transform::IDENTITY);
}

#[test]
fn fill_with_empty_destination_is_identity() {
    let t = Transform::fill(&Rect::from_size(100.0, 100.0), &Rect::default());
    assert_eq!(t, Transform::IDENTITY);
}

// --- Transform mapping ---

#[test]
fn map_rect_of_source_is_destination() {
    let src = Rect::new(100.0, 100.0, 300.0, 200.0);
    let dst = Rect::from_size(800.0, 400.0);
    let t = Transform::fill(&src, &dst);
    let mapped = t.map_rect(&src);
    assert!(approx_eq(mapped.left, 0.0));
    assert!(approx_eq(mapped.top, 0.0));
    assert!(approx_eq(mapped.right, 800.0));
    assert!(approx_eq(mapped.bottom, 400.0));
}

#[test]
fn invert_round_trips_a_point() {
    let t = Transform { scale_x: 2.0, scale_y: 4.0, translate_x: -30.0, translate_y: 12.0 };
    let inv = t.invert().unwrap();
    let p = Point::new(17.0, -3.5);
    assert!(point_approx_eq(inv.map_point(t.map_point(p)), p));
}

#[test]
fn invert_zero_scale_is_none() {
    let t = Transform { scale_x: 0.0, ..Transform::IDENTITY };
    assert!(t.invert().is_none());
}

#[test]
fn invert_infinite_scale_is_none() {
    let t = Transform { scale_y: f64::INFINITY, ..Transform::IDENTITY };
    assert!(t.invert().is_none());
}

#[test]
fn to_matrix_layout() {
    let t = Transform { scale_x: 2.0, scale_y: 3.0, translate_x: 5.0, translate_y: 7.0 };
    assert_eq!(t.to_matrix(), [2.0, 0.0, 0.0, 3.0, 5.0, 7.0]);
}

#[test]
fn transform_default_is_identity() {
    assert_eq!(Transform::default(), Transform::IDENTITY);
}
