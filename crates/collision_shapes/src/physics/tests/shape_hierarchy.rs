//! Collision scenarios mixing shape variants and nested transforms

use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;

use crate::foundation::logging;
use crate::foundation::math::{Point2, Rect, Vec2};
use crate::physics::{BoxType, CollisionWorld, ContactPair, Shape};

fn rect(x: f64, y: f64, width: f64, height: f64) -> Shape {
    Shape::rectangle_at(Point2::new(x, y), Vec2::new(width, height))
}

/// Bounding box of a root shape's own points, padded for rounding
fn world_bounds(shape: &Shape) -> Rect {
    let model = shape.transform().model_matrix(true);
    let points: Vec<Point2> = shape.points().iter().map(|point| model.transform_point(point)).collect();
    let frame = Rect::containing(&points).unwrap_or_default();
    Rect::new(frame.origin - Vec2::new(1e-6, 1e-6), frame.size + Vec2::new(2e-6, 2e-6))
}

fn convex_scene() -> Vec<Shape> {
    vec![
        rect(0.0, 0.0, 10.0, 10.0),
        rect(5.0, 5.0, 10.0, 10.0),
        rect(20.0, 20.0, 5.0, 5.0),
        rect(12.0, 0.0, 6.0, 2.0).with_rotation(0.7),
        Shape::triangle(Point2::new(4.0, -6.0), Point2::new(12.0, -6.0), Point2::new(8.0, 2.0)),
        Shape::ellipse_at(Point2::new(-6.0, 0.0), 3.0, 2.0),
        Shape::segment(Point2::new(-10.0, -8.0), Point2::new(10.0, 12.0)),
        Shape::segment(Point2::new(0.0, -20.0), Point2::new(0.0, -8.0)),
    ]
}

#[test]
fn test_convex_collision_is_symmetric() {
    logging::init_for_tests();
    let shapes = convex_scene();

    for (i, a) in shapes.iter().enumerate() {
        for b in &shapes[i + 1..] {
            let forward = a.collides_with_shape(b);
            let backward = b.collides_with_shape(a);
            assert_eq!(forward.is_some(), backward.is_some(), "{a} vs {b}");

            for result in forward.iter().chain(backward.iter()) {
                let point = result.collision_point;
                assert!(world_bounds(a).contains(&point), "{point} outside {a}");
                assert!(world_bounds(b).contains(&point), "{point} outside {b}");
            }
        }
    }
}

#[test]
fn test_known_rectangle_overlaps() {
    let shapes = convex_scene();

    assert!(shapes[0].intersects(&shapes[1]));
    assert!(!shapes[0].intersects(&shapes[2]));
    assert!(!shapes[1].intersects(&shapes[2]));
}

#[test]
fn test_mixed_variants() {
    let shapes = convex_scene();
    let (square, triangle, ellipse, diagonal, post) = (&shapes[0], &shapes[4], &shapes[5], &shapes[6], &shapes[7]);

    assert!(square.intersects(triangle));
    assert!(square.intersects(ellipse));
    assert!(square.intersects(diagonal));
    assert!(!square.intersects(post));
    assert!(!diagonal.intersects(post));
    assert!(!triangle.intersects(ellipse));
}

#[test]
fn test_crossing_segments_meet_at_known_point() {
    let horizontal = Shape::segment(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
    let vertical = Shape::segment(Point2::new(5.0, -5.0), Point2::new(5.0, 5.0));

    let result = horizontal.collides_with_shape(&vertical).unwrap();
    assert_relative_eq!(result.collision_point, Point2::new(5.0, 0.0), epsilon = 1e-9);

    let result = vertical.collides_with_shape(&horizontal).unwrap();
    assert_relative_eq!(result.collision_point, Point2::new(5.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_parallel_segments_never_collide() {
    let a = Shape::segment(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
    let b = Shape::segment(Point2::new(0.0, 1.0), Point2::new(10.0, 11.0));

    assert!(!a.intersects(&b));
    assert!(!b.intersects(&a));
}

#[test]
fn test_ellipse_boundary_is_inclusive() {
    let ellipse = Shape::ellipse_at(Point2::origin(), 5.0, 3.0);

    assert!(ellipse.contains_world_point(&Point2::new(5.0, 0.0)));
    assert!(!ellipse.contains_world_point(&Point2::new(6.0, 0.0)));
}

#[test]
fn test_rotated_parent_places_children() {
    let arm = Shape::group(vec![rect(5.0, 0.0, 2.0, 2.0)])
        .with_position(Point2::new(10.0, 0.0))
        .with_rotation(FRAC_PI_2);

    assert!(arm.intersects(&rect(10.0, 5.0, 1.0, 1.0)));
    assert!(!arm.intersects(&rect(15.0, 0.0, 1.0, 1.0)));
}

#[test]
fn test_mirrored_parent_places_children() {
    let mirrored = Shape::group(vec![rect(5.0, 0.0, 2.0, 2.0)]).with_scale(Vec2::new(-1.0, 1.0));

    assert!(mirrored.intersects(&rect(-5.0, 0.0, 1.0, 1.0)));
    assert!(!mirrored.intersects(&rect(5.0, 0.0, 1.0, 1.0)));
}

#[test]
fn test_group_never_contains_points_but_children_collide() {
    let group = Shape::group(vec![rect(0.0, 0.0, 4.0, 4.0), rect(10.0, 0.0, 4.0, 4.0)]);

    assert!(!group.point_lies_inside(&Point2::origin()));
    assert!(!group.contains_world_point(&Point2::new(10.0, 0.0)));

    let probe = rect(10.0, 0.0, 1.0, 1.0);
    let result = group.collides_with_shape(&probe).unwrap();
    assert!(std::ptr::eq(result.first_shape, &group.children()[1]));

    let frame = group.collision_frame().unwrap();
    assert_relative_eq!(frame.min_x(), -2.0);
    assert_relative_eq!(frame.max_x(), 12.0);
}

#[test]
fn test_two_trees_deep_in_the_hierarchy() {
    let left = Shape::group(vec![Shape::group(vec![rect(0.0, 0.0, 2.0, 2.0)]).with_position(Point2::new(3.0, 0.0))])
        .with_position(Point2::new(-10.0, 0.0));
    let right = Shape::group(vec![Shape::group(vec![rect(0.0, 0.0, 2.0, 2.0)]).with_position(Point2::new(-3.0, 0.0))])
        .with_position(Point2::new(-3.5, 0.0));

    // Leaves land at x = -7 and x = -6.5
    let result = left.collides_with_shape(&right).unwrap();
    assert!(std::ptr::eq(result.first_shape, &left.children()[0].children()[0]));
    assert!(std::ptr::eq(result.second_shape, &right.children()[0].children()[0]));

    let far_right = right.clone().with_position(Point2::new(0.0, 0.0));
    assert!(!left.intersects(&far_right));
}

#[test]
fn test_hit_box_against_hurt_boxes() {
    logging::init_for_tests();
    let mut world = CollisionWorld::new();

    let player = world.insert(
        Shape::group(vec![rect(0.0, 0.0, 2.0, 4.0), Shape::circle(1.0).with_position(Point2::new(0.0, 3.0))])
            .with_box_type(BoxType::HURT),
    );
    let blade = world.insert(rect(3.0, 3.0, 3.0, 0.5).with_box_type(BoxType::HIT));
    let other_blade = world.insert(rect(1.5, 3.0, 3.0, 0.5).with_box_type(BoxType::HIT));

    let contacts = world.update();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].pair, ContactPair::new(player, other_blade));
    assert!(!contacts[0].pair.contains(blade));

    world.get_mut(blade).unwrap().set_center(Point2::new(1.8, 3.0));
    world.update();
    assert_eq!(world.started(), vec![ContactPair::new(player, blade)]);
}
