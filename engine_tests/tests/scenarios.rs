use engine_math::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

fn unit_box() -> BoundingBox {
    BoundingBox::new(Vec3::splat(-1.0), Vec3::ONE)
}

/// Box (0,0,0)-(2,2,2) fully contains its center and nothing past its max corner.
#[test]
fn box_contains_points() {
    let bbox = BoundingBox::new(Vec3::ZERO, Vec3::splat(2.0));
    assert_eq!(bbox.contains(&Vec3::ONE), Containment::Fully);
    assert_eq!(bbox.contains(&Vec3::splat(3.0)), Containment::None);
}

#[test]
fn sphere_contains_offset_sphere() {
    let outer = BoundingSphere::new(Vec3::ZERO, 5.0);
    let inner = BoundingSphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0);
    assert_eq!(outer.contains(&inner), Containment::Fully);
    assert!(outer.intersects(&inner));
}

#[test]
fn translation_moves_origin() {
    let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(m * Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn plane_classifies_points() {
    let ground = Plane::new(Vec3::UP, 0.0);
    assert_eq!(ground.intersect(Vec3::new(0.0, 5.0, 0.0)), IntersectionType::Front);
    assert_eq!(ground.intersect(Vec3::new(0.0, -5.0, 0.0)), IntersectionType::Back);
    assert_eq!(ground.intersect(Vec3::ZERO), IntersectionType::Intersect);
}

#[test]
fn ray_hits_box_ahead() {
    init_tracing();
    let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::UNIT_Z);
    assert!(ray.intersects(&unit_box()));
    assert!(unit_box().intersects(&ray));
    assert_eq!(ray.box_entry(&unit_box()), Some(4.0));
}

#[test]
fn ray_misses_box_behind() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::UNIT_Z);
    assert!(!ray.intersects(&unit_box()));
}

#[test]
fn ray_meets_ground_plane() {
    let ground = Plane::new(Vec3::UP, 0.0);
    let down = Ray::new(Vec3::new(3.0, 10.0, -2.0), Vec3::DOWN);
    assert_eq!(down.intersects(&ground), Some(Vec3::new(3.0, 0.0, -2.0)));

    let up = Ray::new(Vec3::new(3.0, 10.0, -2.0), Vec3::UP);
    assert_eq!(up.intersects(&ground), None);

    let flat = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::UNIT_X);
    assert_eq!(ground.intersects(&flat), None);
}

#[test]
fn crossing_rays_meet_once() {
    let a = Ray::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::UNIT_X);
    let b = Ray::new(Vec3::new(0.0, -2.0, 0.0), Vec3::UNIT_Y);
    let hit = a.intersects(&b).expect("rays cross at the origin");
    assert!(hit.equal_enough(Vec3::ZERO, 1e-5));

    let skew = Ray::new(Vec3::new(0.0, -2.0, 1.0), Vec3::UNIT_Y);
    assert!(a.intersects(&skew).is_none());
}

#[test]
fn two_planes_share_a_point() {
    let ground = Plane::new(Vec3::UP, 0.0);
    let wall = Plane::new(Vec3::UNIT_X, -2.0);
    let p = ground.intersects(&wall).expect("planes are not parallel");
    assert!(ground.signed_distance(p).abs() < 1e-5);
    assert!(wall.signed_distance(p).abs() < 1e-5);

    let raised = Plane::new(Vec3::UP, -1.0);
    assert!(ground.intersects(&raised).is_none());
}

#[test]
fn volumes_straddling_a_plane() {
    let ground = Plane::new(Vec3::UP, 0.0);
    assert!(unit_box().intersects(&ground));
    assert!(BoundingSphere::new(Vec3::ZERO, 1.0).intersects(&ground));

    let lifted = BoundingBox::new(Vec3::new(0.0, 2.0, 0.0), Vec3::splat(3.0));
    assert_eq!(ground.classify_box(&lifted), IntersectionType::Front);
    assert!(!ground.intersects(&lifted));
}

#[test]
fn volumes_below_a_plane_fall_in_its_half_space() {
    let ground = Plane::new(Vec3::UP, 0.0);
    let sphere = BoundingSphere::new(Vec3::new(0.0, -10.0, 0.0), 1.0);
    let bbox = BoundingBox::new(Vec3::new(-1.0, -12.0, -1.0), Vec3::new(1.0, -10.0, 1.0));
    assert_eq!(ground.classify_sphere(&sphere), IntersectionType::Back);
    assert_eq!(ground.classify_box(&bbox), IntersectionType::Back);
    assert!(sphere.intersects(&ground));
    assert!(bbox.intersects(&ground));
}

#[test]
fn rotated_box_stays_axis_aligned() {
    let spun = unit_box().transform(&Mat4::rotation_y(45.0));
    let reach = 2.0_f32.sqrt();
    assert!((spun.max.x - reach).abs() < 1e-5);
    assert!((spun.max.z - reach).abs() < 1e-5);
    assert!((spun.max.y - 1.0).abs() < 1e-6);
}

#[test]
fn camera_looks_down_negative_z() {
    let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
    let target_in_view = Vec3::ZERO.transform(&view);
    assert!(target_in_view.equal_enough(Vec3::new(0.0, 0.0, -5.0), 1e-5));
}

#[test]
fn rect_scenarios() {
    let r = Rect::new(0.0, 0.0, 10.0, 5.0);
    assert!(r.contains_point(Vec2::new(10.0, 5.0)));
    assert!(!r.contains_point(Vec2::new(10.5, 1.0)));
    assert_eq!(r.contains(&Rect::new(1.0, 1.0, 2.0, 2.0)), Containment::Fully);
    assert_eq!(r.contains(&Rect::new(8.0, 1.0, 4.0, 2.0)), Containment::Partial);
    assert_eq!(r.contains(&Rect::new(20.0, 1.0, 2.0, 2.0)), Containment::None);
    assert!(r.overlaps_circle(Vec2::new(12.0, 2.0), 2.5));
}
