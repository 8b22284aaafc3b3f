use glam::{Vec2, Vec3};
use glcam::matrix::{MatrixCalc, ViewPort};

fn assert_vec2_close(a: Vec2, b: Vec2, eps: f32) {
    assert!(
        (a - b).length() < eps,
        "expected {b:?}, got {a:?} (eps {eps})"
    );
}

fn looking_down_z() -> MatrixCalc {
    let mut mc = MatrixCalc::new();
    mc.calculate_model_matrix(
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, 100.0),
        Vec2::new(90.0, 0.0),
        0.0,
    );
    mc
}

#[test]
fn window_clip_roundtrip_with_offset_viewport() {
    let mut mc = MatrixCalc::new();
    mc.set_viewport(ViewPort::new(100.0, 50.0, 600.0, 400.0));

    // viewport centre lands on the clip origin
    let centre = Vec2::new(400.0, 250.0);
    assert_vec2_close(mc.window_to_clip(centre), Vec2::ZERO, 1e-5);

    // corners, y inverted between the two spaces
    assert_vec2_close(
        mc.window_to_clip(Vec2::new(100.0, 50.0)),
        Vec2::new(-1.0, 1.0),
        1e-5,
    );
    assert_vec2_close(
        mc.window_to_clip(Vec2::new(700.0, 450.0)),
        Vec2::new(1.0, -1.0),
        1e-5,
    );

    for w in [
        Vec2::new(100.0, 50.0),
        Vec2::new(250.5, 333.25),
        Vec2::new(699.0, 449.0),
    ] {
        assert_vec2_close(mc.clip_to_window(mc.window_to_clip(w)), w, 1e-3);
    }
}

#[test]
fn window_to_viewport_subtracts_origin() {
    let mut mc = MatrixCalc::new();
    mc.set_viewport(ViewPort::new(100.0, 50.0, 600.0, 400.0));
    assert_vec2_close(
        mc.window_to_viewport(Vec2::new(130.0, 90.0)),
        Vec2::new(30.0, 40.0),
        1e-6,
    );
}

#[test]
fn screen_coord_space_roundtrips() {
    let mut mc = MatrixCalc::new();
    mc.set_screen_coord_max(Vec2::new(1920.0, 1080.0));

    // clip origin maps to the middle of the overlay space, y down
    assert_vec2_close(
        mc.clip_to_screen_coord(Vec2::ZERO),
        Vec2::new(960.0, 540.0),
        1e-3,
    );
    assert_vec2_close(
        mc.clip_to_screen_coord(Vec2::new(-1.0, 1.0)),
        Vec2::ZERO,
        1e-3,
    );

    for s in [
        Vec2::new(0.0, 0.0),
        Vec2::new(333.0, 777.0),
        Vec2::new(1920.0, 1080.0),
    ] {
        assert_vec2_close(mc.clip_to_screen_coord(mc.screen_coord_to_clip(s)), s, 1e-2);
    }
}

#[test]
fn window_to_screen_coord_composes_both_mappings() {
    let mut mc = MatrixCalc::new();
    mc.resize_viewport(800, 600);
    mc.set_screen_coord_max(Vec2::new(1000.0, 1000.0));

    // full-window viewport: window centre is overlay centre
    assert_vec2_close(
        mc.window_to_screen_coord(Vec2::new(400.0, 300.0)),
        Vec2::new(500.0, 500.0),
        1e-2,
    );

    // and back through clip stays within a pixel
    let w = Vec2::new(123.0, 456.0);
    let back = mc.clip_to_window(mc.screen_coord_to_clip(mc.window_to_screen_coord(w)));
    assert_vec2_close(back, w, 1.0);
}

#[test]
fn look_at_handedness_follows_axis_convention() {
    let mut mc = looking_down_z();
    // right-handed: the look direction is -Z in view space
    let v = mc.model_matrix().transform_point3(Vec3::ZERO);
    assert!(v.z < 0.0, "rh view z should be negative, got {v:?}");

    mc.set_model_axis_positive_z_away(true);
    let v = mc.model_matrix().transform_point3(Vec3::ZERO);
    assert!(v.z > 0.0, "lh view z should be positive, got {v:?}");
}

#[test]
fn flip_y_mirrors_projected_points() {
    let mut mc = looking_down_z();
    let world = Vec3::new(5.0, 8.0, 0.0);
    let plain = mc.projection_model_matrix().project_point3(world);
    assert!(plain.y.abs() > 1e-4);

    mc.set_model_axis_flip_y(true);
    let flipped = mc.projection_model_matrix().project_point3(world);
    assert!((flipped.y + plain.y).abs() < 1e-5);
    assert!((flipped.x - plain.x).abs() < 1e-5);
}

#[test]
fn narrowing_fov_magnifies() {
    let mut mc = looking_down_z();
    let world = Vec3::new(5.0, 0.0, 0.0);
    let wide = mc.projection_model_matrix().project_point3(world);
    assert!(mc.fov_scale(true));
    let narrow = mc.projection_model_matrix().project_point3(world);
    assert!(narrow.x.abs() > wide.x.abs());
}

#[test]
fn fov_scale_refuses_steps_outside_range() {
    let mut mc = MatrixCalc::new();
    let mut widened = 0;
    while mc.fov_scale(false) {
        widened += 1;
        assert!(widened < 100, "fov widening never hit its cap");
    }
    let at_cap = mc.fov();
    assert!(!mc.fov_scale(false));
    assert_eq!(mc.fov(), at_cap);

    // narrowing is always accepted from the cap
    assert!(mc.fov_scale(true));
    assert!(mc.fov() < at_cap);
}

#[test]
fn orthographic_model_is_top_down() {
    let mut mc = MatrixCalc::new();
    mc.set_perspective_mode(false);
    assert!(!mc.in_perspective_mode());

    // heading is ignored in orthographic mode: same lookat plane position
    // and eye distance, different directions, identical model
    mc.calculate_model_matrix(
        Vec3::new(10.0, 0.0, 20.0),
        Vec3::new(10.0, 100.0, 20.0),
        Vec2::new(0.0, 0.0),
        0.0,
    );
    let a = mc.model_matrix();
    mc.calculate_model_matrix(
        Vec3::new(10.0, 0.0, 20.0),
        Vec3::new(10.0, 0.0, 120.0),
        Vec2::new(90.0, 45.0),
        0.0,
    );
    let b = mc.model_matrix();
    assert_eq!(a, b);
}

#[test]
fn orthographic_scale_tracks_eye_distance() {
    let mut mc = MatrixCalc::new();
    mc.set_perspective_mode(false);

    let probe = Vec3::new(10.0, 0.0, 0.0);
    mc.calculate_model_matrix(Vec3::ZERO, Vec3::new(0.0, 100.0, 0.0), Vec2::new(0.0, 0.0), 0.0);
    let near = mc.model_matrix().transform_point3(probe);
    mc.calculate_model_matrix(Vec3::ZERO, Vec3::new(0.0, 200.0, 0.0), Vec2::new(0.0, 0.0), 0.0);
    let far = mc.model_matrix().transform_point3(probe);

    // doubling the eye distance halves the mapped extent
    assert!(
        (near.x - 2.0 * far.x).abs() < 1e-3,
        "near {near:?} far {far:?}"
    );
}

#[test]
fn product_tracks_model_changes() {
    let mut mc = looking_down_z();
    let before = mc.projection_model_matrix();
    mc.calculate_model_matrix(
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(1.0, 2.0, 103.0),
        Vec2::new(90.0, 0.0),
        0.0,
    );
    let after = mc.projection_model_matrix();
    assert_ne!(before, after);
    assert_eq!(after, mc.projection_matrix() * mc.model_matrix());
}

#[test]
fn resize_changes_aspect() {
    let mut mc = looking_down_z();
    let p = mc
        .projection_model_matrix()
        .project_point3(Vec3::new(5.0, 0.0, 0.0));
    mc.resize_viewport(1600, 600);
    assert_eq!(mc.screen_size(), Vec2::new(1600.0, 600.0));
    let q = mc
        .projection_model_matrix()
        .project_point3(Vec3::new(5.0, 0.0, 0.0));
    // wider window, smaller normalised x
    assert!(q.x.abs() < p.x.abs());
}

#[test]
fn projected_points_stay_finite() {
    let mut mc = looking_down_z();
    for p in [
        Vec3::ZERO,
        Vec3::new(1e4, -1e4, 1e4),
        Vec3::new(-0.001, 0.002, 50.0),
    ] {
        let c = mc.projection_model_matrix().project_point3(p);
        assert!(c.is_finite(), "perspective projected {p:?} to {c:?}");
    }
    mc.set_perspective_mode(false);
    for p in [Vec3::ZERO, Vec3::new(1e4, -1e4, 1e4)] {
        let c = mc.projection_model_matrix().project_point3(p);
        assert!(c.is_finite(), "orthographic projected {p:?} to {c:?}");
    }
}
