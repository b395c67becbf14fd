// Host-side tests for the picking camera.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod camera {
    include!("../src/camera.rs");
}

use camera::Camera;
use glam::Vec3;

fn scene_camera() -> Camera {
    Camera {
        eye: Vec3::new(0.0, 1.15, 2.4),
        target: Vec3::new(0.0, 0.18, 0.0),
        up: Vec3::Y,
        fovy_radians: std::f32::consts::FRAC_PI_4,
        znear: 0.1,
        zfar: 100.0,
    }
}

#[test]
fn center_ray_points_at_the_target() {
    let cam = scene_camera();
    let (origin, dir) = cam.screen_to_world_ray(640.0, 360.0, 1280.0, 720.0);
    assert_eq!(origin, cam.eye);
    let expected = (cam.target - cam.eye).normalize();
    assert!(
        dir.dot(expected) > 0.9999,
        "center ray {dir:?} should look at the target"
    );
}

#[test]
fn rays_diverge_across_the_screen() {
    let cam = scene_camera();
    let (_, left) = cam.screen_to_world_ray(0.0, 360.0, 1280.0, 720.0);
    let (_, right) = cam.screen_to_world_ray(1280.0, 360.0, 1280.0, 720.0);
    assert!(left.dot(right) < 0.999);
    assert!(left.x < 0.0 && right.x > 0.0);
}

#[test]
fn ray_direction_is_normalized() {
    let cam = scene_camera();
    for (sx, sy) in [(0.0, 0.0), (333.0, 17.0), (1280.0, 720.0)] {
        let (_, dir) = cam.screen_to_world_ray(sx, sy, 1280.0, 720.0);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn view_matrix_places_the_eye_at_the_origin() {
    let cam = scene_camera();
    let eye_view = cam.view_matrix().transform_point3(cam.eye);
    assert!(eye_view.length() < 1e-5);
}
