// Host-side tests for scene constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_are_sane() {
    assert!(CAMERA_FOVY > 0.0 && CAMERA_FOVY < std::f32::consts::PI);
    assert!(CAMERA_ZNEAR > 0.0);
    assert!(CAMERA_ZFAR > CAMERA_ZNEAR);
    // The camera looks down at the key from above and in front
    assert!(CAMERA_EYE.y > CAMERA_TARGET.y);
    assert!(CAMERA_EYE.z > CAMERA_TARGET.z);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn shadow_and_picking_constants_are_sane() {
    assert!(SHADOW_REST_OPACITY > 0.0 && SHADOW_REST_OPACITY < 1.0);
    assert!(SHADOW_REST_POSITION.y > 0.0, "shadow must sit above the ground plane");
    assert!(SHADOW_REST_SCALE.x > 0.0 && SHADOW_REST_SCALE.z > 0.0);
    assert!(PICK_RADIUS_PADDING >= 1.0);
    assert!(PICK_FALLBACK_RADIUS > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lighting_constants_are_sane() {
    assert!(LIGHT_DIR.length() > 0.0);
    assert!(LIGHT_DIR.y < 0.0, "key light must shine downward");
    assert!(AMBIENT_LEVEL > 0.0 && AMBIENT_LEVEL < 1.0);
    for c in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&c));
    }
}

#[test]
fn asset_urls_are_relative_paths() {
    for url in [KEY_MODEL_URL, CLICK_SOUND_URL] {
        assert!(!url.is_empty());
        assert!(!url.starts_with('/'));
        assert!(!url.contains("://"));
    }
}
