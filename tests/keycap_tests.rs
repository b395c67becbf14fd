// Host-side tests for the press/release animation policy.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keycap {
    include!("../src/core/keycap.rs");
}

use glam::Vec3;
use keycap::*;

fn rest_shadow() -> ShadowPose {
    ShadowPose::rest(
        Vec3::new(0.0, 0.003, 0.0),
        Vec3::new(1.35, 1.0, 1.35),
        0.35,
    )
}

fn make_sim() -> KeycapSim {
    KeycapSim::new(Pose::identity(), rest_shadow())
}

#[test]
fn press_is_accepted_only_when_idle() {
    let mut sim = make_sim();
    assert_eq!(sim.state(), PressState::Idle);
    assert!(sim.press(), "first press must be accepted");
    assert_eq!(sim.state(), PressState::Pressed);
    assert!(!sim.press(), "re-entrant press must be rejected");
    sim.release();
    assert_eq!(sim.state(), PressState::Idle);
    assert!(sim.press(), "press after release must be accepted again");
}

#[test]
fn rapid_presses_accept_exactly_one() {
    // Three activations in quick succession (all before the release timer):
    // only the first may be accepted, so callback/sound/timer fire once.
    let mut sim = make_sim();
    let accepted = [sim.press(), sim.press(), sim.press()];
    assert_eq!(accepted.iter().filter(|a| **a).count(), 1);
}

#[test]
fn release_is_idempotent() {
    let mut sim = make_sim();
    sim.release(); // stray timer firing against an idle key
    assert_eq!(sim.state(), PressState::Idle);
    assert!(sim.press());
    sim.release();
    sim.release();
    assert_eq!(sim.state(), PressState::Idle);
}

#[test]
fn pressed_phase_is_monotone_and_clamped() {
    let mut sim = make_sim();
    assert!(sim.press());
    let mut prev = sim.pose();
    for _ in 0..60 {
        sim.step();
        let p = sim.pose();
        assert!(p.scale.y <= prev.scale.y, "press-axis scale must not grow");
        assert!(p.scale.y >= PRESS_SCALE_FLOOR - 1e-6);
        assert!(p.position.y <= prev.position.y + 1e-7);
        assert!(p.position.y >= -PRESS_DROP_LIMIT - 1e-6);
        assert!(p.rotation.x >= prev.rotation.x - 1e-7);
        assert!(p.rotation.x <= PRESS_TILT_LIMIT + 1e-6);
        prev = p;
    }
}

#[test]
fn pressed_phase_reaches_limits_in_bounded_ticks() {
    let mut sim = make_sim();
    assert!(sim.press());
    // ceil(0.35 / 0.04) = 9 ticks to the scale floor, 8 to the position
    // floor, 6 to the tilt ceiling
    for _ in 0..9 {
        sim.step();
    }
    let p = sim.pose();
    assert!((p.scale.y - PRESS_SCALE_FLOOR).abs() < 1e-6);
    assert!((p.position.y + PRESS_DROP_LIMIT).abs() < 1e-6);
    assert!((p.rotation.x - PRESS_TILT_LIMIT).abs() < 1e-6);
}

#[test]
fn idle_easing_converges_without_overshoot() {
    let mut sim = make_sim();
    assert!(sim.press());
    for _ in 0..12 {
        sim.step();
    }
    sim.release();

    let mut prev = sim.pose();
    for _ in 0..400 {
        sim.step();
        let p = sim.pose();
        // Strictly shrinking distance to rest while visibly away from it
        for (now, before) in [
            (p.position.y.abs(), prev.position.y.abs()),
            (p.rotation.x.abs(), prev.rotation.x.abs()),
            ((p.scale.y - 1.0).abs(), (prev.scale.y - 1.0).abs()),
        ] {
            if before > 1e-5 {
                assert!(now < before, "distance to rest must shrink every tick");
            } else {
                assert!(now <= before + 1e-7);
            }
        }
        // Never crosses the rest value
        assert!(p.position.y <= 1e-7);
        assert!(p.rotation.x >= -1e-7);
        assert!(p.scale.y <= 1.0 + 1e-6);
        prev = p;
    }
    let p = sim.pose();
    assert!(p.position.y.abs() < 1e-3, "position must be visually at rest");
    assert!(p.rotation.x.abs() < 1e-3);
    assert!((p.scale.y - 1.0).abs() < 1e-3);
}

#[test]
fn shadow_snaps_while_pressed() {
    let mut sim = make_sim();
    assert!(sim.press());
    sim.step();
    let s = sim.shadow();
    let rest = rest_shadow();
    assert_eq!(s.opacity, SHADOW_PRESSED_OPACITY);
    assert!((s.scale.x - rest.scale.x * SHADOW_PRESSED_SCALE).abs() < 1e-6);
    assert!((s.scale.z - rest.scale.z * SHADOW_PRESSED_SCALE).abs() < 1e-6);
    assert!((s.position - (rest.position + SHADOW_PRESSED_OFFSET)).length() < 1e-6);
    // Snapped, not eased: a second tick changes nothing
    sim.step();
    assert_eq!(sim.shadow(), s);
}

#[test]
fn shadow_eases_back_toward_rest() {
    let mut sim = make_sim();
    assert!(sim.press());
    for _ in 0..5 {
        sim.step();
    }
    sim.release();
    let rest = rest_shadow();
    let mut prev = sim.shadow();
    for _ in 0..300 {
        sim.step();
        let s = sim.shadow();
        let d_now = (s.opacity - rest.opacity).abs();
        let d_before = (prev.opacity - rest.opacity).abs();
        if d_before > 1e-5 {
            assert!(d_now < d_before);
        }
        prev = s;
    }
    assert!((prev.opacity - rest.opacity).abs() < 1e-3);
    assert!((prev.scale.x - rest.scale.x).abs() < 1e-3);
}

#[test]
fn next_pose_is_pure_over_its_inputs() {
    let rest = Pose::identity();
    let start = Pose {
        position: Vec3::new(0.0, -0.1, 0.0),
        rotation: Vec3::new(0.02, 0.0, 0.0),
        scale: Vec3::new(1.0, 0.8, 1.0),
    };
    let a = next_pose(start, &rest, PressState::Pressed);
    let b = next_pose(start, &rest, PressState::Pressed);
    assert_eq!(a, b);
    // The input is untouched
    assert_eq!(start.scale.y, 0.8);
}
