// Host-side tests for the synthesized fallback click.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod click {
    include!("../src/core/click.rs");
}

use click::*;

#[test]
fn fallback_click_is_about_100ms() {
    let sr = 44_100.0;
    let samples = fallback_click_samples(sr);
    let seconds = samples.len() as f32 / sr;
    assert!((seconds - CLICK_SECONDS).abs() < 0.001, "got {seconds}s");
}

#[test]
fn envelope_rises_strictly_through_the_attack() {
    let len = 4410;
    let attack = len / 10;
    for i in 0..attack - 1 {
        assert!(
            click_envelope(i, len) < click_envelope(i + 1, len),
            "attack must rise strictly at sample {i}"
        );
    }
    assert!((click_envelope(attack - 1, len) - 1.0).abs() < 1e-6);
}

#[test]
fn envelope_decays_strictly_after_the_attack() {
    let len = 4410;
    let attack = len / 10;
    for i in attack..len - 1 {
        assert!(
            click_envelope(i, len) > click_envelope(i + 1, len),
            "decay must fall strictly at sample {i}"
        );
    }
    assert!(click_envelope(len - 1, len) > 0.0);
    assert!(click_envelope(len - 1, len) < 0.01);
}

#[test]
fn samples_stay_within_the_reduced_volume() {
    let samples = fallback_click_samples(48_000.0);
    assert!(samples.iter().all(|s| s.abs() <= CLICK_PEAK_GAIN + 1e-6));
    // Noise, not silence
    assert!(samples.iter().any(|s| s.abs() > CLICK_PEAK_GAIN * 0.2));
}

#[test]
fn synthesis_is_deterministic() {
    assert_eq!(fallback_click_samples(44_100.0), fallback_click_samples(44_100.0));
}

#[test]
fn tiny_sample_rates_still_produce_a_buffer() {
    assert!(!fallback_click_samples(8.0).is_empty());
}
