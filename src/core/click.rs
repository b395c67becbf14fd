//! Synthesized fallback click.
//!
//! Used when the recorded click sample fails to load, so audible feedback is
//! never silently absent: a short noise burst with a linear attack over the
//! first tenth of the samples and a linear decay over the remainder.

pub const CLICK_SECONDS: f32 = 0.1;
pub const CLICK_ATTACK_FRACTION: f32 = 0.1;
pub const CLICK_PEAK_GAIN: f32 = 0.35; // reduced volume relative to the sample

/// Envelope value for sample `i` of `len`: strictly rising through the
/// attack, strictly falling afterwards, peaking at 1.0.
#[inline]
pub fn click_envelope(i: usize, len: usize) -> f32 {
    let attack = ((len as f32 * CLICK_ATTACK_FRACTION) as usize).max(1);
    if i < attack {
        (i + 1) as f32 / attack as f32
    } else {
        let tail = (len - attack).max(1) as f32;
        1.0 - (i - attack + 1) as f32 / (tail + 1.0)
    }
}

/// Generate the fallback click at the given output sample rate. Deterministic
/// xorshift32 noise shaped by `click_envelope`.
pub fn fallback_click_samples(sample_rate: f32) -> Vec<f32> {
    let len = ((sample_rate * CLICK_SECONDS) as usize).max(1);
    let mut seed: u32 = 0x1234_ABCD;
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let noise = (seed as f32 / u32::MAX as f32) * 2.0 - 1.0;
        out.push(noise * click_envelope(i, len) * CLICK_PEAK_GAIN);
    }
    out
}
