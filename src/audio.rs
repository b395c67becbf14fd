use crate::core::click::fallback_click_samples;
use std::cell::RefCell;
use web_sys as web;

/// Mechanical travel time before the audible click.
pub const CLICK_TRAVEL_DELAY_SEC: f64 = 0.010;

pub const MASTER_GAIN: f32 = 0.8;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

/// Build the synthesized stand-in click when the recorded sample is
/// unavailable, so activation feedback is never silently absent.
pub fn fallback_click_buffer(audio_ctx: &web::AudioContext) -> Option<web::AudioBuffer> {
    let sr = audio_ctx.sample_rate();
    let mut samples = fallback_click_samples(sr);
    match audio_ctx.create_buffer(1, samples.len() as u32, sr) {
        Ok(buf) => {
            _ = buf.copy_to_channel(&mut samples, 0);
            Some(buf)
        }
        Err(e) => {
            log::error!("fallback click buffer error: {:?}", e);
            None
        }
    }
}

/// The click voice: one decoded (or synthesized) buffer and the currently
/// playing source, if any.
pub struct ClickSound {
    audio_ctx: web::AudioContext,
    gain: web::GainNode,
    buffer: web::AudioBuffer,
    current: RefCell<Option<web::AudioBufferSourceNode>>,
}

impl ClickSound {
    pub fn new(audio_ctx: &web::AudioContext, buffer: web::AudioBuffer) -> Result<Self, ()> {
        let gain = create_gain(audio_ctx, MASTER_GAIN, "Click")?;
        if let Err(e) = gain.connect_with_audio_node(&audio_ctx.destination()) {
            log::error!("connect error: {:?}", e);
            return Err(());
        }
        Ok(Self {
            audio_ctx: audio_ctx.clone(),
            gain,
            buffer,
            current: RefCell::new(None),
        })
    }

    /// Stop any playing instance, then restart from the beginning after the
    /// mechanical travel delay.
    pub fn play(&self) {
        // Contexts start suspended until a user gesture; play is only ever
        // called from one, so resume here.
        _ = self.audio_ctx.resume();
        if let Some(prev) = self.current.borrow_mut().take() {
            _ = prev.stop();
        }
        let src = match web::AudioBufferSourceNode::new(&self.audio_ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("AudioBufferSourceNode error: {:?}", e);
                return;
            }
        };
        src.set_buffer(Some(&self.buffer));
        if let Err(e) = src.connect_with_audio_node(&self.gain) {
            log::error!("connect error: {:?}", e);
            return;
        }
        let t0 = self.audio_ctx.current_time() + CLICK_TRAVEL_DELAY_SEC;
        _ = src.start_with_when(t0);
        *self.current.borrow_mut() = Some(src);
    }
}
