#![cfg(target_arch = "wasm32")]
use crate::camera::Camera;
use crate::constants::*;
use crate::core::{Finish, KeycapSim, Pose, ShadowPose};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn scene_camera() -> Camera {
    Camera {
        eye: CAMERA_EYE,
        target: CAMERA_TARGET,
        up: Vec3::Y,
        fovy_radians: CAMERA_FOVY,
        znear: CAMERA_ZNEAR,
        zfar: CAMERA_ZFAR,
    }
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Build the click voice: the recorded sample when it loads, the synthesized
/// stand-in otherwise, or silence when WebAudio itself is unavailable.
async fn build_click_sound() -> Option<Rc<audio::ClickSound>> {
    let audio_ctx = match web::AudioContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("AudioContext error: {:?}", e);
            return None;
        }
    };
    let buffer = match assets::load_click_buffer(&audio_ctx, CLICK_SOUND_URL).await {
        Ok(b) => Some(b),
        Err(e) => {
            log::error!("[assets] {}; synthesizing fallback click", e);
            audio::fallback_click_buffer(&audio_ctx)
        }
    };
    buffer
        .and_then(|b| audio::ClickSound::new(&audio_ctx, b).ok())
        .map(Rc::new)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("keycap-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let canvas_inner = canvas.clone();
    let document_inner = document.clone();
    spawn_local(async move {
        let sound = build_click_sound().await;

        let camera = scene_camera();
        let mut gpu = frame::init_gpu(&canvas_inner, camera).await;

        let finish = Rc::new(RefCell::new(Finish::default()));
        let mut pick_radius = PICK_FALLBACK_RADIUS;
        match assets::load_key_model(KEY_MODEL_URL).await {
            Ok(model) => {
                pick_radius = model.bounding_radius().max(1e-3) * PICK_RADIUS_PADDING;
                if let Some(g) = gpu.as_mut() {
                    for f in Finish::ALL {
                        match assets::load_texture_pixels(f.spec().bump_texture).await {
                            Ok(px) => g.install_bump_texture(f, &px),
                            Err(e) => {
                                log::error!("[assets] {}; {} renders untextured", e, f.label())
                            }
                        }
                    }
                    g.upload_model(&model, *finish.borrow());
                }
            }
            Err(e) => {
                // The widget keeps running and renders only the backdrop
                log::error!("[assets] {}", e);
            }
        }

        let rest_pose = Pose {
            position: KEY_REST_POSITION,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        };
        let rest_shadow =
            ShadowPose::rest(SHADOW_REST_POSITION, SHADOW_REST_SCALE, SHADOW_REST_OPACITY);
        let sim = Rc::new(RefCell::new(KeycapSim::new(rest_pose, rest_shadow)));

        // Click counter lives with the composer; the animator only gets a
        // completion callback.
        let click_count = Rc::new(RefCell::new(0u32));
        overlay::update_counter(&document_inner, 0);
        let on_complete: Rc<dyn Fn()> = {
            let click_count = click_count.clone();
            let document = document_inner.clone();
            Rc::new(move || {
                let mut n = click_count.borrow_mut();
                *n += 1;
                overlay::update_counter(&document, *n);
            })
        };

        events::wire_pointer_handlers(events::PointerWiring {
            canvas: canvas_inner.clone(),
            camera,
            sim: sim.clone(),
            sound,
            hover: Rc::new(RefCell::new(false)),
            pick_center: KEY_REST_POSITION,
            pick_radius,
            on_complete,
        });
        events::wire_global_keydown(finish.clone());

        overlay::hide_loading(&document_inner);

        let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
            sim,
            finish,
            applied_finish: Finish::default(),
            canvas: canvas_inner.clone(),
            gpu,
        }));
        frame::start_loop(frame_ctx);
    });

    Ok(())
}
