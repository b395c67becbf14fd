use crate::audio::ClickSound;
use crate::camera::Camera;
use crate::core::keycap::{KeycapSim, RELEASE_DELAY_MS};
use crate::dom;
use crate::input;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub camera: Camera,
    pub sim: Rc<RefCell<KeycapSim>>,
    /// None when WebAudio is unavailable; the widget stays silent but alive.
    pub sound: Option<Rc<ClickSound>>,
    pub hover: Rc<RefCell<bool>>,
    pub pick_center: Vec3,
    pub pick_radius: f32,
    /// Composer-supplied completion callback, invoked exactly once per
    /// accepted press.
    pub on_complete: Rc<dyn Fn()>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
}

fn picked(w: &PointerWiring, ev: &web::PointerEvent) -> bool {
    let pos = input::pointer_canvas_px(ev, &w.canvas);
    let (ro, rd) = w.camera.screen_to_world_ray(
        pos.x,
        pos.y,
        w.canvas.width() as f32,
        w.canvas.height() as f32,
    );
    input::ray_sphere(ro, rd, w.pick_center, w.pick_radius).is_some()
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let hit = picked(&w, &ev);
        let was = *w.hover.borrow();
        if hit != was {
            *w.hover.borrow_mut() = hit;
            dom::set_canvas_cursor(&w.canvas, if hit { "pointer" } else { "default" });
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // Re-pick at the event position; a tap may arrive without a
        // preceding move.
        if !picked(&w, &ev) {
            return;
        }
        activate(&w);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// The activation path: guarded press, completion callback, sound, and the
/// fire-and-forget release timer.
fn activate(w: &PointerWiring) {
    let accepted = w.sim.borrow_mut().press();
    if !accepted {
        log::warn!("[click] press ignored; one already in flight");
        return;
    }
    log::info!("[click] key pressed");
    (w.on_complete)();
    if let Some(sound) = &w.sound {
        sound.play();
    }
    schedule_release(w.sim.clone());
}

/// Never cancelled: the press guard, not timer bookkeeping, provides the
/// at-most-one-in-flight semantics, and `release` is idempotent.
fn schedule_release(sim: Rc<RefCell<KeycapSim>>) {
    let cb = Closure::once_into_js(move || {
        sim.borrow_mut().release();
    });
    if let Some(wnd) = web::window() {
        _ = wnd.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            RELEASE_DELAY_MS,
        );
    }
}
