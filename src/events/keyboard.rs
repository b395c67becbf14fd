use crate::core::material::{finish_for_key, Finish};
use crate::dom;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Global keydown wiring: number or letter keys select the cap finish. The
/// frame loop applies the change to the GPU materials on its next tick.
pub fn wire_global_keydown(finish: Rc<RefCell<Finish>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let key = ev.key();
        let Some(selected) = finish_for_key(&key) else {
            return;
        };
        if *finish.borrow() == selected {
            return;
        }
        *finish.borrow_mut() = selected;
        log::info!("[keys] finish -> {}", selected.label());
        if let Some(doc) = dom::window_document() {
            overlay::update_finish_hint(&doc, selected.label());
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
