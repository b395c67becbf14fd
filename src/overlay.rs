use crate::constants::{COUNTER_ID, HINT_ID, LOADING_ID};
use web_sys as web;

/// Rewrite the click-counter overlay.
pub fn update_counter(document: &web::Document, count: u32) {
    if let Some(el) = document.get_element_by_id(COUNTER_ID) {
        let html = format!(
            "<div style='color: #cfe7ff; font: 14px system-ui; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>Clicks: {}</div>",
            count
        );
        el.set_inner_html(&html);
    }
}

/// Show the current finish name after a keyboard change.
pub fn update_finish_hint(document: &web::Document, finish_label: &str) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        let html = format!(
            "<div style='color: #cfe7ff; font: 13px system-ui; background: rgba(10, 14, 24, 0.8); padding: 6px 10px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>Finish: {}</div>",
            finish_label
        );
        el.set_inner_html(&html);
        _ = el.set_attribute("style", "");
    }
}

/// Hide the loading overlay once the scene is up.
pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "display:none");
    }
}
