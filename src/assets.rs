//! One-shot asset loads. A failure is terminal for the session: the caller
//! degrades (no bump texture, synthesized click, or an empty scene) and no
//! retry is attempted.

use crate::core::model::{parse_obj, KeyModel};
use crate::dom;
use js_sys::{ArrayBuffer, Promise};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("model load failed: {0}")]
    Model(String),
    #[error("texture load failed: {0}")]
    Texture(String),
    #[error("audio load failed: {0}")]
    Audio(String),
}

fn js_desc(v: JsValue) -> String {
    format!("{:?}", v)
}

async fn fetch_response(url: &str) -> Result<web::Response, String> {
    let window = web::window().ok_or_else(|| "no window".to_string())?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_desc)?;
    let resp: web::Response = resp.dyn_into().map_err(|_| "not a Response".to_string())?;
    if !resp.ok() {
        return Err(format!("{} -> HTTP {}", url, resp.status()));
    }
    Ok(resp)
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let resp = fetch_response(url).await?;
    let text = JsFuture::from(resp.text().map_err(js_desc)?)
        .await
        .map_err(js_desc)?;
    text.as_string()
        .ok_or_else(|| format!("{} returned a non-string body", url))
}

async fn fetch_array_buffer(url: &str) -> Result<ArrayBuffer, String> {
    let resp = fetch_response(url).await?;
    let buf = JsFuture::from(resp.array_buffer().map_err(js_desc)?)
        .await
        .map_err(js_desc)?;
    buf.dyn_into::<ArrayBuffer>()
        .map_err(|_| format!("{} returned a non-ArrayBuffer body", url))
}

/// Fetch and decode the keycap model. An OBJ without any faces counts as a
/// load failure (there is nothing to render).
pub async fn load_key_model(url: &str) -> Result<KeyModel, AssetError> {
    let text = fetch_text(url).await.map_err(AssetError::Model)?;
    parse_obj(&text).map_err(|e| AssetError::Model(e.to_string()))
}

/// Decoded RGBA pixels of a texture image.
pub struct TexturePixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode an image through an offscreen 2D canvas readback.
pub async fn load_texture_pixels(url: &str) -> Result<TexturePixels, AssetError> {
    let document = dom::window_document()
        .ok_or_else(|| AssetError::Texture("no document".to_string()))?;
    let img = web::HtmlImageElement::new()
        .map_err(|e| AssetError::Texture(js_desc(e)))?;
    let decoded = Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(url);
    JsFuture::from(decoded)
        .await
        .map_err(|_| AssetError::Texture(format!("{} failed to decode", url)))?;

    let (w, h) = (img.natural_width(), img.natural_height());
    if w == 0 || h == 0 {
        return Err(AssetError::Texture(format!("{} decoded to zero size", url)));
    }
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| AssetError::Texture(js_desc(e)))?
        .dyn_into()
        .map_err(|_| AssetError::Texture("canvas element cast failed".to_string()))?;
    canvas.set_width(w);
    canvas.set_height(h);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| AssetError::Texture(js_desc(e)))?
        .ok_or_else(|| AssetError::Texture("no 2d context".to_string()))?
        .dyn_into()
        .map_err(|_| AssetError::Texture("2d context cast failed".to_string()))?;
    ctx.draw_image_with_html_image_element(&img, 0.0, 0.0)
        .map_err(|e| AssetError::Texture(js_desc(e)))?;
    let data = ctx
        .get_image_data(0.0, 0.0, w as f64, h as f64)
        .map_err(|e| AssetError::Texture(js_desc(e)))?;
    Ok(TexturePixels {
        width: w,
        height: h,
        rgba: data.data().0,
    })
}

/// Fetch and decode the click sample into an AudioBuffer.
pub async fn load_click_buffer(
    audio_ctx: &web::AudioContext,
    url: &str,
) -> Result<web::AudioBuffer, AssetError> {
    let encoded = fetch_array_buffer(url).await.map_err(AssetError::Audio)?;
    let decoded = JsFuture::from(
        audio_ctx
            .decode_audio_data(&encoded)
            .map_err(|e| AssetError::Audio(js_desc(e)))?,
    )
    .await
    .map_err(|e| AssetError::Audio(js_desc(e)))?;
    decoded
        .dyn_into::<web::AudioBuffer>()
        .map_err(|_| AssetError::Audio("decode returned a non-buffer".to_string()))
}
