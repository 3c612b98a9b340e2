//! Browser entry point: boots the hero scene on the landing page's canvas.

use wasm_bindgen::prelude::*;

use crate::shell::SCENE_CANVAS_ID;
use crate::viewer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }

    viewer::spawn_in_canvas(SCENE_CANVAS_ID).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("Hero scene attached to #{}", SCENE_CANVAS_ID);
    Ok(())
}
