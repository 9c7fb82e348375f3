use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Current `location.search`, including the leading `?` when present.
pub fn location_search() -> Result<String, JsValue> {
    window()?.location().search()
}

/// Calls `on_change` on every `popstate` for the lifetime of the page.
pub fn on_popstate(mut on_change: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        on_change();
    });
    window()?
        .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
    // The listener lives as long as the page.
    closure.forget();
    Ok(())
}

pub fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}
