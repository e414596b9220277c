//! Browser timer helpers
//!
//! Thin wrappers over `setTimeout`/`clearTimeout`. The returned id lets a
//! caller cancel a pending callback; callers that never cancel can just
//! drop it.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Schedule `f` to run once after `ms` milliseconds.
///
/// The closure is handed to the JS side and reclaimed after it fires; a
/// cancelled timer leaks its closure, which only happens on explicit `stop`.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback = Closure::<dyn FnMut()>::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
}

/// Cancel a pending timer by id. Ids from already-fired timers are inert.
pub fn clear_timeout(id: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(id);
    }
}
