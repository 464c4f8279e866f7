// Console logging helpers

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Warns with the JS error attached so the console shows its stack.
pub fn cwarn_js(msg: &str, err: &JsValue) {
    web_sys::console::warn_2(&JsValue::from_str(msg), err);
}
