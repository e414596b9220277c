//! Small DOM helpers shared by the clients

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// Look up a required element by id and downcast it.
pub fn require<T: JsCast>(doc: &Document, id: &str) -> Result<T, JsValue> {
    let element = doc
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

/// Set an element's inline display style.
pub fn set_display(element: &HtmlElement, value: &str) -> Result<(), JsValue> {
    element.style().set_property("display", value)
}
