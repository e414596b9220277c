//! Copy-to-clipboard wiring for the link panel
//!
//! Click reads the trimmed invite URL from the input, writes it to the
//! system clipboard, and runs the two-stage icon swap: check icon shown
//! immediately, success message hidden after 1.5 s, copy icon restored
//! after 2 s.

use crate::dom;
use crate::timer;
use tracing::{debug, error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

const SUCCESS_HIDE_MS: i32 = 1500;
const ICON_REVERT_MS: i32 = 2000;

/// Bind the click handler to `copyButton`.
pub fn wire_copy_button(doc: &Document) -> Result<(), JsValue> {
    let input: HtmlInputElement = dom::require(doc, "urlInput")?;
    let button: Element = dom::require(doc, "copyButton")?;
    let copy_icon: HtmlElement = dom::require(doc, "copyIcon")?;
    let check_icon: HtmlElement = dom::require(doc, "checkIcon")?;
    let success: HtmlElement = dom::require(doc, "copySuccess")?;

    let on_click = Closure::wrap(Box::new(move || {
        let url = input.value().trim().to_string();
        if url.is_empty() {
            debug!("Copy clicked with empty input, ignoring");
            return;
        }

        let copy_icon = copy_icon.clone();
        let check_icon = check_icon.clone();
        let success = success.clone();
        spawn_local(async move {
            let clipboard = match web_sys::window() {
                Some(window) => window.navigator().clipboard(),
                None => return,
            };
            match JsFuture::from(clipboard.write_text(&url)).await {
                Ok(_) => {
                    debug!(url = %url, "Link copied to clipboard");
                    show_copied(&copy_icon, &check_icon, &success);
                }
                Err(e) => {
                    // Permission denied or no clipboard access; the page
                    // shows no feedback for this.
                    error!(?e, "Clipboard write failed");
                }
            }
        });
    }) as Box<dyn FnMut()>);

    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Icon swap after a successful copy. The revert timers are
/// fire-and-forget.
fn show_copied(copy_icon: &HtmlElement, check_icon: &HtmlElement, success: &HtmlElement) {
    if let Err(e) = dom::set_display(copy_icon, "none")
        .and_then(|_| dom::set_display(check_icon, "block"))
        .and_then(|_| dom::set_display(success, "block"))
    {
        warn!(?e, "Failed to swap copy icons");
    }

    let success = success.clone();
    let _ = timer::set_timeout(SUCCESS_HIDE_MS, move || {
        let _ = dom::set_display(&success, "none");
    });

    let copy_icon = copy_icon.clone();
    let check_icon = check_icon.clone();
    let _ = timer::set_timeout(ICON_REVERT_MS, move || {
        let _ = dom::set_display(&check_icon, "none");
        let _ = dom::set_display(&copy_icon, "block");
    });
}
