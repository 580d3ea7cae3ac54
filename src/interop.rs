//! Custom Yew hook to load the Paystack inline checkout at runtime (no inline JS).
//!
//! # Overview
//! This hook, `use_paystackjs()`, injects a single
//! `<script id="paystack-inline-js" src="https://js.paystack.co/v1/inline.js" defer>`
//! into `<head>` on first use, returns `false` until the
//! script's `load` event fires, then returns `true`
//! on every subsequent call.
//!
//! # Usage
//! ```rust,ignore
//! use yew::prelude::*;
//! use yew_paystack::use_paystackjs;
//!
//! #[function_component(App)]
//! fn app() -> Html {
//!     let paystack_ready = use_paystackjs();
//!     html! {
//!         if paystack_ready {
//!             <p>{"Checkout ready"}</p>
//!         } else {
//!             <p>{"Loading checkout..."}</p>
//!         }
//!     }
//! }
//! ```

use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{Document, HtmlScriptElement};
use yew::functional::hook;
use yew::prelude::*;

pub const PAYSTACK_SCRIPT_ID: &str = "paystack-inline-js";
pub const PAYSTACK_SCRIPT_SRC: &str = "https://js.paystack.co/v1/inline.js";

/// Whether `window.PaystackPop` is already defined.
pub fn paystack_loaded() -> bool {
    web_sys::window()
        .and_then(|win| Reflect::has(&win, &JsValue::from_str("PaystackPop")).ok())
        .unwrap_or(false)
}

/// What the hook has to do to get the checkout script running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptAction {
    /// `PaystackPop` is already defined.
    Ready,
    /// No tag yet; append one.
    Inject,
    /// Another form already appended the tag; wait for its `load` event.
    AwaitExisting,
}

pub fn script_action(already_loaded: bool, tag_present: bool) -> ScriptAction {
    match (already_loaded, tag_present) {
        (true, _) => ScriptAction::Ready,
        (false, false) => ScriptAction::Inject,
        (false, true) => ScriptAction::AwaitExisting,
    }
}

/// Custom hook: load the Paystack inline script exactly once and track readiness.
///
/// Every form instance on the page shares the one `<script>` tag; a form that
/// mounts while the script is still loading listens on the existing tag.
///
/// # Returns
/// - `false` while the `<script>` is being fetched & parsed.
/// - `true` once `window.PaystackPop` exists.
#[hook]
pub fn use_paystackjs() -> bool {
    let loaded = use_state(paystack_loaded);

    {
        let loaded = loaded.clone();
        use_effect_with((), move |_| {
            if !*loaded {
                if let Err(err) = load_script(move || loaded.set(true)) {
                    log::warn!("could not load the Paystack checkout script: {err:?}");
                }
            }
            || ()
        });
    }

    *loaded
}

/// Make sure the checkout `<script>` is in `<head>` and call `on_load` once it has run.
fn load_script(on_load: impl Fn() + 'static) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|win| win.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let existing = document.get_element_by_id(PAYSTACK_SCRIPT_ID);

    match script_action(paystack_loaded(), existing.is_some()) {
        ScriptAction::Ready => {
            on_load();
            Ok(())
        }
        ScriptAction::AwaitExisting => {
            let Some(script) = existing else {
                return Ok(());
            };
            let listener = Closure::wrap(Box::new(on_load) as Box<dyn Fn()>);
            script.add_event_listener_with_callback("load", listener.as_ref().unchecked_ref())?;
            listener.forget();
            Ok(())
        }
        ScriptAction::Inject => inject_script(&document, on_load),
    }
}

fn inject_script(document: &Document, on_load: impl Fn() + 'static) -> Result<(), JsValue> {
    let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_id(PAYSTACK_SCRIPT_ID);
    script.set_src(PAYSTACK_SCRIPT_SRC);
    script.set_defer(true);

    let onload_closure = Closure::wrap(Box::new(on_load) as Box<dyn Fn()>);
    script.set_onload(Some(onload_closure.as_ref().unchecked_ref()));
    // Lives until the load event; the script tag is never removed.
    onload_closure.forget();

    document
        .head()
        .ok_or_else(|| JsValue::from_str("head missing"))?
        .append_child(&script)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_second_form_waits_on_the_existing_tag() {
        assert_eq!(script_action(false, true), ScriptAction::AwaitExisting);
        assert_eq!(script_action(false, false), ScriptAction::Inject);
        assert_eq!(script_action(true, true), ScriptAction::Ready);
        assert_eq!(script_action(true, false), ScriptAction::Ready);
    }
}
