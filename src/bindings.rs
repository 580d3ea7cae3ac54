//! Low-level wasm-bindgen bindings to the Paystack inline checkout (`inline.js` v1).
//!
//! Exposes the raw `PaystackPop` global and the handler it returns from `setup`.
//! Higher-level wrappers live in `client.rs`.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    //------------------------------------------------------------------------------
    // Core Types
    //------------------------------------------------------------------------------

    /// Raw checkout handler returned by `PaystackPop.setup(...)`.
    #[wasm_bindgen(js_name = PaystackHandler)]
    #[derive(Debug, Clone)]
    pub type JsPaystackHandler;

    //------------------------------------------------------------------------------
    // Constructors
    //------------------------------------------------------------------------------

    /// Configure a checkout popup.
    ///
    /// ```js
    ///   const handler = PaystackPop.setup({ key, email, amount, currency, ref, onClose, callback });
    /// ```
    #[wasm_bindgen(catch, js_namespace = PaystackPop, js_name = setup)]
    pub fn setup(options: &JsValue) -> Result<JsPaystackHandler, JsValue>;

    //------------------------------------------------------------------------------
    // Instance Methods
    //------------------------------------------------------------------------------

    /// `handler.openIframe()` → `()`, displays the checkout modal
    #[wasm_bindgen(method, catch, js_name = openIframe)]
    pub fn open_iframe(this: &JsPaystackHandler) -> Result<(), JsValue>;
}
