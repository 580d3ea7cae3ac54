//! High-level Rust API over the Paystack inline checkout.
//!
//! This module provides:
//! - `PaymentGateway`, the capability the donation flow calls to open a checkout.
//! - `CheckoutHandlers` carrying the `onClose` and completion callbacks of one attempt.
//! - `CheckoutResponse`, the typed payload Paystack reports on completion.
//! - `PaystackGateway`, the browser implementation backed by `PaystackPop`.
//! - `GatewayHandle`, a prop-friendly wrapper so a test double can be injected.
//!
//! # Example Usage
//! ```rust,ignore
//! use yew_paystack::{CheckoutHandlers, PaymentGateway, PaystackGateway};
//!
//! let handlers = CheckoutHandlers::new(
//!     || log::info!("payment window closed"),
//!     |response| log::info!("paid: {}", response.reference),
//! );
//! PaystackGateway.open_checkout("pk_test_…", &request, handlers)?;
//! ```

use std::fmt;
use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;

use crate::bindings::setup;
use crate::config::Currency;
use crate::donation::PaymentRequest;
use crate::error::GatewayError;
use crate::interop::paystack_loaded;

/// Payload passed to `PaystackPop.setup(...)`, minus the two callbacks.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PaystackSetupOptions {
    /// Public key (`pk_…`).
    pub key: String,
    pub email: String,
    /// Amount in kobo.
    pub amount: u64,
    pub currency: Currency,
    /// Unique transaction reference for this attempt.
    #[serde(rename = "ref")]
    pub reference: String,
}

impl PaystackSetupOptions {
    pub fn new(public_key: &str, request: &PaymentRequest) -> Self {
        PaystackSetupOptions {
            key: public_key.to_string(),
            email: request.email.clone(),
            amount: request.amount_minor,
            currency: request.currency,
            reference: request.reference.clone(),
        }
    }
}

/// What the widget reports when a transaction completes.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CheckoutResponse {
    /// The reference the transaction was settled under.
    pub reference: String,
    /// e.g. `"success"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub transaction: Option<String>,
    /// Fields this crate does not interpret (`trxref`, `redirecturl`, …).
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl CheckoutResponse {
    pub fn with_reference(reference: impl Into<String>) -> Self {
        CheckoutResponse {
            reference: reference.into(),
            ..Default::default()
        }
    }
}

/// Callbacks of a single checkout attempt. Exactly one of them is expected to run.
pub struct CheckoutHandlers {
    pub on_close: Box<dyn FnOnce()>,
    pub on_complete: Box<dyn FnOnce(CheckoutResponse)>,
}

impl CheckoutHandlers {
    pub fn new(
        on_close: impl FnOnce() + 'static,
        on_complete: impl FnOnce(CheckoutResponse) + 'static,
    ) -> Self {
        CheckoutHandlers {
            on_close: Box::new(on_close),
            on_complete: Box::new(on_complete),
        }
    }
}

impl fmt::Debug for CheckoutHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutHandlers").finish_non_exhaustive()
    }
}

/// A hosted checkout that can be opened for one payment request.
pub trait PaymentGateway {
    /// Display the checkout UI. Returns once the widget is open; the outcome
    /// arrives later through `handlers`.
    fn open_checkout(
        &self,
        public_key: &str,
        request: &PaymentRequest,
        handlers: CheckoutHandlers,
    ) -> Result<(), GatewayError>;
}

/// [`PaymentGateway`] backed by `window.PaystackPop`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaystackGateway;

impl PaymentGateway for PaystackGateway {
    fn open_checkout(
        &self,
        public_key: &str,
        request: &PaymentRequest,
        handlers: CheckoutHandlers,
    ) -> Result<(), GatewayError> {
        if !paystack_loaded() {
            return Err(GatewayError::new("Paystack checkout script is not loaded"));
        }

        // 1) Serialize the plain options → JS object
        let options = PaystackSetupOptions::new(public_key, request);
        let opts_js = to_value(&options).map_err(|e| GatewayError::new(e.to_string()))?;

        // 2) Attach the callbacks; each closure frees itself when invoked
        let CheckoutHandlers {
            on_close,
            on_complete,
        } = handlers;
        let fallback_reference = request.reference.clone();
        let on_close_js = Closure::once_into_js(move || on_close());
        let callback_js = Closure::once_into_js(move |response: JsValue| {
            on_complete(parse_response(&response, &fallback_reference))
        });
        Reflect::set(&opts_js, &JsValue::from_str("onClose"), &on_close_js)
            .map_err(GatewayError::from_js)?;
        Reflect::set(&opts_js, &JsValue::from_str("callback"), &callback_js)
            .map_err(GatewayError::from_js)?;

        // 3) PaystackPop.setup(...).openIframe()
        let handler = setup(&opts_js).map_err(GatewayError::from_js)?;
        handler.open_iframe().map_err(GatewayError::from_js)
    }
}

/// Read the completion payload, falling back to the attempt's own reference.
fn parse_response(value: &JsValue, fallback_reference: &str) -> CheckoutResponse {
    match value.into_serde::<CheckoutResponse>() {
        Ok(response) if !response.reference.is_empty() => response,
        Ok(response) => CheckoutResponse {
            reference: fallback_reference.to_string(),
            ..response
        },
        Err(err) => {
            log::warn!("unexpected checkout response shape: {err}");
            CheckoutResponse::with_reference(fallback_reference)
        }
    }
}

/// Shared gateway that can travel through Yew props.
#[derive(Clone)]
pub struct GatewayHandle(pub Rc<dyn PaymentGateway>);

impl GatewayHandle {
    pub fn new(gateway: impl PaymentGateway + 'static) -> Self {
        GatewayHandle(Rc::new(gateway))
    }
}

impl Default for GatewayHandle {
    fn default() -> Self {
        GatewayHandle::new(PaystackGateway)
    }
}

impl PartialEq for GatewayHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for GatewayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GatewayHandle").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: 2500.0,
            amount_minor: 250_000,
            email: "donor@example.com".into(),
            currency: Currency::Ngn,
            reference: "adenike-iftar-1".into(),
        }
    }

    #[test]
    fn setup_options_use_paystack_field_names() {
        let options = PaystackSetupOptions::new("pk_test_abc", &request());
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["key"], "pk_test_abc");
        assert_eq!(json["amount"], 250_000);
        assert_eq!(json["currency"], "NGN");
        assert_eq!(json["ref"], "adenike-iftar-1");
        assert!(json.get("reference").is_none());
    }

    #[test]
    fn checkout_response_keeps_unknown_fields() {
        let response: CheckoutResponse = serde_json::from_str(
            r#"{"reference":"abc123","status":"success","trxref":"abc123","trans":"42"}"#,
        )
        .unwrap();
        assert_eq!(response.reference, "abc123");
        assert_eq!(response.status.as_deref(), Some("success"));
        assert_eq!(response.extra["trxref"], "abc123");
    }

    #[test]
    fn gateway_handles_compare_by_identity() {
        let a = GatewayHandle::new(PaystackGateway);
        let b = GatewayHandle::new(PaystackGateway);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
