//! Error types for the donation flow.
//!
//! The `Display` text of every [`DonationError`] is the notice shown to the donor.

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DonationError {
    #[error("Payment configuration error. Please contact the administrator.")]
    MissingPublicKey,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Unable to open the payment window: {0}")]
    Gateway(#[from] GatewayError),
}

impl DonationError {
    /// Configuration problems are for operators; the rest are the donor's to fix.
    pub fn is_configuration(&self) -> bool {
        matches!(self, DonationError::MissingPublicKey)
    }
}

/// Representation of an error raised by the checkout widget.
#[derive(Debug, Error, Clone, PartialEq, Deserialize)]
#[error("{message}")]
pub struct GatewayError {
    /// Human-readable message.
    pub message: String,
    /// Optional widget error code.
    #[serde(default)]
    pub code: Option<String>,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        GatewayError {
            message: message.into(),
            code: None,
        }
    }

    /// Convert any caught `JsValue` into a `GatewayError` with best effort.
    pub fn from_js(value: JsValue) -> Self {
        serde_wasm_bindgen::from_value::<GatewayError>(value.clone()).unwrap_or_else(|_| {
            GatewayError::new(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
        })
    }
}

pub type Result<T> = std::result::Result<T, DonationError>;
