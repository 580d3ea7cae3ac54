//! Donation data model: preset tiers, donor input validation and the
//! payment request handed to the checkout widget.

use std::cell::Cell;

use crate::config::Currency;
use crate::error::{DonationError, Result};

/// One preset donation tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonationOption {
    /// Whole naira, before any kobo conversion.
    pub amount: u32,
    pub label: String,
}

impl DonationOption {
    pub fn new(amount: u32, label: impl Into<String>) -> Self {
        DonationOption {
            amount,
            label: label.into(),
        }
    }
}

/// The three tiers offered on the Iftar page.
pub fn default_options() -> Vec<DonationOption> {
    vec![
        DonationOption::new(500, "Feed 1 soul → ₦500"),
        DonationOption::new(2500, "Feed 5 souls → ₦2,500"),
        DonationOption::new(100000, "Sponsor an entire day → ₦100,000"),
    ]
}

/// Everything the checkout widget needs for one attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentRequest {
    /// Major units, exactly as selected or typed.
    pub amount: f64,
    /// `amount` in the currency's minor unit (kobo for NGN).
    pub amount_minor: u64,
    pub email: String,
    pub currency: Currency,
    pub reference: String,
}

/// Parse the free-form amount field the way a browser `Number()` would for
/// plain decimal input: blank is zero, garbage is NaN.
pub fn parse_custom_amount(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Largest integer a JS `Number` holds exactly (`Number.MAX_SAFE_INTEGER`).
pub const MAX_SAFE_MINOR_UNITS: u64 = (1 << 53) - 1;

/// Convert a major-unit amount to minor units, rounding to the nearest unit.
///
/// `None` when the result is not a whole number the checkout can receive.
pub fn to_minor_units(amount: f64, currency: Currency) -> Option<u64> {
    let minor = (amount * currency.minor_units() as f64).round();
    if !minor.is_finite() || minor < 0.0 || minor > MAX_SAFE_MINOR_UNITS as f64 {
        return None;
    }
    Some(minor as u64)
}

/// The amount must be finite, positive, worth at least one minor unit and
/// small enough to pass to the checkout without losing precision.
pub fn validate_amount(amount: f64, currency: Currency) -> Result<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DonationError::InvalidAmount);
    }
    match to_minor_units(amount, currency) {
        None | Some(0) => Err(DonationError::InvalidAmount),
        Some(minor) => Ok(minor),
    }
}

/// Minimal syntactic check: non-empty and contains `@`.
pub fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DonationError::InvalidEmail);
    }
    Ok(email.to_string())
}

/// Notice shown once the widget reports a completed payment.
pub fn success_message(reference: &str) -> String {
    format!(
        "Donation successful! May Allah accept your charity and multiply it. Reference: {reference}"
    )
}

/// Produces `"{prefix}-{unix_millis}"` references, bumped forward when two
/// attempts land on the same millisecond.
#[derive(Debug)]
pub struct ReferenceGenerator {
    prefix: String,
    last: Cell<u64>,
}

impl ReferenceGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        ReferenceGenerator {
            prefix: prefix.into(),
            last: Cell::new(0),
        }
    }

    pub fn next(&self, now_millis: u64) -> String {
        let stamp = now_millis.max(self.last.get() + 1);
        self.last.set(stamp);
        format!("{}-{}", self.prefix, stamp)
    }
}
