//! Donation page configuration.
//!
//! A browser bundle has no process environment, so the public key is taken
//! from the build environment (`PAYSTACK_PUBLIC_KEY`) and can be overridden
//! by the embedding application.

use std::time::Duration;

use serde::Serialize;

use crate::error::{DonationError, Result};

pub const DEFAULT_REFERENCE_PREFIX: &str = "adenike-iftar";
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(10);

/// Currencies the checkout is configured for.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Currency {
    /// Nigerian naira, settled in kobo.
    #[default]
    #[serde(rename = "NGN")]
    Ngn,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Ngn => "NGN",
        }
    }

    /// Minor units per major unit.
    pub fn minor_units(self) -> u64 {
        match self {
            Currency::Ngn => 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DonationConfig {
    /// Paystack public key (`pk_test_…` / `pk_live_…`).
    pub public_key: Option<String>,
    pub currency: Currency,
    /// Prefix of every generated transaction reference.
    pub reference_prefix: String,
    /// How long the success notice stays on screen.
    pub notice_duration: Duration,
}

impl Default for DonationConfig {
    fn default() -> Self {
        DonationConfig {
            public_key: None,
            currency: Currency::default(),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }
}

impl DonationConfig {
    /// Defaults plus whatever `PAYSTACK_PUBLIC_KEY` held at build time.
    pub fn from_build_env() -> Self {
        DonationConfig {
            public_key: option_env!("PAYSTACK_PUBLIC_KEY").map(str::to_string),
            ..Default::default()
        }
    }

    pub fn with_public_key(mut self, key: impl Into<String>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    pub fn with_reference_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reference_prefix = prefix.into();
        self
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    /// The configured key, or a configuration error if it is absent or blank.
    pub fn public_key(&self) -> Result<&str> {
        match self.public_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(DonationError::MissingPublicKey),
        }
    }
}
