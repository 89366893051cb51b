//! Checkout module.
//!
//! Form validation, the purchase wire types, and reconciliation of the
//! per-item purchase results back into the cart.

mod form;
mod purchase;
mod report;

pub use form::{
    is_valid_email, is_valid_phone, CheckoutForm, FieldError, FormField, ValidatedCheckout,
    MIN_ADDRESS_LEN, PAYMENT_METHODS,
};
pub use purchase::{plan_purchases, DiscountInfo, PurchaseRequest, PurchaseResponse};
pub use report::{CheckoutReport, PurchaseOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How cart purchases are submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    /// One request at a time, each awaited before the next.
    #[default]
    Sequential,
    /// All requests issued together and awaited as a batch.
    Concurrent,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Sequential => "sequential",
            CheckoutMode::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for CheckoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(CheckoutMode::Sequential),
            "concurrent" => Ok(CheckoutMode::Concurrent),
            other => Err(format!("unknown checkout mode: {}", other)),
        }
    }
}
