//! Money type for displaying monetary values.
//!
//! Catalog prices arrive from the backend as floating point and cart totals
//! are summed in floating point. A [`Money`] is only built at the display
//! boundary, where the amount is rounded once to cents. Rounding earlier
//! (per item, then again per category) drifts by a cent on some carts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency the store prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
        }
    }
}

/// An amount rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Round a float amount to cents, half away from zero.
    ///
    /// ```
    /// use bazar_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// `$217.50`; negative amounts render as `-$3.00`.
    pub fn display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            cents / 100,
            cents % 100
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
