//! Checkout result reconciliation.
//!
//! Outcomes are keyed by the cart line that was submitted, never by
//! completion order or by fields echoed in the response, so the report is
//! the same whether purchases ran one after another or all at once.

use crate::cart::CartItem;
use crate::checkout::PurchaseResponse;
use crate::ids::BookId;

/// Fallback message for a rejected purchase without a server message.
const GENERIC_FAILURE: &str = "Purchase failed";

/// Result of submitting one cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOutcome {
    /// The line that was submitted.
    pub item: CartItem,
    /// Server confirmation, or a displayable error.
    pub result: Result<PurchaseResponse, String>,
}

impl PurchaseOutcome {
    /// Record a response. A body with `success = false` counts as a failure.
    pub fn from_response(item: CartItem, response: PurchaseResponse) -> Self {
        let result = if response.success {
            Ok(response)
        } else {
            Err(response
                .message
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()))
        };
        Self { item, result }
    }

    /// Record a transport or HTTP failure.
    pub fn failed(item: CartItem, error: impl Into<String>) -> Self {
        Self {
            item,
            result: Err(error.into()),
        }
    }

    /// Check if the purchase went through.
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// Error text for a failed purchase.
    pub fn error(&self) -> Option<&str> {
        self.result.as_ref().err().map(String::as_str)
    }
}

/// Aggregate of every purchase attempted by one checkout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutReport {
    outcomes: Vec<PurchaseOutcome>,
}

impl CheckoutReport {
    pub fn new(outcomes: Vec<PurchaseOutcome>) -> Self {
        Self { outcomes }
    }

    /// Every outcome, in submission order.
    pub fn outcomes(&self) -> &[PurchaseOutcome] {
        &self.outcomes
    }

    pub fn successes(&self) -> impl Iterator<Item = &PurchaseOutcome> {
        self.outcomes.iter().filter(|o| o.succeeded())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PurchaseOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Ids of purchased lines, one entry per successful line.
    pub fn purchased_ids(&self) -> Vec<BookId> {
        self.successes().map(|o| o.item.id).collect()
    }

    /// True when at least one purchase was attempted and none failed.
    pub fn all_succeeded(&self) -> bool {
        !self.outcomes.is_empty() && self.failure_count() == 0
    }

    /// "Successfully purchased N item(s)!" when anything went through.
    pub fn success_message(&self) -> Option<String> {
        match self.success_count() {
            0 => None,
            n => Some(format!("Successfully purchased {} item(s)!", n)),
        }
    }

    /// Names the failure when there is one, counts them otherwise.
    pub fn failure_message(&self) -> Option<String> {
        let mut failures = self.failures();
        let first = failures.next()?;
        let rest = failures.count();
        if rest == 0 {
            Some(format!(
                "Failed to purchase \"{}\": {}",
                first.item.title,
                first.error().unwrap_or(GENERIC_FAILURE)
            ))
        } else {
            Some(format!(
                "Failed to purchase {} item(s). Please try again.",
                rest + 1
            ))
        }
    }

    /// Savings line from the first discounted purchase.
    pub fn savings_message(&self) -> Option<String> {
        self.successes()
            .filter_map(|o| o.result.as_ref().ok())
            .find_map(|resp| resp.savings_message())
    }
}
