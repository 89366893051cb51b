//! Cart pricing calculations.

use crate::cart::{AppliedOffer, CartItem, CategoryOffer};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart.
///
/// All amounts are kept unrounded; use the `display_*` accessors to get
/// values rounded to cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of every line price.
    pub subtotal: f64,
    /// Sum of every category discount.
    pub discount: f64,
    /// `subtotal - discount`.
    pub total: f64,
    /// Per-category breakdown of `discount`.
    pub applied_offers: Vec<AppliedOffer>,
}

impl CartTotals {
    /// Price a list of cart lines under `offer`.
    pub fn calculate(items: &[CartItem], offer: &CategoryOffer) -> Self {
        let subtotal = items.iter().fold(0.0, |acc, item| acc + item.price);
        let applied_offers = offer.apply(items);
        let discount = applied_offers.iter().fold(0.0, |acc, o| acc + o.discount);

        Self {
            subtotal,
            discount,
            total: subtotal - discount,
            applied_offers,
        }
    }

    /// Subtotal rounded for display.
    pub fn display_subtotal(&self) -> Money {
        Money::from_decimal(self.subtotal, Currency::USD)
    }

    /// Discount rounded for display.
    pub fn display_discount(&self) -> Money {
        Money::from_decimal(self.discount, Currency::USD)
    }

    /// Total rounded for display.
    pub fn display_total(&self) -> Money {
        Money::from_decimal(self.total, Currency::USD)
    }

    /// Whether a discount worth showing (at least one cent) applies.
    pub fn has_discount(&self) -> bool {
        self.display_discount().is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::BookId;

    fn item(id: u64, topic: &str, price: f64) -> CartItem {
        CartItem {
            id: BookId::new(id),
            title: format!("Book {}", id),
            author: "Author".into(),
            price,
            topic: topic.into(),
            quantity: 1,
        }
    }

    #[test]
    fn test_empty_cart_is_zero() {
        let totals = CartTotals::calculate(&[], &CategoryOffer::STANDARD);
        assert_eq!(totals.display_subtotal().amount_cents, 0);
        assert_eq!(totals.display_discount().amount_cents, 0);
        assert_eq!(totals.display_total().amount_cents, 0);
        assert!(!totals.has_discount());
    }

    #[test]
    fn test_two_categories_worked_example() {
        let items = vec![
            item(1, "distributed systems", 70.0),
            item(2, "distributed systems", 80.0),
            item(3, "databases", 90.0),
        ];
        let totals = CartTotals::calculate(&items, &CategoryOffer::STANDARD);
        assert_eq!(totals.display_subtotal().display(), "$240.00");
        assert_eq!(totals.display_discount().display(), "$22.50");
        assert_eq!(totals.display_total().display(), "$217.50");
    }

    #[test]
    fn test_discount_is_sum_of_offers() {
        let items = vec![
            item(1, "a", 19.99),
            item(2, "a", 5.01),
            item(3, "b", 33.33),
            item(4, "b", 33.33),
            item(5, "b", 33.34),
        ];
        let totals = CartTotals::calculate(&items, &CategoryOffer::STANDARD);
        let summed: f64 = totals.applied_offers.iter().map(|o| o.discount).sum();
        assert!((summed - totals.discount).abs() < 1e-9);
        assert!((totals.total - (totals.subtotal - totals.discount)).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_happens_once_at_output() {
        // Two topic discounts of 0.225 each; only the sum is rounded.
        let items = vec![
            item(1, "a", 0.75),
            item(2, "a", 0.75),
            item(3, "b", 0.75),
            item(4, "b", 0.75),
        ];
        let totals = CartTotals::calculate(&items, &CategoryOffer::STANDARD);
        assert_eq!(totals.display_discount().amount_cents, 45);
        assert_eq!(totals.display_total().amount_cents, 255);
    }
}
