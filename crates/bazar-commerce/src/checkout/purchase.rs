//! Purchase requests and responses.

use crate::cart::{group_by_category, CartItem, CategoryOffer};
use crate::checkout::{FieldError, FormField, ValidatedCheckout};
use crate::error::CommerceError;
use crate::ids::{BookId, OrderId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Discount eligibility computed client-side and sent with each purchase.
///
/// The order service applies (or re-validates) the discount itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountInfo {
    /// Whether the item's topic reached the threshold.
    pub has_discount: bool,
    /// The item's topic.
    pub category: String,
    /// Number of cart lines in that topic.
    pub category_count: usize,
    /// Advertised percentage.
    pub discount_percentage: f64,
}

/// Body of `POST /api/purchase/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub shipping_address: String,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_info: Option<DiscountInfo>,
}

impl PurchaseRequest {
    /// A one-off purchase from the book detail view.
    pub fn single(shipping_address: impl Into<String>, payment_method: impl Into<String>) -> Self {
        Self {
            shipping_address: shipping_address.into(),
            payment_method: payment_method.into(),
            customer_email: None,
            phone_number: None,
            discount_info: None,
        }
    }

    /// A one-off purchase, rejecting a blank address or payment method.
    pub fn checked_single(
        shipping_address: &str,
        payment_method: &str,
    ) -> Result<Self, CommerceError> {
        let mut errors = Vec::new();
        if shipping_address.trim().is_empty() {
            errors.push(FieldError::new(FormField::ShippingAddress, "Shipping address is required"));
        }
        if payment_method.trim().is_empty() {
            errors.push(FieldError::new(FormField::PaymentMethod, "Select a payment method"));
        }
        if !errors.is_empty() {
            return Err(CommerceError::InvalidForm(errors));
        }
        Ok(Self::single(shipping_address.trim(), payment_method))
    }

    /// A cart purchase carrying the validated form and discount metadata.
    pub fn for_checkout(checkout: &ValidatedCheckout, discount_info: DiscountInfo) -> Self {
        Self {
            shipping_address: checkout.shipping_address.clone(),
            payment_method: checkout.payment_method.clone(),
            customer_email: Some(checkout.customer_email.clone()),
            phone_number: checkout.phone_number.clone(),
            discount_info: Some(discount_info),
        }
    }
}

/// Response of `POST /api/purchase/:id`.
///
/// Only `success` is always present; discount fields appear when the order
/// service applied a discount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub book_id: Option<BookId>,
    #[serde(default)]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub discount_applied: bool,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub discount_message: Option<String>,
}

impl PurchaseResponse {
    /// Savings line shown after a discounted purchase.
    pub fn savings_message(&self) -> Option<String> {
        if !self.discount_applied {
            return None;
        }
        if let Some(msg) = &self.discount_message {
            return Some(msg.clone());
        }
        let amount = Money::from_decimal(self.discount_amount.unwrap_or_default(), Currency::USD);
        let percentage = self.discount_percentage.unwrap_or_default();
        Some(format!(
            "You saved {} with our {}% category discount!",
            amount, percentage
        ))
    }
}

/// Build one purchase request per cart line, in cart order.
///
/// Discount metadata is computed from the whole cart, so every line of a
/// qualifying topic carries `has_discount = true`.
pub fn plan_purchases(
    items: &[CartItem],
    checkout: &ValidatedCheckout,
    offer: &CategoryOffer,
) -> Vec<(CartItem, PurchaseRequest)> {
    let groups = group_by_category(items);

    items
        .iter()
        .map(|item| {
            let category_count = groups
                .iter()
                .find(|g| g.category == item.topic)
                .map(|g| g.count)
                .unwrap_or(1);
            let info = DiscountInfo {
                has_discount: offer.qualifies(category_count),
                category: item.topic.clone(),
                category_count,
                discount_percentage: offer.discount_percentage,
            };
            (item.clone(), PurchaseRequest::for_checkout(checkout, info))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout() -> ValidatedCheckout {
        ValidatedCheckout {
            shipping_address: "12 Main Street".into(),
            payment_method: "PayPal".into(),
            customer_email: "reader@example.com".into(),
            phone_number: None,
        }
    }

    fn item(id: u64, topic: &str) -> CartItem {
        CartItem {
            id: BookId::new(id),
            title: format!("Book {}", id),
            author: "Author".into(),
            price: 10.0,
            topic: topic.into(),
            quantity: 1,
        }
    }

    #[test]
    fn test_plan_marks_qualifying_topics() {
        let items = vec![item(1, "ds"), item(2, "db"), item(3, "ds")];
        let plan = plan_purchases(&items, &checkout(), &CategoryOffer::STANDARD);
        assert_eq!(plan.len(), 3);

        let info: Vec<&DiscountInfo> = plan
            .iter()
            .map(|(_, req)| req.discount_info.as_ref().unwrap())
            .collect();
        assert!(info[0].has_discount);
        assert_eq!(info[0].category_count, 2);
        assert!(!info[1].has_discount);
        assert_eq!(info[1].category_count, 1);
        assert!(info[2].has_discount);
        assert_eq!(plan[2].0.id, BookId::new(3));
    }

    #[test]
    fn test_request_wire_format_skips_missing_fields() {
        let body = serde_json::to_value(PurchaseRequest::single("12 Main Street", "PayPal")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"shipping_address": "12 Main Street", "payment_method": "PayPal"})
        );
    }

    #[test]
    fn test_checked_single_rejects_blank_fields() {
        match PurchaseRequest::checked_single("   ", "") {
            Err(CommerceError::InvalidForm(fields)) => assert_eq!(fields.len(), 2),
            other => panic!("expected form error, got {:?}", other),
        }
        let req = PurchaseRequest::checked_single(" 12 Main Street ", "PayPal").unwrap();
        assert_eq!(req.shipping_address, "12 Main Street");
    }

    #[test]
    fn test_checkout_request_carries_discount_info() {
        let plan = plan_purchases(&[item(1, "ds"), item(2, "ds")], &checkout(), &CategoryOffer::STANDARD);
        let body = serde_json::to_value(&plan[0].1).unwrap();
        assert_eq!(body["customer_email"], "reader@example.com");
        assert!(body.get("phone_number").is_none());
        assert_eq!(body["discount_info"]["has_discount"], true);
        assert_eq!(body["discount_info"]["category"], "ds");
        assert_eq!(body["discount_info"]["category_count"], 2);
        assert_eq!(body["discount_info"]["discount_percentage"], 15.0);
    }

    #[test]
    fn test_response_from_order_service() {
        let json = r#"{"success": true, "message": "Purchase successful",
            "order_id": "ORD-1A2B3C4D", "book": "DDIA", "timestamp": "2024-05-01 10:00:00",
            "discount_applied": true, "discount_amount": 10.5, "discount_percentage": 15}"#;
        let resp: PurchaseResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.order_id.as_ref().unwrap().as_str(), "ORD-1A2B3C4D");
        assert_eq!(
            resp.savings_message().unwrap(),
            "You saved $10.50 with our 15% category discount!"
        );
    }

    #[test]
    fn test_savings_prefers_server_message() {
        let resp = PurchaseResponse {
            success: true,
            discount_applied: true,
            discount_message: Some("You saved $3.00 with our category discount!".into()),
            ..Default::default()
        };
        assert_eq!(
            resp.savings_message().as_deref(),
            Some("You saved $3.00 with our category discount!")
        );
        assert_eq!(PurchaseResponse::default().savings_message(), None);
    }
}
