//! Order history records.
//!
//! The order service has been seen returning three shapes from its history
//! endpoints: flat per-line rows, orders with nested items, and bare order
//! summaries whose lines must be fetched one order at a time. All three are
//! decoded here and normalised into [`Order`].

use crate::ids::{BookId, OrderId};
use crate::money::{Currency, Money};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_quantity() -> i64 {
    1
}

/// One purchased book inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub item_id: Option<BookId>,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(deserialize_with = "crate::catalog::deserialize_price")]
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl OrderItem {
    pub fn display_price(&self) -> Money {
        Money::from_decimal(self.price, Currency::USD)
    }
}

/// A flat history row: one purchased line tagged with its order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: OrderId,
    #[serde(default)]
    pub item_id: Option<BookId>,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(deserialize_with = "crate::catalog::deserialize_price")]
    pub price: f64,
    #[serde(default, alias = "order_date")]
    pub timestamp: Option<String>,
}

impl From<OrderLine> for OrderItem {
    fn from(line: OrderLine) -> Self {
        Self {
            item_id: line.item_id,
            title: line.title,
            author: line.author,
            price: line.price,
            quantity: 1,
        }
    }
}

/// Aggregate row from `GET /api/orders`, without its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(deserialize_with = "crate::catalog::deserialize_price")]
    pub total_amount: f64,
    #[serde(default)]
    pub item_count: usize,
}

/// Body of `GET /api/orders/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(default)]
    pub order: Option<OrderSummary>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// An order with its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(deserialize_with = "crate::catalog::deserialize_price")]
    pub total_amount: f64,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Combine a summary with the lines fetched for it.
    pub fn from_summary(summary: OrderSummary, items: Vec<OrderItem>) -> Self {
        Self {
            order_id: summary.order_id,
            order_date: summary.order_date,
            total_amount: summary.total_amount,
            items,
        }
    }

    pub fn display_total(&self) -> Money {
        Money::from_decimal(self.total_amount, Currency::USD)
    }

    /// Order date as `YYYY-MM-DD`, or the raw value if it cannot be parsed.
    pub fn display_date(&self) -> String {
        self.order_date
            .as_deref()
            .map(format_order_date)
            .unwrap_or_default()
    }
}

/// Group flat rows into orders, keeping first-appearance order.
///
/// An order's total is the sum of its line prices and its date is taken
/// from the first line that carries one.
pub fn group_lines(lines: Vec<OrderLine>) -> Vec<Order> {
    let mut index: HashMap<OrderId, usize> = HashMap::new();
    let mut orders: Vec<Order> = Vec::new();

    for line in lines {
        let pos = match index.get(&line.order_id) {
            Some(&pos) => pos,
            None => {
                index.insert(line.order_id.clone(), orders.len());
                orders.push(Order {
                    order_id: line.order_id.clone(),
                    order_date: None,
                    total_amount: 0.0,
                    items: Vec::new(),
                });
                orders.len() - 1
            }
        };

        let order = &mut orders[pos];
        if order.order_date.is_none() {
            order.order_date = line.timestamp.clone();
        }
        order.total_amount += line.price;
        order.items.push(OrderItem::from(line));
    }

    orders
}

/// The rows of a history response, in whichever shape the server chose.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HistoryRows {
    /// Orders with nested items.
    Grouped(Vec<Order>),
    /// One row per purchased line.
    Flat(Vec<OrderLine>),
    /// Order totals only; lines live behind `/api/orders/:id`.
    Summaries(Vec<OrderSummary>),
}

impl Default for HistoryRows {
    fn default() -> Self {
        HistoryRows::Grouped(Vec::new())
    }
}

/// Body of `GET /api/orders` and `GET /api/purchase-history`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    Wrapped {
        #[serde(default)]
        orders: HistoryRows,
    },
    Bare(HistoryRows),
}

impl HistoryPayload {
    pub fn into_rows(self) -> HistoryRows {
        match self {
            HistoryPayload::Wrapped { orders } => orders,
            HistoryPayload::Bare(rows) => rows,
        }
    }
}

/// Format a server timestamp as `YYYY-MM-DD`.
///
/// Accepts RFC 2822 (Flask's default), RFC 3339 and `YYYY-MM-DD HH:MM:SS`.
pub fn format_order_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_rows_are_grouped() {
        let json = r#"{"orders": [
            {"order_id": "ORD-A", "item_id": 1, "title": "DDIA", "price": 40.0, "timestamp": "2024-05-01 10:00:00"},
            {"order_id": "ORD-B", "item_id": 2, "title": "SICP", "price": "30.50"},
            {"order_id": "ORD-A", "item_id": 3, "title": "TAOCP", "price": 60.0}
        ]}"#;
        let payload: HistoryPayload = serde_json::from_str(json).unwrap();
        let lines = match payload.into_rows() {
            HistoryRows::Flat(lines) => lines,
            other => panic!("expected flat rows, got {other:?}"),
        };

        let orders = group_lines(lines);
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id.as_str(), "ORD-A");
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].display_total().display(), "$100.00");
        assert_eq!(orders[0].display_date(), "2024-05-01");
        assert_eq!(orders[1].display_total().display(), "$30.50");
    }

    #[test]
    fn test_grouped_shape() {
        let json = r#"{"orders": [
            {"order_id": "ORD-A", "order_date": "2024-05-01T10:00:00Z", "total_amount": 12.5,
             "items": [{"title": "DDIA", "price": 12.5, "quantity": 1}]}
        ]}"#;
        let payload: HistoryPayload = serde_json::from_str(json).unwrap();
        match payload.into_rows() {
            HistoryRows::Grouped(orders) => {
                assert_eq!(orders[0].items[0].title, "DDIA");
                assert_eq!(orders[0].display_date(), "2024-05-01");
            }
            other => panic!("expected grouped rows, got {other:?}"),
        }
    }

    #[test]
    fn test_summary_shape() {
        let json = r#"{"orders": [
            {"order_id": "ORD-A", "order_date": "Wed, 01 May 2024 10:00:00 GMT",
             "total_amount": "79.99", "item_count": 1}
        ]}"#;
        let payload: HistoryPayload = serde_json::from_str(json).unwrap();
        match payload.into_rows() {
            HistoryRows::Summaries(summaries) => {
                assert_eq!(summaries[0].item_count, 1);
                assert_eq!(summaries[0].total_amount, 79.99);
            }
            other => panic!("expected summaries, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_orders_is_empty() {
        let payload: HistoryPayload = serde_json::from_str(r#"{"orders": []}"#).unwrap();
        assert_eq!(payload.into_rows(), HistoryRows::Grouped(vec![]));
        let payload: HistoryPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.into_rows(), HistoryRows::default());
    }

    #[test]
    fn test_order_detail() {
        let json = r#"{"order": {"order_id": "ORD-A", "order_date": "x", "total_amount": 10, "item_count": 1},
            "items": [{"id": 7, "order_id": "ORD-A", "item_id": 3, "title": "SICP",
            "author": "Abelson", "price": 10.0, "timestamp": "2024-05-01 10:00:00"}]}"#;
        let detail: OrderDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.items[0].item_id, Some(BookId::new(3)));
        assert_eq!(detail.items[0].quantity, 1);
    }

    #[test]
    fn test_format_order_date_fallback() {
        assert_eq!(format_order_date("yesterday"), "yesterday");
        assert_eq!(format_order_date("2024-05-01 10:00:00"), "2024-05-01");
    }
}
